//! SQL query builder for full-text searches.
//!
//! Builds one parameterized statement from a validated [`SearchRequest`]:
//! - Base relevance query over `searchable_content`
//! - Optional category filter
//! - Whitelisted sort column with a stable `id` tiebreak
//! - Bound `LIMIT`
//!
//! User input only ever travels as bind values. The only text interpolated into the
//! statement is fixed SQL chosen from enums.

use super::params::{SearchRequest, SortField, SortOrder};
use serde::Deserialize;

mod bind;
mod term;

use bind::{push_bigint, push_text};

/// Bind values for `sqlx` queries, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    BigInt(i64),
}

/// A statement ready for execution: SQL text plus its ordered bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

/// How the raw query is turned into a `tsquery`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Lexemes ANDed together, last one matched as a prefix, via `to_tsquery`.
    #[default]
    Prefix,
    /// Trimmed input handed to `websearch_to_tsquery` (quotes, `or`, `-` supported).
    WebSearch,
    /// Trimmed input handed to `plainto_tsquery`.
    Plain,
}

impl SearchMode {
    fn tsquery_constructor(self) -> &'static str {
        match self {
            SearchMode::Prefix => "to_tsquery",
            SearchMode::WebSearch => "websearch_to_tsquery",
            SearchMode::Plain => "plainto_tsquery",
        }
    }
}

/// Text-search configuration used for both the stored vectors and the query.
const TEXT_SEARCH_CONFIG: &str = "pg_catalog.english";

const SELECT_COLUMNS: &str = "sc.id, sc.title, sc.description, sc.url, sc.image_url, sc.category, sc.created_at";

/// Query builder for full-text searches.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder {
    mode: SearchMode,
}

impl QueryBuilder {
    pub fn new(mode: SearchMode) -> Self {
        Self { mode }
    }

    pub fn build_sql(&self, request: &SearchRequest) -> SqlStatement {
        let mut bind_params = Vec::new();

        let term = term::derive_search_term(self.mode, &request.raw_query);
        let term_idx = push_text(&mut bind_params, term);

        let mut sql = format!(
            "SELECT {SELECT_COLUMNS}, ts_rank_cd(sc.search_vector, query) AS score \
             FROM searchable_content sc, {}('{TEXT_SEARCH_CONFIG}', ${term_idx}) query \
             WHERE sc.search_vector @@ query",
            self.mode.tsquery_constructor(),
        );

        if let Some(category) = &request.category {
            let idx = push_text(&mut bind_params, category.clone());
            sql.push_str(&format!(" AND sc.category = ${idx}"));
        }

        sql.push_str(" ORDER BY ");
        sql.push_str(&order_by_clause(request.sort_by, request.sort_order));

        let limit_idx = push_bigint(&mut bind_params, request.limit as i64);
        sql.push_str(&format!(" LIMIT ${limit_idx}"));

        SqlStatement {
            sql,
            binds: bind_params,
        }
    }
}

fn order_by_clause(sort_by: SortField, sort_order: SortOrder) -> String {
    let dir = match sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    let primary = match sort_by {
        // Relevance always ranks best-first.
        SortField::Relevance => "score DESC".to_string(),
        SortField::Title => format!("sc.title {dir}"),
        SortField::CreatedAt => format!("sc.created_at {dir}"),
    };
    // Ensure deterministic ordering among equal primary keys.
    format!("{primary}, sc.id ASC")
}
