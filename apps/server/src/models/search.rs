//! Search records and the response envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of `searchable_content`, minus its text-search vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SearchableRecord {
    /// Stable unique identifier (also the ordering tiebreak)
    pub id: i64,

    pub title: String,

    pub description: String,

    pub url: Option<String>,

    pub image_url: Option<String>,

    pub category: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Raw row returned by the search statement: the record plus its `ts_rank_cd` score.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SearchRow {
    #[sqlx(flatten)]
    pub record: SearchableRecord,

    pub score: f32,
}

/// A record with the relevance score the store computed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub record: SearchableRecord,

    pub score: f32,
}

/// One entry of `SearchResponse.data`.
///
/// Relevance-sorted searches return `Ranked`; field-sorted searches omit the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchHit {
    Ranked(RankedResult),
    Record(SearchableRecord),
}

impl SearchHit {
    pub fn record(&self) -> &SearchableRecord {
        match self {
            SearchHit::Ranked(ranked) => &ranked.record,
            SearchHit::Record(record) => record,
        }
    }

    pub fn score(&self) -> Option<f32> {
        match self {
            SearchHit::Ranked(ranked) => Some(ranked.score),
            SearchHit::Record(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMetadata {
    /// The `q` parameter as received
    pub query: String,

    pub limit: usize,

    /// Number of entries in `data`
    pub returned: usize,
}

/// Response envelope for `GET /api/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<SearchHit>,
    pub metadata: SearchMetadata,
}
