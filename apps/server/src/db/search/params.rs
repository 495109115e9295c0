//! Search parameter parsing and validation
//!
//! Turns the ordered `(key, value)` pairs of a query string into a [`SearchRequest`]:
//! - `q` (required, non-empty after trimming, given once)
//! - `category` (optional, ignored when blank or repeated)
//! - `limit` (optional, `1..=max`, defaults when absent)
//! - `sortBy` / `sortOrder` (optional, normalized onto fixed enums)

use crate::error::ValidationError;

/// Validated search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// The query exactly as the client sent it (echoed back in the response).
    pub raw_query: String,
    pub category: Option<String>,
    pub limit: usize,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// Sortable fields. Only these ever reach the SQL builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Relevance,
    Title,
    CreatedAt,
}

impl SortField {
    /// Exact, case-sensitive match against the whitelist.
    fn parse(value: &str) -> Option<Self> {
        match value {
            "relevance" => Some(Self::Relevance),
            "title" => Some(Self::Title),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Title => "title",
            Self::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` in any case selects ascending; everything else is descending.
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// Bounds for the `limit` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPolicy {
    pub default: usize,
    pub max: usize,
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self {
            default: 10,
            max: 50,
        }
    }
}

impl LimitPolicy {
    fn parse(&self, value: Option<&str>) -> Result<usize, ValidationError> {
        let invalid = || ValidationError::InvalidLimit {
            min: 1,
            max: self.max,
        };

        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(self.default);
        };

        let parsed: i64 = value.parse().map_err(|_| invalid())?;
        if parsed < 1 || parsed as u64 > self.max as u64 {
            return Err(invalid());
        }
        Ok(parsed as usize)
    }
}

impl SearchRequest {
    /// Parse and validate search parameters from ordered (key, value) items.
    pub fn from_items(
        items: &[(String, String)],
        limits: &LimitPolicy,
    ) -> Result<Self, ValidationError> {
        let mut queries = Vec::new();
        let mut categories = Vec::new();
        let mut limit = None;
        let mut sort_by = None;
        let mut sort_order = None;

        for (key, value) in items {
            match key.as_str() {
                "q" => queries.push(value.as_str()),
                "category" => categories.push(value.as_str()),
                // Last occurrence wins for the scalar controls.
                "limit" => limit = Some(value.as_str()),
                "sortBy" => sort_by = Some(value.as_str()),
                "sortOrder" => sort_order = Some(value.as_str()),
                _ => {}
            }
        }

        let raw_query = match queries.as_slice() {
            [q] if !q.trim().is_empty() => q.to_string(),
            _ => return Err(ValidationError::MissingQuery),
        };

        let limit = limits.parse(limit)?;

        let category = match categories.as_slice() {
            [c] if !c.trim().is_empty() => Some(c.to_string()),
            _ => None,
        };

        let sort_by = match sort_by {
            None => SortField::Relevance,
            Some(value) => SortField::parse(value).unwrap_or_else(|| {
                tracing::debug!(sort_by = %value, "Unknown sortBy, falling back to relevance");
                SortField::Relevance
            }),
        };

        let sort_order = sort_order.map(SortOrder::parse).unwrap_or_default();

        Ok(Self {
            raw_query,
            category,
            limit,
            sort_by,
            sort_order,
        })
    }
}
