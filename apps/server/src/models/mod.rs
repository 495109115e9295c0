//! Domain models for search requests and responses

pub mod search;

pub use search::{
    RankedResult, SearchHit, SearchMetadata, SearchResponse, SearchRow, SearchableRecord,
};
