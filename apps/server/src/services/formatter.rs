//! Result formatting - shapes store rows into the response envelope

use crate::{
    db::search::{SearchRequest, SortField},
    models::{RankedResult, SearchHit, SearchMetadata, SearchResponse, SearchRow},
    Error, Result,
};

/// Wrap rows into a [`SearchResponse`].
///
/// Scores are only exposed when results are ranked by relevance.
pub fn format_response(request: &SearchRequest, rows: Vec<SearchRow>) -> Result<SearchResponse> {
    let ranked = request.sort_by == SortField::Relevance;

    let data = rows
        .into_iter()
        .map(|row| {
            if !row.score.is_finite() {
                return Err(Error::Internal(format!(
                    "non-finite relevance score for record {}",
                    row.record.id
                )));
            }
            Ok(if ranked {
                SearchHit::Ranked(RankedResult {
                    record: row.record,
                    score: row.score,
                })
            } else {
                SearchHit::Record(row.record)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SearchResponse {
        metadata: SearchMetadata {
            query: request.raw_query.clone(),
            limit: request.limit,
            returned: data.len(),
        },
        data,
    })
}
