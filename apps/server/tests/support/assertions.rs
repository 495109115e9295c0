use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, body: &[u8]) {
    assert_eq!(
        actual,
        expected,
        "unexpected status; body: {}",
        String::from_utf8_lossy(body)
    );
}

/// Parse a response body as JSON.
pub fn json_body(body: &[u8]) -> anyhow::Result<Value> {
    serde_json::from_slice(body).context("parse response body as JSON")
}

/// Assert the `{ "error": ... }` envelope and return the message.
pub fn assert_error_message(value: &Value, expected: &str) {
    assert_eq!(
        value.get("error").and_then(|v| v.as_str()),
        Some(expected),
        "unexpected error envelope: {value}"
    );
}

/// The `data` array of a search response.
pub fn results(value: &Value) -> anyhow::Result<&Vec<Value>> {
    value
        .get("data")
        .and_then(|v| v.as_array())
        .context("response.data is array")
}

pub fn titles(value: &Value) -> anyhow::Result<Vec<String>> {
    Ok(results(value)?
        .iter()
        .filter_map(|r| r.get("title").and_then(|v| v.as_str()).map(str::to_string))
        .collect())
}

pub fn ids(value: &Value) -> anyhow::Result<Vec<i64>> {
    Ok(results(value)?
        .iter()
        .filter_map(|r| r.get("id").and_then(|v| v.as_i64()))
        .collect())
}

pub fn scores(value: &Value) -> anyhow::Result<Vec<f64>> {
    results(value)?
        .iter()
        .map(|r| {
            r.get("score")
                .and_then(|v| v.as_f64())
                .context("result has numeric score")
        })
        .collect()
}

/// Assert `metadata` matches and `returned` equals the length of `data`.
pub fn assert_metadata(value: &Value, query: &str, limit: u64) -> anyhow::Result<()> {
    let metadata = value.get("metadata").context("response.metadata")?;
    assert_eq!(metadata.get("query").and_then(|v| v.as_str()), Some(query));
    assert_eq!(metadata.get("limit").and_then(|v| v.as_u64()), Some(limit));
    assert_eq!(
        metadata.get("returned").and_then(|v| v.as_u64()),
        Some(results(value)?.len() as u64)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_titles_and_scores() {
        let value = json!({
            "data": [
                { "id": 1, "title": "a", "score": 0.5 },
                { "id": 2, "title": "b", "score": 0.25 }
            ],
            "metadata": { "query": "x", "limit": 10, "returned": 2 }
        });
        assert_eq!(titles(&value).unwrap(), vec!["a", "b"]);
        assert_eq!(ids(&value).unwrap(), vec![1, 2]);
        assert_eq!(scores(&value).unwrap(), vec![0.5, 0.25]);
        assert_metadata(&value, "x", 10).unwrap();
    }
}
