use crate::support::*;
use axum::http::StatusCode;
use sift::db::{seed, SearchMode};

#[tokio::test]
async fn prefix_mode_matches_partial_words() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app.get("/api/search?q=ite&limit=50").await?;
            assert_status(status, StatusCode::OK, &body);
            assert_eq!(results(&json_body(&body)?)?.len(), 50);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn plain_mode_needs_whole_words() -> anyhow::Result<()> {
    with_test_app_with_config(
        |config| config.search.mode = SearchMode::Plain,
        &seed::sample_records(),
        |app| {
            Box::pin(async move {
                let (_, _, body) = app.get("/api/search?q=ite").await?;
                assert!(results(&json_body(&body)?)?.is_empty());

                let (status, _, body) = app
                    .get("/api/search?q=item%204&limit=50&sortBy=title&sortOrder=asc")
                    .await?;
                assert_status(status, StatusCode::OK, &body);
                let titles = titles(&json_body(&body)?)?;
                assert_eq!(titles.len(), 26);
                assert_eq!(titles[0], "A Item 4");
                Ok(())
            })
        },
    )
    .await
}

#[tokio::test]
async fn websearch_mode_supports_exclusion() -> anyhow::Result<()> {
    with_test_app_with_config(
        |config| config.search.mode = SearchMode::WebSearch,
        &seed::sample_records(),
        |app| {
            Box::pin(async move {
                let (status, _, body) = app
                    .get("/api/search?q=item%20-1&category=books&limit=50&sortBy=title&sortOrder=asc")
                    .await?;
                assert_status(status, StatusCode::OK, &body);

                // Books are items 1 and 4; excluding 1 leaves item 4 of each letter.
                let titles = titles(&json_body(&body)?)?;
                assert_eq!(titles.len(), 26);
                assert!(titles.iter().all(|t| t.ends_with(" 4")), "{titles:?}");
                Ok(())
            })
        },
    )
    .await
}
