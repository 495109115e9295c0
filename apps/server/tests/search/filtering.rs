use crate::support::*;
use axum::http::StatusCode;

#[tokio::test]
async fn category_filter_is_exact() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app
                .get("/api/search?q=item&category=movies&limit=50&sortBy=title&sortOrder=asc")
                .await?;
            assert_status(status, StatusCode::OK, &body);

            let value = json_body(&body)?;
            let rows = results(&value)?;
            // Only item 3 of each letter is a movie.
            assert_eq!(rows.len(), 26);
            assert!(rows.iter().all(|r| r["category"] == "movies"));
            assert_eq!(rows[0]["title"], "A Item 3");

            let (_, _, body) = app.get("/api/search?q=item&category=Movies").await?;
            assert!(results(&json_body(&body)?)?.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn blank_category_means_no_filter() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, _, body) = app.get("/api/search?q=item&category=&limit=50").await?;
            assert_eq!(results(&json_body(&body)?)?.len(), 50);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn non_matching_query_returns_empty_data() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app.get("/api/search?q=zebra").await?;
            assert_status(status, StatusCode::OK, &body);
            let value = json_body(&body)?;
            assert!(results(&value)?.is_empty());
            assert_metadata(&value, "zebra", 10)?;
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn punctuation_only_query_matches_nothing() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app.get("/api/search?q=%26%7C!%3A*").await?;
            assert_status(status, StatusCode::OK, &body);
            assert!(results(&json_body(&body)?)?.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn hostile_input_is_bound_not_inlined() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app
                .get("/api/search?q=item'%3B%20DROP%20TABLE%20searchable_content%3B--&category=x'%20OR%20'1'%3D'1")
                .await?;
            assert_status(status, StatusCode::OK, &body);
            assert!(results(&json_body(&body)?)?.is_empty());

            let (_, _, body) = app.get("/api/search?q=item&limit=1").await?;
            assert_eq!(results(&json_body(&body)?)?.len(), 1);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn response_shape() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, _, body) = app
                .get("/api/v1/search?q=A%20Item%201&limit=1&sortBy=title&sortOrder=asc")
                .await?;
            let value = json_body(&body)?;
            let row = &results(&value)?[0];
            assert_eq!(row["title"], "A Item 1");
            assert_eq!(row["url"], "https://example.com/items/a-1");
            assert_eq!(row["imageUrl"], "https://example.com/images/a-1.png");
            assert_eq!(row["category"], "books");
            assert!(row["createdAt"].as_str().is_some());
            assert!(row["id"].as_i64().is_some());
            Ok(())
        })
    })
    .await
}
