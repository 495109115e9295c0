use crate::support::*;
use axum::http::StatusCode;

#[tokio::test]
async fn title_ascending_over_sample_catalogue() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app
                .get("/api/search?q=item&limit=5&sortBy=title&sortOrder=asc")
                .await?;
            assert_status(status, StatusCode::OK, &body);

            let value = json_body(&body)?;
            assert_eq!(
                titles(&value)?,
                vec!["A Item 1", "A Item 2", "A Item 3", "A Item 4", "A Item 5"]
            );
            assert_metadata(&value, "item", 5)?;
            assert!(
                value["data"][0].get("score").is_none(),
                "field-sorted results carry no score"
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn title_descending_starts_from_z() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app
                .get("/api/search?q=item&limit=3&sortBy=title&sortOrder=desc")
                .await?;
            assert_status(status, StatusCode::OK, &body);
            assert_eq!(
                titles(&json_body(&body)?)?,
                vec!["Z Item 5", "Z Item 4", "Z Item 3"]
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn created_at_sorts_both_ways() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, _, body) = app
                .get("/api/search?q=item&limit=2&sortBy=created_at&sortOrder=desc")
                .await?;
            assert_eq!(titles(&json_body(&body)?)?, vec!["Z Item 5", "Z Item 4"]);

            let (_, _, body) = app
                .get("/api/search?q=item&limit=2&sortBy=created_at&sortOrder=asc")
                .await?;
            assert_eq!(titles(&json_body(&body)?)?, vec!["A Item 1", "A Item 2"]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn relevance_is_default_and_scores_never_increase() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app.get("/api/search?q=item&limit=50").await?;
            assert_status(status, StatusCode::OK, &body);

            let value = json_body(&body)?;
            let scores = scores(&value)?;
            assert_eq!(scores.len(), 50);
            assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
            assert!(scores.iter().all(|s| *s > 0.0));

            // Every sample row ranks the same, so ties fall back to id order.
            let ids = ids(&value)?;
            assert!(ids.windows(2).all(|w| w[0] < w[1]), "{ids:?}");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn unknown_sort_field_falls_back_to_relevance() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app
                .get("/api/search?q=item&limit=3&sortBy=id;DROP%20TABLE%20searchable_content")
                .await?;
            assert_status(status, StatusCode::OK, &body);
            assert_eq!(scores(&json_body(&body)?)?.len(), 3);

            // The table is still there.
            let (status, _, body) = app.get("/api/search?q=item&limit=1").await?;
            assert_status(status, StatusCode::OK, &body);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn equal_titles_are_ordered_by_id() -> anyhow::Result<()> {
    with_test_app_seeded(&tie_catalogue(), |app| {
        Box::pin(async move {
            for order in ["asc", "desc"] {
                let (status, _, body) = app
                    .get(&format!("/api/search?q=garden&sortBy=title&sortOrder={order}"))
                    .await?;
                assert_status(status, StatusCode::OK, &body);

                let value = json_body(&body)?;
                assert_eq!(titles(&value)?, vec!["Garden gnome", "Garden gnome"]);
                let ids = ids(&value)?;
                assert!(ids[0] < ids[1], "tie must break on ascending id: {ids:?}");
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn equal_creation_times_are_ordered_by_id() -> anyhow::Result<()> {
    with_test_app_seeded(&tie_catalogue(), |app| {
        Box::pin(async move {
            for order in ["asc", "desc"] {
                let (status, _, body) = app
                    .get(&format!(
                        "/api/search?q=patio&sortBy=created_at&sortOrder={order}"
                    ))
                    .await?;
                assert_status(status, StatusCode::OK, &body);

                let value = json_body(&body)?;
                // Inserted lantern first, so it holds the lower id.
                assert_eq!(titles(&value)?, vec!["Patio lantern", "Patio bench"]);
                let ids = ids(&value)?;
                assert!(ids[0] < ids[1], "tie must break on ascending id: {ids:?}");
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn sort_field_names_are_case_sensitive() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app
                .get("/api/search?q=item&limit=3&sortBy=TITLE&sortOrder=desc")
                .await?;
            assert_status(status, StatusCode::OK, &body);

            // Falls back to relevance: scores present, ties in id order from A.
            let value = json_body(&body)?;
            assert_eq!(scores(&value)?.len(), 3);
            assert_eq!(titles(&value)?, vec!["A Item 1", "A Item 2", "A Item 3"]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn default_limit_applies_when_absent() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app.get("/api/search?q=item&limit=").await?;
            assert_status(status, StatusCode::OK, &body);
            let value = json_body(&body)?;
            assert_eq!(results(&value)?.len(), 10);
            assert_metadata(&value, "item", 10)?;
            Ok(())
        })
    })
    .await
}
