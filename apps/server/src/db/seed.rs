//! Sample data for demos and tests
//!
//! Generates the 130-record catalogue used to exercise the search endpoint:
//! `"A Item 1"` through `"Z Item 5"`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::PgPool;

/// Categories assigned round-robin by item number.
pub const SAMPLE_CATEGORIES: [&str; 3] = ["books", "music", "movies"];

/// A record to insert. `id` and `search_vector` are assigned by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: None,
            image_url: None,
            category: None,
            created_at: Utc::now(),
        }
    }
}

/// Build the sample catalogue in insertion order (A1..A5, B1..B5, ...).
pub fn sample_records() -> Vec<NewRecord> {
    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();

    ('A'..='Z')
        .flat_map(|letter| (1..=5).map(move |n| (letter, n)))
        .enumerate()
        .map(|(i, (letter, n))| {
            let slug = format!("{}-{n}", letter.to_ascii_lowercase());
            NewRecord {
                title: format!("{letter} Item {n}"),
                description: format!(
                    "This is a description for {letter} Item {n}. It is used to demonstrate search functionality."
                ),
                url: Some(format!("https://example.com/items/{slug}")),
                image_url: Some(format!("https://example.com/images/{slug}.png")),
                category: Some(SAMPLE_CATEGORIES[(n - 1) % SAMPLE_CATEGORIES.len()].to_string()),
                created_at: epoch + Duration::minutes(i as i64),
            }
        })
        .collect()
}

/// Insert records in one transaction. Returns the ids assigned, in input order.
pub async fn insert_records(pool: &PgPool, records: &[NewRecord]) -> sqlx::Result<Vec<i64>> {
    let mut tx = pool.begin().await?;
    let mut ids = Vec::with_capacity(records.len());

    for record in records {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO searchable_content (title, description, url, image_url, category, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.url)
        .bind(&record.image_url)
        .bind(&record.category)
        .bind(record.created_at)
        .fetch_one(&mut *tx)
        .await?;
        ids.push(id);
    }

    tx.commit().await?;
    Ok(ids)
}
