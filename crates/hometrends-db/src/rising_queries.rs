//! Database operations for the `rising_queries` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `rising_queries` table — a free-text search query whose
/// volume is climbing for the keyword.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RisingQueryRow {
    pub id: Uuid,
    pub keyword_id: Uuid,
    pub query_text: String,
    pub growth_percentage: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Returns the fastest-rising queries for a keyword, ordered by
/// `growth_percentage DESC` and capped at `limit`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_rising_queries(
    pool: &PgPool,
    keyword_id: Uuid,
    limit: i64,
) -> Result<Vec<RisingQueryRow>, DbError> {
    let rows = sqlx::query_as::<_, RisingQueryRow>(
        "SELECT id, keyword_id, query_text, growth_percentage, created_at \
         FROM rising_queries \
         WHERE keyword_id = $1 \
         ORDER BY growth_percentage DESC \
         LIMIT $2",
    )
    .bind(keyword_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
