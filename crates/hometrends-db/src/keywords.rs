//! Database operations for the `keywords` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `keywords` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KeywordRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub interest_score: i32,
    pub trend_percentage: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all active keywords, optionally restricted to the given categories.
///
/// An empty `categories` slice means no category restriction. Results are
/// ordered by `interest_score DESC`; the `name ASC` secondary key keeps tie
/// order stable across fetches.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_active_keywords(
    pool: &PgPool,
    categories: &[String],
) -> Result<Vec<KeywordRow>, DbError> {
    let rows = sqlx::query_as::<_, KeywordRow>(
        "SELECT id, name, category, interest_score, trend_percentage, is_active, \
                created_at, updated_at \
         FROM keywords \
         WHERE is_active = TRUE \
           AND (cardinality($1::TEXT[]) = 0 OR category = ANY($1)) \
         ORDER BY interest_score DESC, name ASC",
    )
    .bind(categories)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
