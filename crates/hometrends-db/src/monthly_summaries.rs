//! Database operations for the `monthly_summaries` table.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// One entry of a monthly leaderboard, stored in the `top_keywords` JSONB
/// column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopKeywordEntry {
    pub keyword: String,
    pub score: i32,
    pub rank: i32,
}

/// A row from the `monthly_summaries` table — one leaderboard per month.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlySummaryRow {
    pub id: Uuid,
    pub month: NaiveDate,
    pub top_keywords: Json<Vec<TopKeywordEntry>>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the most recent monthly leaderboards, ordered by `month DESC` and
/// capped at `limit`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_monthly_summaries(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<MonthlySummaryRow>, DbError> {
    let rows = sqlx::query_as::<_, MonthlySummaryRow>(
        "SELECT id, month, top_keywords, created_at \
         FROM monthly_summaries \
         ORDER BY month DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
