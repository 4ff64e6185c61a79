//! Database operations for the `keyword_daily_trends` table.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `keyword_daily_trends` table — one score per keyword per day.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyTrendRow {
    pub id: Uuid,
    pub keyword_id: Uuid,
    pub date: NaiveDate,
    pub interest_score: i32,
    pub created_at: DateTime<Utc>,
}

/// Returns all daily-trend rows for the given keyword ids, ordered by date
/// ascending.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_daily_trends(
    pool: &PgPool,
    keyword_ids: &[Uuid],
) -> Result<Vec<DailyTrendRow>, DbError> {
    let rows = sqlx::query_as::<_, DailyTrendRow>(
        "SELECT id, keyword_id, date, interest_score, created_at \
         FROM keyword_daily_trends \
         WHERE keyword_id = ANY($1) \
         ORDER BY date ASC",
    )
    .bind(keyword_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
