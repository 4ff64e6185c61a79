//! Database operations for the `related_topics` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `related_topics` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RelatedTopicRow {
    pub id: Uuid,
    pub keyword_id: Uuid,
    pub topic_name: String,
    pub growth_percentage: Decimal,
    pub is_breakout: bool,
    pub created_at: DateTime<Utc>,
}

/// Returns the fastest-growing related topics for a keyword, ordered by
/// `growth_percentage DESC` and capped at `limit`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_related_topics(
    pool: &PgPool,
    keyword_id: Uuid,
    limit: i64,
) -> Result<Vec<RelatedTopicRow>, DbError> {
    let rows = sqlx::query_as::<_, RelatedTopicRow>(
        "SELECT id, keyword_id, topic_name, growth_percentage, is_breakout, created_at \
         FROM related_topics \
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
