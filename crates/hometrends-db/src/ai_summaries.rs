//! Database operations for the `ai_summaries` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `ai_summaries` table. `summary_text` is multi-paragraph,
/// paragraphs separated by blank lines.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AiSummaryRow {
    pub id: Uuid,
    pub keyword_id: Uuid,
    pub summary_text: String,
    pub generated_at: DateTime<Utc>,
}

/// Returns the AI-generated market summary for a keyword, or `None` if one
/// has not been generated. The store keeps at most one summary per keyword;
/// should that ever not hold, the latest `generated_at` wins deterministically.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_ai_summary(
    pool: &PgPool,
    keyword_id: Uuid,
) -> Result<Option<AiSummaryRow>, DbError> {
    let row = sqlx::query_as::<_, AiSummaryRow>(
        "SELECT id, keyword_id, summary_text, generated_at \
         FROM ai_summaries \
         WHERE keyword_id = $1 \
         ORDER BY generated_at DESC \
         LIMIT 1",
    )
    .bind(keyword_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
