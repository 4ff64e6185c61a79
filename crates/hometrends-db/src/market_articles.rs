//! Database operations for the `market_articles` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `market_articles` table. `keyword_id` is nullable — some
/// articles cover the market at large rather than one keyword.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MarketArticleRow {
    pub id: Uuid,
    pub keyword_id: Option<Uuid>,
    pub title: String,
    pub source: String,
    pub excerpt: Option<String>,
    pub url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Returns the most recently published articles for a keyword, ordered by
/// `published_at DESC` and capped at `limit`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_latest_articles(
    pool: &PgPool,
    keyword_id: Uuid,
    limit: i64,
) -> Result<Vec<MarketArticleRow>, DbError> {
    let rows = sqlx::query_as::<_, MarketArticleRow>(
        "SELECT id, keyword_id, title, source, excerpt, url, published_at, created_at \
         FROM market_articles \
         WHERE keyword_id = $1 \
         ORDER BY published_at DESC \
         LIMIT $2",
    )
    .bind(keyword_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
