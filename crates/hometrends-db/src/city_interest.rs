//! Database operations for the `city_keyword_interest` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A `city_keyword_interest` row joined with its city's display fields.
///
/// `rank` is a positive integer; 1 is the strongest city for the keyword.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CityInterestRow {
    pub id: Uuid,
    pub keyword_id: Uuid,
    pub interest_score: i32,
    pub trend_percentage: Decimal,
    pub rank: i32,
    pub city_name: String,
    pub city_state: String,
    pub city_full_name: String,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the strongest cities for a keyword within one state, ordered by
/// `rank ASC` and capped at `limit`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_top_cities(
    pool: &PgPool,
    keyword_id: Uuid,
    state: &str,
    limit: i64,
) -> Result<Vec<CityInterestRow>, DbError> {
    let rows = sqlx::query_as::<_, CityInterestRow>(
        "SELECT cki.id, cki.keyword_id, cki.interest_score, cki.trend_percentage, \
                cki.rank, c.name AS city_name, c.state AS city_state, \
                c.full_name AS city_full_name, cki.updated_at \
         FROM city_keyword_interest cki \
         JOIN cities c ON c.id = cki.city_id \
         WHERE cki.keyword_id = $1 AND c.state = $2 \
         ORDER BY cki.rank ASC \
         LIMIT $3",
    )
    .bind(keyword_id)
    .bind(state)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
