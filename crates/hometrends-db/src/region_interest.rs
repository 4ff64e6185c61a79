//! Database operations for the `region_keyword_interest` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A `region_keyword_interest` row joined with its region's display fields.
///
/// `intensity_level` is the store's free-text bucket; map it through
/// `hometrends_core::IntensityLevel::parse` for display.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegionInterestRow {
    pub id: Uuid,
    pub keyword_id: Uuid,
    pub interest_score: i32,
    pub intensity_level: String,
    pub region_name: String,
    pub parent_region: Option<String>,
    pub region_type: String,
    pub updated_at: DateTime<Utc>,
}

/// Returns every region-interest row for a keyword, joined with region
/// display fields, ordered by `interest_score DESC`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_region_interest(
    pool: &PgPool,
    keyword_id: Uuid,
) -> Result<Vec<RegionInterestRow>, DbError> {
    let rows = sqlx::query_as::<_, RegionInterestRow>(
        "SELECT rki.id, rki.keyword_id, rki.interest_score, rki.intensity_level, \
                r.name AS region_name, r.parent_region, r.region_type, rki.updated_at \
         FROM region_keyword_interest rki \
         JOIN regions r ON r.id = rki.region_id \
         WHERE rki.keyword_id = $1 \
         ORDER BY rki.interest_score DESC",
    )
    .bind(keyword_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
