//! The seam between orchestration and the external search-trends store.

use hometrends_db::{
    AiSummaryRow, CityInterestRow, DailyTrendRow, DbError, KeywordRow, MarketArticleRow,
    MonthlySummaryRow, RegionInterestRow, RelatedTopicRow, RisingQueryRow,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Read-only access to the collections the dashboard consumes.
///
/// The controller is generic over this trait so orchestration behavior can
/// be exercised against a deterministic in-memory store in tests. Every
/// method is a suspension point; implementations never mutate the store.
#[allow(async_fn_in_trait)]
pub trait TrendStore {
    async fn list_keywords(&self, categories: &[String]) -> Result<Vec<KeywordRow>, DbError>;

    async fn list_daily_trends(&self, keyword_ids: &[Uuid])
        -> Result<Vec<DailyTrendRow>, DbError>;

    async fn list_top_cities(
        &self,
        keyword_id: Uuid,
        state: &str,
        limit: i64,
    ) -> Result<Vec<CityInterestRow>, DbError>;

    async fn list_region_interest(
        &self,
        keyword_id: Uuid,
    ) -> Result<Vec<RegionInterestRow>, DbError>;

    async fn list_related_topics(
        &self,
        keyword_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RelatedTopicRow>, DbError>;

    async fn list_rising_queries(
        &self,
        keyword_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RisingQueryRow>, DbError>;

    async fn get_ai_summary(&self, keyword_id: Uuid) -> Result<Option<AiSummaryRow>, DbError>;

    async fn list_latest_articles(
        &self,
        keyword_id: Uuid,
        limit: i64,
    ) -> Result<Vec<MarketArticleRow>, DbError>;

    async fn list_monthly_summaries(&self, limit: i64) -> Result<Vec<MonthlySummaryRow>, DbError>;
}

/// Production [`TrendStore`] backed by the Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TrendStore for PgStore {
    async fn list_keywords(&self, categories: &[String]) -> Result<Vec<KeywordRow>, DbError> {
        hometrends_db::list_active_keywords(&self.pool, categories).await
    }

    async fn list_daily_trends(
        &self,
        keyword_ids: &[Uuid],
    ) -> Result<Vec<DailyTrendRow>, DbError> {
        hometrends_db::list_daily_trends(&self.pool, keyword_ids).await
    }

    async fn list_top_cities(
        &self,
        keyword_id: Uuid,
        state: &str,
        limit: i64,
    ) -> Result<Vec<CityInterestRow>, DbError> {
        hometrends_db::list_top_cities(&self.pool, keyword_id, state, limit).await
    }

    async fn list_region_interest(
        &self,
        keyword_id: Uuid,
    ) -> Result<Vec<RegionInterestRow>, DbError> {
        hometrends_db::list_region_interest(&self.pool, keyword_id).await
    }

    async fn list_related_topics(
        &self,
        keyword_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RelatedTopicRow>, DbError> {
        hometrends_db::list_related_topics(&self.pool, keyword_id, limit).await
    }

    async fn list_rising_queries(
        &self,
        keyword_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RisingQueryRow>, DbError> {
        hometrends_db::list_rising_queries(&self.pool, keyword_id, limit).await
    }

    async fn get_ai_summary(&self, keyword_id: Uuid) -> Result<Option<AiSummaryRow>, DbError> {
        hometrends_db::get_ai_summary(&self.pool, keyword_id).await
    }

    async fn list_latest_articles(
        &self,
        keyword_id: Uuid,
        limit: i64,
    ) -> Result<Vec<MarketArticleRow>, DbError> {
        hometrends_db::list_latest_articles(&self.pool, keyword_id, limit).await
    }

    async fn list_monthly_summaries(&self, limit: i64) -> Result<Vec<MonthlySummaryRow>, DbError> {
        hometrends_db::list_recent_monthly_summaries(&self.pool, limit).await
    }
}
