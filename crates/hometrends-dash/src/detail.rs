//! Per-keyword detail batch: six store queries joined into one record.

use hometrends_db::{
    AiSummaryRow, CityInterestRow, DbError, MarketArticleRow, RegionInterestRow, RelatedTopicRow,
    RisingQueryRow,
};
use uuid::Uuid;

use crate::store::TrendStore;

pub const CITY_LIMIT: i64 = 10;
pub const TOPIC_LIMIT: i64 = 5;
pub const RISING_QUERY_LIMIT: i64 = 5;
pub const ARTICLE_LIMIT: i64 = 3;

/// Everything the dashboard shows for one expanded keyword. City and region
/// rows are scoped to the state filter the batch was fetched under.
#[derive(Debug, Clone, Default)]
pub struct KeywordDetail {
    pub cities: Vec<CityInterestRow>,
    pub regions: Vec<RegionInterestRow>,
    pub topics: Vec<RelatedTopicRow>,
    pub rising_queries: Vec<RisingQueryRow>,
    pub ai_summary: Option<AiSummaryRow>,
    pub articles: Vec<MarketArticleRow>,
}

impl KeywordDetail {
    /// True when every section came back empty — rendered as a distinct
    /// empty state, not an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
            && self.regions.is_empty()
            && self.topics.is_empty()
            && self.rising_queries.is_empty()
            && self.ai_summary.is_none()
            && self.articles.is_empty()
    }
}

/// Fetch all six detail sections for one keyword concurrently.
///
/// The batch is all-or-nothing: the record is assembled only after every
/// query resolves, and the first failure aborts the whole batch.
///
/// # Errors
///
/// Returns the first [`DbError`] any of the six queries produced.
pub async fn fetch_keyword_detail<S: TrendStore>(
    store: &S,
    keyword_id: Uuid,
    state: &str,
) -> Result<KeywordDetail, DbError> {
    let (cities, regions, topics, rising_queries, ai_summary, articles) = tokio::try_join!(
        store.list_top_cities(keyword_id, state, CITY_LIMIT),
        store.list_region_interest(keyword_id),
        store.list_related_topics(keyword_id, TOPIC_LIMIT),
        store.list_rising_queries(keyword_id, RISING_QUERY_LIMIT),
        store.get_ai_summary(keyword_id),
        store.list_latest_articles(keyword_id, ARTICLE_LIMIT),
    )?;

    Ok(KeywordDetail {
        cities,
        regions,
        topics,
        rising_queries,
        ai_summary,
        articles,
    })
}
