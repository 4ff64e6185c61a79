//! Deterministic in-memory [`TrendStore`] and row builders for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Utc;
use hometrends_db::{
    AiSummaryRow, CityInterestRow, DailyTrendRow, DbError, KeywordRow, MarketArticleRow,
    MonthlySummaryRow, RegionInterestRow, RelatedTopicRow, RisingQueryRow, TopKeywordEntry,
};
use rust_decimal::Decimal;
use sqlx::types::Json;
use tokio::time::Duration;
use uuid::Uuid;

use crate::store::TrendStore;

// ---------------------------------------------------------------------------
// Row builders
// ---------------------------------------------------------------------------

pub(crate) fn keyword(name: &str, category: &str, interest_score: i32) -> KeywordRow {
    KeywordRow {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: category.to_string(),
        interest_score,
        trend_percentage: Decimal::ZERO,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn trend(keyword_id: Uuid, date: &str, interest_score: i32) -> DailyTrendRow {
    DailyTrendRow {
        id: Uuid::new_v4(),
        keyword_id,
        date: date.parse().expect("valid date"),
        interest_score,
        created_at: Utc::now(),
    }
}

pub(crate) fn city_row(keyword_id: Uuid, name: &str, state: &str, rank: i32) -> CityInterestRow {
    CityInterestRow {
        id: Uuid::new_v4(),
        keyword_id,
        interest_score: 80,
        trend_percentage: Decimal::ZERO,
        rank,
        city_name: name.to_string(),
        city_state: state.to_string(),
        city_full_name: format!("{name}, {state}"),
        updated_at: Utc::now(),
    }
}

fn region_row(keyword_id: Uuid, name: &str, intensity: &str) -> RegionInterestRow {
    RegionInterestRow {
        id: Uuid::new_v4(),
        keyword_id,
        interest_score: 70,
        intensity_level: intensity.to_string(),
        region_name: name.to_string(),
        parent_region: None,
        region_type: "metro".to_string(),
        updated_at: Utc::now(),
    }
}

fn topic_row(keyword_id: Uuid, name: &str, growth: i32, breakout: bool) -> RelatedTopicRow {
    RelatedTopicRow {
        id: Uuid::new_v4(),
        keyword_id,
        topic_name: name.to_string(),
        growth_percentage: Decimal::from(growth),
        is_breakout: breakout,
        created_at: Utc::now(),
    }
}

fn rising_row(keyword_id: Uuid, text: &str, growth: i32) -> RisingQueryRow {
    RisingQueryRow {
        id: Uuid::new_v4(),
        keyword_id,
        query_text: text.to_string(),
        growth_percentage: Decimal::from(growth),
        created_at: Utc::now(),
    }
}

fn summary_row(keyword_id: Uuid, text: &str) -> AiSummaryRow {
    AiSummaryRow {
        id: Uuid::new_v4(),
        keyword_id,
        summary_text: text.to_string(),
        generated_at: Utc::now(),
    }
}

fn article_row(keyword_id: Uuid, title: &str) -> MarketArticleRow {
    MarketArticleRow {
        id: Uuid::new_v4(),
        keyword_id: Some(keyword_id),
        title: title.to_string(),
        source: "Market Wire".to_string(),
        excerpt: None,
        url: None,
        published_at: Utc::now(),
        created_at: Utc::now(),
    }
}

pub(crate) fn monthly(month: &str, entries: &[(&str, i32, i32)]) -> MonthlySummaryRow {
    MonthlySummaryRow {
        id: Uuid::new_v4(),
        month: month.parse().expect("valid date"),
        top_keywords: Json(
            entries
                .iter()
                .map(|(kw, score, rank)| TopKeywordEntry {
                    keyword: (*kw).to_string(),
                    score: *score,
                    rank: *rank,
                })
                .collect(),
        ),
        created_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Fake store
// ---------------------------------------------------------------------------

fn store_error() -> DbError {
    DbError::Sqlx(sqlx::Error::PoolClosed)
}

#[derive(Default)]
struct Inner {
    keywords: Vec<KeywordRow>,
    trends: Vec<DailyTrendRow>,
    cities: Vec<CityInterestRow>,
    regions: HashMap<Uuid, Vec<RegionInterestRow>>,
    topics: HashMap<Uuid, Vec<RelatedTopicRow>>,
    rising: HashMap<Uuid, Vec<RisingQueryRow>>,
    summaries: HashMap<Uuid, AiSummaryRow>,
    articles: HashMap<Uuid, Vec<MarketArticleRow>>,
    monthly: Vec<MonthlySummaryRow>,
    fail_keywords: bool,
    fail_trends: bool,
    fail_topics: bool,
    fail_monthly: bool,
    keyword_calls: Vec<Vec<String>>,
    trend_calls: usize,
    city_calls: Vec<(Uuid, String)>,
    monthly_calls: usize,
    city_delays: HashMap<String, Duration>,
    monthly_delay: Option<Duration>,
    keywords_delay_once: Option<Duration>,
}

/// In-memory [`TrendStore`] with call recording, failure injection, and
/// per-state response delays (for exercising stale-write discard under the
/// paused tokio clock).
#[derive(Clone, Default)]
pub(crate) struct FakeStore {
    inner: Rc<RefCell<Inner>>,
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_trend(&self, row: DailyTrendRow) {
        self.inner.borrow_mut().trends.push(row);
    }

    pub(crate) fn add_city(&self, row: CityInterestRow) {
        self.inner.borrow_mut().cities.push(row);
    }

    pub(crate) fn set_monthly(&self, rows: Vec<MonthlySummaryRow>) {
        self.inner.borrow_mut().monthly = rows;
    }

    /// Register a keyword along with one row in every detail section, with
    /// city data scoped to `state`.
    pub(crate) fn add_keyword_with_detail(&self, kw: &KeywordRow, state: &str) {
        let mut inner = self.inner.borrow_mut();
        if !inner.keywords.iter().any(|k| k.id == kw.id) {
            inner.keywords.push(kw.clone());
        }
        inner.cities.push(city_row(kw.id, "Austin", state, 1));
        inner
            .regions
            .entry(kw.id)
            .or_default()
            .push(region_row(kw.id, "Central Corridor", "High"));
        inner
            .topics
            .entry(kw.id)
            .or_default()
            .push(topic_row(kw.id, "school districts", 120, true));
        inner
            .rising
            .entry(kw.id)
            .or_default()
            .push(rising_row(kw.id, "homes near transit", 95));
        inner
            .summaries
            .insert(kw.id, summary_row(kw.id, "Interest keeps climbing.\n\nSuburbs lead."));
        inner
            .articles
            .entry(kw.id)
            .or_default()
            .push(article_row(kw.id, "Market heats up"));
    }

    pub(crate) fn fail_keywords(&self, fail: bool) {
        self.inner.borrow_mut().fail_keywords = fail;
    }

    pub(crate) fn fail_trends(&self, fail: bool) {
        self.inner.borrow_mut().fail_trends = fail;
    }

    pub(crate) fn fail_related_topics(&self, fail: bool) {
        self.inner.borrow_mut().fail_topics = fail;
    }

    pub(crate) fn fail_monthly(&self, fail: bool) {
        self.inner.borrow_mut().fail_monthly = fail;
    }

    /// Delay city queries issued for the given state.
    pub(crate) fn delay_cities(&self, state: &str, delay: Duration) {
        self.inner
            .borrow_mut()
            .city_delays
            .insert(state.to_string(), delay);
    }

    pub(crate) fn delay_monthly(&self, delay: Duration) {
        self.inner.borrow_mut().monthly_delay = Some(delay);
    }

    /// Delay only the next keyword-list call; later calls answer promptly.
    pub(crate) fn delay_keywords_once(&self, delay: Duration) {
        self.inner.borrow_mut().keywords_delay_once = Some(delay);
    }

    pub(crate) fn keyword_calls(&self) -> Vec<Vec<String>> {
        self.inner.borrow().keyword_calls.clone()
    }

    pub(crate) fn trend_calls(&self) -> usize {
        self.inner.borrow().trend_calls
    }

    pub(crate) fn city_calls(&self) -> Vec<(Uuid, String)> {
        self.inner.borrow().city_calls.clone()
    }

    pub(crate) fn monthly_calls(&self) -> usize {
        self.inner.borrow().monthly_calls
    }
}

impl TrendStore for FakeStore {
    async fn list_keywords(&self, categories: &[String]) -> Result<Vec<KeywordRow>, DbError> {
        let (fail, delay, mut rows) = {
            let mut inner = self.inner.borrow_mut();
            inner.keyword_calls.push(categories.to_vec());
            (
                inner.fail_keywords,
                inner.keywords_delay_once.take(),
                inner.keywords.clone(),
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(store_error());
        }
        rows.retain(|k| k.is_active && (categories.is_empty() || categories.contains(&k.category)));
        rows.sort_by(|a, b| {
            b.interest_score
                .cmp(&a.interest_score)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(rows)
    }

    async fn list_daily_trends(
        &self,
        keyword_ids: &[Uuid],
    ) -> Result<Vec<DailyTrendRow>, DbError> {
        let (fail, mut rows) = {
            let mut inner = self.inner.borrow_mut();
            inner.trend_calls += 1;
            (inner.fail_trends, inner.trends.clone())
        };
        if fail {
            return Err(store_error());
        }
        rows.retain(|t| keyword_ids.contains(&t.keyword_id));
        rows.sort_by_key(|t| t.date);
        Ok(rows)
    }

    async fn list_top_cities(
        &self,
        keyword_id: Uuid,
        state: &str,
        limit: i64,
    ) -> Result<Vec<CityInterestRow>, DbError> {
        let (delay, mut rows) = {
            let mut inner = self.inner.borrow_mut();
            inner.city_calls.push((keyword_id, state.to_string()));
            (
                inner.city_delays.get(state).copied(),
                inner.cities.clone(),
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        rows.retain(|c| c.keyword_id == keyword_id && c.city_state == state);
        rows.sort_by_key(|c| c.rank);
        rows.truncate(usize::try_from(limit).expect("small limit"));
        Ok(rows)
    }

    async fn list_region_interest(
        &self,
        keyword_id: Uuid,
    ) -> Result<Vec<RegionInterestRow>, DbError> {
        Ok(self
            .inner
            .borrow()
            .regions
            .get(&keyword_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_related_topics(
        &self,
        keyword_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RelatedTopicRow>, DbError> {
        let (fail, mut rows) = {
            let inner = self.inner.borrow();
            (
                inner.fail_topics,
                inner.topics.get(&keyword_id).cloned().unwrap_or_default(),
            )
        };
        if fail {
            return Err(store_error());
        }
        rows.sort_by(|a, b| b.growth_percentage.cmp(&a.growth_percentage));
        rows.truncate(usize::try_from(limit).expect("small limit"));
        Ok(rows)
    }

    async fn list_rising_queries(
        &self,
        keyword_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RisingQueryRow>, DbError> {
        let mut rows = self
            .inner
            .borrow()
            .rising
            .get(&keyword_id)
            .cloned()
            .unwrap_or_default();
        rows.sort_by(|a, b| b.growth_percentage.cmp(&a.growth_percentage));
        rows.truncate(usize::try_from(limit).expect("small limit"));
        Ok(rows)
    }

    async fn get_ai_summary(&self, keyword_id: Uuid) -> Result<Option<AiSummaryRow>, DbError> {
        Ok(self.inner.borrow().summaries.get(&keyword_id).cloned())
    }

    async fn list_latest_articles(
        &self,
        keyword_id: Uuid,
        limit: i64,
    ) -> Result<Vec<MarketArticleRow>, DbError> {
        let mut rows = self
            .inner
            .borrow()
            .articles
            .get(&keyword_id)
            .cloned()
            .unwrap_or_default();
        rows.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        rows.truncate(usize::try_from(limit).expect("small limit"));
        Ok(rows)
    }

    async fn list_monthly_summaries(&self, limit: i64) -> Result<Vec<MonthlySummaryRow>, DbError> {
        let (fail, delay, mut rows) = {
            let mut inner = self.inner.borrow_mut();
            inner.monthly_calls += 1;
            (inner.fail_monthly, inner.monthly_delay, inner.monthly.clone())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(store_error());
        }
        rows.sort_by(|a, b| b.month.cmp(&a.month));
        rows.truncate(usize::try_from(limit).expect("small limit"));
        Ok(rows)
    }
}
