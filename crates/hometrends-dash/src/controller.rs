//! The dashboard controller: a single cooperative task that owns the state,
//! debounces filter input, and fans fetches out against the store.
//!
//! Fetch futures are multiplexed through a [`FuturesUnordered`]; completions
//! and debounce deadlines are raced with `tokio::select!`. Every
//! filter-scoped fetch is tagged with the epoch of the filter it depends on
//! (category epoch for the keyword list, state epoch for detail batches, a
//! sequence number for chart recomputes), and a completion carrying an older
//! tag is discarded — a superseded response can never overwrite state
//! fetched for newer filters.

use std::collections::HashMap;

use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tokio::time::{sleep_until, Duration, Instant};

use hometrends_core::TimeRange;
use hometrends_db::{DbError, KeywordRow, MonthlySummaryRow};

use crate::chart::{self, ChartPoint};
use crate::debounce::Debouncer;
use crate::detail::{self, KeywordDetail};
use crate::state::{DashboardState, FilterState, Transition};
use crate::store::TrendStore;

pub const MONTHLY_SUMMARY_LIMIT: i64 = 3;

const KEYWORDS_ERROR: &str = "Failed to load keywords. Please try again.";
const CHART_ERROR: &str = "Failed to load chart data. Please try again.";
const SUMMARIES_ERROR: &str = "Failed to load monthly summaries.";
const DETAIL_ERROR: &str = "Failed to load details for this keyword.";

/// A fetch completion, tagged with the epoch of the filter it was issued
/// under. Monthly summaries carry no tag — no filter change invalidates them.
enum FetchOutcome {
    Keywords {
        epoch: u64,
        result: Result<Vec<KeywordRow>, DbError>,
    },
    Chart {
        seq: u64,
        result: Result<Vec<ChartPoint>, DbError>,
    },
    Summaries(Result<Vec<MonthlySummaryRow>, DbError>),
    Detail {
        keyword: String,
        epoch: u64,
        result: Result<KeywordDetail, DbError>,
    },
}

pub struct DashboardController<S> {
    store: S,
    state: DashboardState,
    category_debounce: Debouncer<Vec<String>>,
    state_debounce: Debouncer<String>,
    /// Last settled filter values — what in-flight queries were issued with.
    settled_categories: Vec<String>,
    settled_state: String,
    /// Bumped when the category selection settles; tags keyword-list fetches.
    category_epoch: u64,
    /// Bumped when the state selection settles; tags detail batches.
    state_epoch: u64,
    /// Bumped on every chart recompute or clear; an arriving chart result
    /// with an older sequence was superseded and is discarded.
    chart_seq: u64,
    inflight: FuturesUnordered<LocalBoxFuture<'static, FetchOutcome>>,
    /// Keyword name → state epoch of its in-flight detail batch, used to
    /// suppress duplicate issuance under the same filters.
    inflight_details: HashMap<String, u64>,
}

impl<S: TrendStore + Clone + 'static> DashboardController<S> {
    #[must_use]
    pub fn new(store: S, filters: FilterState, settle: Duration) -> Self {
        let settled_categories = filters.categories.clone();
        let settled_state = filters.state.clone();
        Self {
            store,
            state: DashboardState::new(filters),
            category_debounce: Debouncer::new(settle),
            state_debounce: Debouncer::new(settle),
            settled_categories,
            settled_state,
            category_epoch: 0,
            state_epoch: 0,
            chart_seq: 0,
            inflight: FuturesUnordered::new(),
            inflight_details: HashMap::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Issue the startup fetches: the keyword list for the initial filters
    /// and the monthly leaderboards (fetched once, never filter-driven).
    pub fn bootstrap(&mut self) {
        self.spawn_keywords_fetch();
        self.spawn_summaries_fetch();
    }

    // -----------------------------------------------------------------------
    // User operations
    // -----------------------------------------------------------------------

    /// Toggle a category in the selection. Removing the last remaining
    /// category is a no-op; the selection never becomes empty.
    pub fn toggle_category(&mut self, label: &str) {
        let before = self.state.filters.categories.clone();
        self.state
            .apply(Transition::CategoryToggled(label.to_string()));
        if self.state.filters.categories == before {
            tracing::debug!(category = label, "last selected category kept");
        } else {
            self.category_debounce
                .push(self.state.filters.categories.clone());
        }
    }

    pub fn select_state(&mut self, code: &str) {
        if self.state.filters.state == code {
            return;
        }
        self.state.apply(Transition::StateSelected(code.to_string()));
        self.state_debounce.push(code.to_string());
    }

    pub fn select_time_range(&mut self, range: TimeRange) {
        self.state.apply(Transition::TimeRangeSelected(range));
    }

    /// Pin a keyword to the dashboard. The name must resolve against the
    /// loaded list; re-adding a previously removed keyword refetches its
    /// details so state-scoped data is never reused stale.
    pub fn add_keyword(&mut self, name: &str) {
        if self.state.resolve(name).is_none() {
            tracing::warn!(keyword = name, "keyword not in loaded list; not adding");
            return;
        }
        if self.state.active_keywords.iter().any(|k| k == name) {
            return;
        }
        self.state.apply(Transition::KeywordAdded(name.to_string()));
        self.spawn_chart_fetch();
        self.spawn_detail_fetch(name);
    }

    pub fn remove_keyword(&mut self, name: &str) {
        if !self.state.active_keywords.iter().any(|k| k == name) {
            return;
        }
        self.state.apply(Transition::KeywordRemoved(name.to_string()));
        self.spawn_chart_fetch();
    }

    /// Flip a keyword's expansion flag. Expanding a keyword with no detail
    /// record triggers exactly one fetch; an in-flight batch is never
    /// duplicated.
    pub fn toggle_section(&mut self, name: &str) {
        self.state.apply(Transition::SectionToggled(name.to_string()));
        if self.state.is_expanded(name) && !self.state.details.contains_key(name) {
            self.spawn_detail_fetch(name);
        }
    }

    // -----------------------------------------------------------------------
    // Retry affordances — re-invoke the same fetch with the same inputs
    // -----------------------------------------------------------------------

    pub fn retry_keywords(&mut self) {
        self.spawn_keywords_fetch();
    }

    pub fn retry_chart(&mut self) {
        self.spawn_chart_fetch();
    }

    pub fn retry_summaries(&mut self) {
        self.spawn_summaries_fetch();
    }

    pub fn retry_detail(&mut self, name: &str) {
        self.spawn_detail_fetch(name);
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.inflight.is_empty()
            || self.category_debounce.is_pending()
            || self.state_debounce.is_pending()
    }

    /// Drive the loop until no fetch is in flight and no debounce is
    /// pending. The state is quiescent for the current filters afterwards.
    pub async fn run_until_idle(&mut self) {
        while self.has_pending_work() {
            self.tick().await;
        }
    }

    /// Wait for the next event — a fetch completion or a debounce deadline —
    /// and apply it.
    async fn tick(&mut self) {
        let deadline = self.next_deadline();
        tokio::select! {
            // An empty stream yields `None` immediately, disabling the branch.
            Some(outcome) = self.inflight.next() => {
                self.apply_outcome(outcome);
            }
            () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                self.flush_settled();
            }
            else => {}
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        match (
            self.category_debounce.deadline(),
            self.state_debounce.deadline(),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    fn flush_settled(&mut self) {
        let now = Instant::now();

        if let Some(categories) = self.category_debounce.take_settled(now) {
            self.category_epoch += 1;
            self.settled_categories = categories;
            tracing::debug!(epoch = self.category_epoch, "category selection settled");
            self.spawn_keywords_fetch();
        }

        if let Some(state_code) = self.state_debounce.take_settled(now) {
            self.state_epoch += 1;
            self.settled_state = state_code;
            tracing::debug!(
                epoch = self.state_epoch,
                state = %self.settled_state,
                "state selection settled"
            );
            // City and region data is scoped to the state; every record is
            // stale under the new one and goes before the refetch is issued.
            self.state.apply(Transition::DetailsPurged);
            self.spawn_chart_fetch();
            self.spawn_active_detail_fetches();
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Keywords { epoch, result } => {
                if epoch != self.category_epoch {
                    tracing::debug!(
                        issued = epoch,
                        current = self.category_epoch,
                        "dropping stale keyword list"
                    );
                    return;
                }
                match result {
                    Ok(rows) => {
                        tracing::info!(count = rows.len(), "keywords loaded");
                        self.state.apply(Transition::KeywordsLoaded(rows));
                        self.spawn_chart_fetch();
                        self.spawn_active_detail_fetches();
                    }
                    Err(error) => {
                        tracing::error!(error = %error, "keyword fetch failed");
                        self.state
                            .apply(Transition::KeywordsFailed(KEYWORDS_ERROR.to_string()));
                        self.clear_chart();
                    }
                }
            }
            FetchOutcome::Chart { seq, result } => {
                if seq != self.chart_seq {
                    tracing::debug!(
                        issued = seq,
                        current = self.chart_seq,
                        "dropping superseded chart result"
                    );
                    return;
                }
                match result {
                    Ok(points) => self.state.apply(Transition::ChartLoaded(points)),
                    Err(error) => {
                        tracing::error!(error = %error, "chart fetch failed");
                        self.state
                            .apply(Transition::ChartFailed(CHART_ERROR.to_string()));
                    }
                }
            }
            FetchOutcome::Summaries(Ok(rows)) => {
                tracing::info!(count = rows.len(), "monthly summaries loaded");
                self.state.apply(Transition::SummariesLoaded(rows));
            }
            FetchOutcome::Summaries(Err(error)) => {
                tracing::error!(error = %error, "monthly summary fetch failed");
                self.state
                    .apply(Transition::SummariesFailed(SUMMARIES_ERROR.to_string()));
            }
            FetchOutcome::Detail {
                keyword,
                epoch,
                result,
            } => {
                if self.inflight_details.get(&keyword) == Some(&epoch) {
                    self.inflight_details.remove(&keyword);
                }
                if epoch != self.state_epoch {
                    tracing::debug!(
                        keyword = %keyword,
                        issued = epoch,
                        current = self.state_epoch,
                        "dropping stale detail batch"
                    );
                    return;
                }
                match result {
                    Ok(detail_record) => {
                        tracing::debug!(keyword = %keyword, "keyword detail loaded");
                        self.state
                            .apply(Transition::DetailLoaded(keyword, Box::new(detail_record)));
                    }
                    Err(error) => {
                        tracing::error!(keyword = %keyword, error = %error, "keyword detail fetch failed");
                        self.state
                            .apply(Transition::DetailFailed(keyword, DETAIL_ERROR.to_string()));
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Fetch spawning
    // -----------------------------------------------------------------------

    fn spawn_keywords_fetch(&mut self) {
        self.state.apply(Transition::KeywordsLoading);
        let store = self.store.clone();
        let categories = self.settled_categories.clone();
        let epoch = self.category_epoch;
        self.inflight.push(
            async move {
                FetchOutcome::Keywords {
                    epoch,
                    result: store.list_keywords(&categories).await,
                }
            }
            .boxed_local(),
        );
    }

    fn spawn_summaries_fetch(&mut self) {
        self.state.apply(Transition::SummariesLoading);
        let store = self.store.clone();
        self.inflight.push(
            async move {
                FetchOutcome::Summaries(store.list_monthly_summaries(MONTHLY_SUMMARY_LIMIT).await)
            }
            .boxed_local(),
        );
    }

    /// Recompute the chart in full for the current active set. An empty
    /// active set clears the chart without touching the store.
    fn spawn_chart_fetch(&mut self) {
        let (ids, names_by_id) =
            chart::active_keyword_ids(&self.state.keywords, &self.state.active_keywords);
        if ids.is_empty() {
            self.clear_chart();
            return;
        }
        self.chart_seq += 1;
        self.state.apply(Transition::ChartLoading);
        let store = self.store.clone();
        let seq = self.chart_seq;
        self.inflight.push(
            async move {
                let result = store
                    .list_daily_trends(&ids)
                    .await
                    .map(|rows| chart::build_chart_points(&names_by_id, &rows));
                FetchOutcome::Chart { seq, result }
            }
            .boxed_local(),
        );
    }

    /// Empty the chart and invalidate any chart fetch still in flight.
    fn clear_chart(&mut self) {
        self.chart_seq += 1;
        self.state.apply(Transition::ChartCleared);
    }

    fn spawn_active_detail_fetches(&mut self) {
        for name in self.state.active_keywords.clone() {
            self.spawn_detail_fetch(&name);
        }
    }

    fn spawn_detail_fetch(&mut self, name: &str) {
        let Some(keyword) = self.state.resolve(name) else {
            tracing::warn!(keyword = name, "keyword not in loaded list; skipping detail fetch");
            return;
        };
        let keyword_id = keyword.id;

        if self.inflight_details.get(name) == Some(&self.state_epoch) {
            return;
        }
        self.inflight_details
            .insert(name.to_string(), self.state_epoch);
        self.state.apply(Transition::DetailLoading(name.to_string()));

        let store = self.store.clone();
        let state_code = self.settled_state.clone();
        let epoch = self.state_epoch;
        let name = name.to_string();
        self.inflight.push(
            async move {
                let result = detail::fetch_keyword_detail(&store, keyword_id, &state_code).await;
                FetchOutcome::Detail {
                    keyword: name,
                    epoch,
                    result,
                }
            }
            .boxed_local(),
        );
    }
}
