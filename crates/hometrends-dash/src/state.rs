//! Dashboard state and its pure reducer.
//!
//! The controller owns one [`DashboardState`] and mutates it exclusively
//! through [`DashboardState::apply`]; every transition commits a whole value
//! (or a whole map entry) so no partial update is ever observable.

use std::collections::HashMap;

use hometrends_core::TimeRange;
use hometrends_db::{KeywordRow, MonthlySummaryRow};

use crate::chart::ChartPoint;
use crate::detail::KeywordDetail;
use crate::status::FetchStatus;

/// How many of the top-ranked keywords are pinned (and pre-expanded) after
/// each keyword-list load.
pub const INITIAL_ACTIVE_COUNT: usize = 4;

/// The user's current filter selections. `categories` and `state` drive
/// queries once debounced; `time_range` is display state only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub categories: Vec<String>,
    pub state: String,
    pub time_range: TimeRange,
}

/// The whole dashboard, as the presentation layer sees it.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub filters: FilterState,
    pub keywords: Vec<KeywordRow>,
    pub active_keywords: Vec<String>,
    pub expanded: HashMap<String, bool>,
    pub chart: Vec<ChartPoint>,
    pub details: HashMap<String, KeywordDetail>,
    pub monthly_summaries: Vec<MonthlySummaryRow>,
    pub keywords_status: FetchStatus,
    pub chart_status: FetchStatus,
    pub summaries_status: FetchStatus,
    pub detail_status: HashMap<String, FetchStatus>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            state: String::new(),
            time_range: TimeRange::Days30,
        }
    }
}

/// A single committed state change. Fetch results arrive as `*Loaded` /
/// `*Failed` pairs; user interactions arrive as the remaining variants.
#[derive(Debug)]
pub enum Transition {
    KeywordsLoading,
    KeywordsLoaded(Vec<KeywordRow>),
    KeywordsFailed(String),
    ChartLoading,
    ChartLoaded(Vec<ChartPoint>),
    ChartFailed(String),
    ChartCleared,
    SummariesLoading,
    SummariesLoaded(Vec<MonthlySummaryRow>),
    SummariesFailed(String),
    DetailLoading(String),
    DetailLoaded(String, Box<KeywordDetail>),
    DetailFailed(String, String),
    DetailsPurged,
    CategoryToggled(String),
    StateSelected(String),
    TimeRangeSelected(TimeRange),
    KeywordAdded(String),
    KeywordRemoved(String),
    SectionToggled(String),
}

impl DashboardState {
    #[must_use]
    pub fn new(filters: FilterState) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Resolve a keyword name against the loaded list.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&KeywordRow> {
        self.keywords.iter().find(|k| k.name == name)
    }

    /// The loaded keyword rows currently pinned to the dashboard, in loaded
    /// (score-descending) order.
    #[must_use]
    pub fn active_keyword_rows(&self) -> Vec<&KeywordRow> {
        self.keywords
            .iter()
            .filter(|k| self.active_keywords.iter().any(|name| *name == k.name))
            .collect()
    }

    #[must_use]
    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.get(name).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn detail_status(&self, name: &str) -> &FetchStatus {
        self.detail_status.get(name).unwrap_or(&FetchStatus::Idle)
    }

    /// Apply one transition. Pure state mutation — fetch scheduling lives in
    /// the controller.
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::KeywordsLoading => self.keywords_status = FetchStatus::Loading,
            Transition::KeywordsLoaded(rows) => {
                self.keywords_status = FetchStatus::Ready;
                self.active_keywords = rows
                    .iter()
                    .take(INITIAL_ACTIVE_COUNT)
                    .map(|k| k.name.clone())
                    .collect();
                self.expanded = self
                    .active_keywords
                    .iter()
                    .map(|name| (name.clone(), true))
                    .collect();
                self.keywords = rows;
            }
            Transition::KeywordsFailed(message) => {
                // The list is cleared; the active set and expansion flags are
                // deliberately left from the prior fetch (see DESIGN.md).
                self.keywords_status = FetchStatus::Failed(message);
                self.keywords = Vec::new();
            }
            Transition::ChartLoading => self.chart_status = FetchStatus::Loading,
            Transition::ChartLoaded(points) => {
                self.chart_status = FetchStatus::Ready;
                self.chart = points;
            }
            Transition::ChartFailed(message) => {
                self.chart_status = FetchStatus::Failed(message);
                self.chart = Vec::new();
            }
            Transition::ChartCleared => {
                self.chart_status = FetchStatus::Idle;
                self.chart = Vec::new();
            }
            Transition::SummariesLoading => self.summaries_status = FetchStatus::Loading,
            Transition::SummariesLoaded(rows) => {
                self.summaries_status = FetchStatus::Ready;
                self.monthly_summaries = rows;
            }
            Transition::SummariesFailed(message) => {
                self.summaries_status = FetchStatus::Failed(message);
                self.monthly_summaries = Vec::new();
            }
            Transition::DetailLoading(name) => {
                self.detail_status.insert(name, FetchStatus::Loading);
            }
            Transition::DetailLoaded(name, detail) => {
                self.details.insert(name.clone(), *detail);
                self.detail_status.insert(name, FetchStatus::Ready);
            }
            Transition::DetailFailed(name, message) => {
                // A previously committed record for this keyword survives;
                // only the status flips to the error.
                self.detail_status.insert(name, FetchStatus::Failed(message));
            }
            Transition::DetailsPurged => self.details.clear(),
            Transition::CategoryToggled(label) => {
                if let Some(index) = self.filters.categories.iter().position(|c| *c == label) {
                    // At least one category stays selected.
                    if self.filters.categories.len() > 1 {
                        self.filters.categories.remove(index);
                    }
                } else {
                    self.filters.categories.push(label);
                }
            }
            Transition::StateSelected(code) => self.filters.state = code,
            Transition::TimeRangeSelected(range) => self.filters.time_range = range,
            Transition::KeywordAdded(name) => {
                if !self.active_keywords.contains(&name) {
                    self.active_keywords.push(name);
                }
            }
            Transition::KeywordRemoved(name) => {
                self.active_keywords.retain(|k| *k != name);
                self.expanded.remove(&name);
                // The detail record stays; it is simply unused until re-add.
            }
            Transition::SectionToggled(name) => {
                let flag = self.expanded.entry(name).or_insert(false);
                *flag = !*flag;
            }
        }
    }
}
