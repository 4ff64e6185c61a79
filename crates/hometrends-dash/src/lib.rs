//! Orchestration core for the hometrends dashboard.
//!
//! Owns the in-memory dashboard state and drives every fetch against the
//! external search-trends store: debounced filter changes, keyword list
//! loads, chart reshaping, per-keyword detail fan-out, and monthly
//! leaderboards. The [`controller::DashboardController`] is a single
//! cooperative task; all state mutation goes through the pure reducer in
//! [`state`].

pub mod chart;
pub mod controller;
pub mod debounce;
pub mod detail;
pub mod state;
pub mod status;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use chart::{build_chart_points, ChartPoint};
pub use controller::DashboardController;
pub use debounce::Debouncer;
pub use detail::KeywordDetail;
pub use state::{DashboardState, FilterState, Transition};
pub use status::FetchStatus;
pub use store::{PgStore, TrendStore};
