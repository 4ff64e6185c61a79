//! Reshapes per-day, per-keyword trend rows into chart-friendly points.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use hometrends_db::{DailyTrendRow, KeywordRow};
use uuid::Uuid;

/// One chart row: a date plus one score per active keyword that has a trend
/// row for that date. Sparse by design — a keyword with no row for a date
/// simply has no entry, never a zero fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub scores: BTreeMap<String, i32>,
}

/// Resolve the active keyword names against the loaded keyword list.
///
/// Returns the matching ids (for the trend query) alongside an id → name
/// map (for labeling the resulting points). Names that do not resolve are
/// skipped.
#[must_use]
pub fn active_keyword_ids(
    keywords: &[KeywordRow],
    active: &[String],
) -> (Vec<Uuid>, HashMap<Uuid, String>) {
    let mut ids = Vec::new();
    let mut names_by_id = HashMap::new();
    for keyword in keywords {
        if active.iter().any(|name| *name == keyword.name) {
            ids.push(keyword.id);
            names_by_id.insert(keyword.id, keyword.name.clone());
        }
    }
    (ids, names_by_id)
}

/// Group trend rows by date into one [`ChartPoint`] per distinct date, in
/// ascending date order. Rows referencing an id absent from `names_by_id`
/// (orphans) are silently dropped.
#[must_use]
pub fn build_chart_points(
    names_by_id: &HashMap<Uuid, String>,
    rows: &[DailyTrendRow],
) -> Vec<ChartPoint> {
    let mut grouped: BTreeMap<NaiveDate, BTreeMap<String, i32>> = BTreeMap::new();

    for row in rows {
        let Some(name) = names_by_id.get(&row.keyword_id) else {
            continue;
        };
        grouped
            .entry(row.date)
            .or_default()
            .insert(name.clone(), row.interest_score);
    }

    grouped
        .into_iter()
        .map(|(date, scores)| ChartPoint { date, scores })
        .collect()
}
