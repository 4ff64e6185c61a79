//! Stateless text rendering of the dashboard state.
//!
//! Every function here is a pure view: state in, text out. Loading states
//! render placeholder lines, errors render the scoped message plus a retry
//! hint, and empty results render a distinct empty-state line.

use std::fmt::Write as _;

use hometrends_core::IntensityLevel;
use hometrends_dash::{DashboardState, FetchStatus, KeywordDetail};
use hometrends_db::{KeywordRow, MonthlySummaryRow};
use rust_decimal::Decimal;

const BANNER: &str =
    "Note: this dashboard displays historical sample data. Real-time integration launching Q4 2025.";

/// Render the whole dashboard snapshot.
#[must_use]
pub fn render_dashboard(state: &DashboardState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(
        out,
        "Filters: {} | State: {} | Range: {}",
        state.filters.categories.join(", "),
        state.filters.state,
        state.filters.time_range
    );
    out.push('\n');

    out.push_str(&keywords_section(state));
    out.push('\n');
    out.push_str(&chart_section(state));
    out.push('\n');

    for row in state.active_keyword_rows() {
        out.push_str(&detail_section(state, row));
        out.push('\n');
    }

    out.push_str(&summaries_section(state));
    out
}

fn keywords_section(state: &DashboardState) -> String {
    let mut out = String::from("== Keywords ==\n");
    match &state.keywords_status {
        FetchStatus::Loading => out.push_str("  loading keywords...\n"),
        FetchStatus::Failed(message) => {
            let _ = writeln!(out, "  error: {message} (retry available)");
        }
        _ if state.keywords.is_empty() => {
            out.push_str(
                "  No keywords match the selected categories. Try selecting different \
                 categories or check back later for new data.\n",
            );
        }
        _ => out.push_str(&render_keyword_list(&state.keywords, &state.active_keywords)),
    }
    out
}

/// Ranked keyword list; pinned keywords are marked with `*`.
#[must_use]
pub fn render_keyword_list(rows: &[KeywordRow], active: &[String]) -> String {
    let mut out = String::new();
    for (index, row) in rows.iter().enumerate() {
        let marker = if active.iter().any(|name| *name == row.name) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{marker} {rank:>2}. {name} [{category}] {score}/100 ({trend})",
            rank = index + 1,
            name = row.name,
            category = row.category,
            score = row.interest_score,
            trend = trend_label(&row.trend_percentage),
        );
    }
    out
}

fn chart_section(state: &DashboardState) -> String {
    let mut out = String::from("== Interest over time ==\n");
    match &state.chart_status {
        FetchStatus::Loading => out.push_str("  loading chart data...\n"),
        FetchStatus::Failed(message) => {
            let _ = writeln!(out, "  error: {message} (retry available)");
        }
        _ if state.chart.is_empty() => out.push_str("  No chart data for the current selection.\n"),
        _ => {
            for point in &state.chart {
                let scores = point
                    .scores
                    .iter()
                    .map(|(name, score)| format!("{name}: {score}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(out, "  {}  {scores}", point.date);
            }
        }
    }
    out
}

fn detail_section(state: &DashboardState, row: &KeywordRow) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== {name} [{category}] {score}/100 ({trend}) ==",
        name = row.name,
        category = row.category,
        score = row.interest_score,
        trend = trend_label(&row.trend_percentage),
    );

    if !state.is_expanded(&row.name) {
        out.push_str("  (collapsed)\n");
        return out;
    }

    if state.detail_status(&row.name).is_loading() {
        out.push_str("  loading details...\n");
        return out;
    }
    if let Some(message) = state.detail_status(&row.name).error() {
        let _ = writeln!(out, "  error: {message} (retry available)");
        return out;
    }

    match state.details.get(&row.name) {
        None => out.push_str("  (no details yet)\n"),
        Some(detail) if detail.is_empty() => {
            out.push_str("  Details for this keyword are not available at the moment.\n");
        }
        Some(detail) => out.push_str(&detail_body(detail)),
    }
    out
}

fn detail_body(detail: &KeywordDetail) -> String {
    let mut out = String::new();

    if !detail.cities.is_empty() {
        out.push_str("  Top cities:\n");
        for city in &detail.cities {
            let _ = writeln!(
                out,
                "    {rank:>2}. {name} — {score}/100 ({trend})",
                rank = city.rank,
                name = city.city_full_name,
                score = city.interest_score,
                trend = trend_label(&city.trend_percentage),
            );
        }
    }

    if !detail.regions.is_empty() {
        out.push_str("  Regional interest:\n");
        for region in &detail.regions {
            let _ = writeln!(
                out,
                "    {name}: {level} ({score}/100)",
                name = region.region_name,
                level = IntensityLevel::parse(&region.intensity_level),
                score = region.interest_score,
            );
        }
    }

    if !detail.topics.is_empty() {
        out.push_str("  Related topics:\n");
        for topic in &detail.topics {
            let breakout = if topic.is_breakout { " [breakout]" } else { "" };
            let _ = writeln!(
                out,
                "    {name} (+{growth}%){breakout}",
                name = topic.topic_name,
                growth = topic.growth_percentage.round(),
            );
        }
    }

    if !detail.rising_queries.is_empty() {
        out.push_str("  Rising queries:\n");
        for query in &detail.rising_queries {
            let _ = writeln!(
                out,
                "    \"{text}\" (+{growth}%)",
                text = query.query_text,
                growth = query.growth_percentage.round(),
            );
        }
    }

    if let Some(summary) = &detail.ai_summary {
        out.push_str("  AI market summary:\n");
        for paragraph in summary.summary_text.split("\n\n") {
            let _ = writeln!(out, "    {paragraph}");
        }
    }

    if !detail.articles.is_empty() {
        out.push_str("  Related articles:\n");
        for article in &detail.articles {
            let _ = writeln!(
                out,
                "    {title} — {source} ({date})",
                title = article.title,
                source = article.source,
                date = article.published_at.format("%Y-%m-%d"),
            );
        }
    }

    out
}

fn summaries_section(state: &DashboardState) -> String {
    let mut out = String::from("== Monthly top keywords ==\n");
    match &state.summaries_status {
        FetchStatus::Loading => out.push_str("  loading monthly summaries...\n"),
        FetchStatus::Failed(message) => {
            let _ = writeln!(out, "  error: {message} (retry available)");
        }
        _ if state.monthly_summaries.is_empty() => out.push_str("  No monthly summaries yet.\n"),
        _ => out.push_str(&render_monthly_summaries(&state.monthly_summaries)),
    }
    out
}

/// Render the rolling monthly leaderboards.
#[must_use]
pub fn render_monthly_summaries(rows: &[MonthlySummaryRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "  {}", row.month.format("%B %Y"));
        for entry in &row.top_keywords.0 {
            let _ = writeln!(
                out,
                "    {rank}. {keyword} — {score}",
                rank = entry.rank,
                keyword = entry.keyword,
                score = entry.score,
            );
        }
    }
    out
}

fn trend_label(trend: &Decimal) -> String {
    if trend.is_sign_negative() {
        format!("{}%", trend.round())
    } else {
        format!("+{}%", trend.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hometrends_core::TimeRange;
    use hometrends_dash::{FilterState, Transition};
    use hometrends_db::TopKeywordEntry;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn keyword_row(name: &str, score: i32, trend: i64) -> KeywordRow {
        KeywordRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: "Residential Buying".to_string(),
            interest_score: score,
            trend_percentage: Decimal::from(trend),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn base_state() -> DashboardState {
        DashboardState::new(FilterState {
            categories: vec!["Residential Buying".to_string()],
            state: "TX".to_string(),
            time_range: TimeRange::Days30,
        })
    }

    #[test]
    fn renders_ranked_keywords_with_trend_signs() {
        let mut state = base_state();
        state.apply(Transition::KeywordsLoaded(vec![
            keyword_row("luxury condos", 87, 45),
            keyword_row("starter homes", 74, -12),
        ]));

        let out = render_dashboard(&state);
        assert!(out.contains("1. luxury condos [Residential Buying] 87/100 (+45%)"));
        assert!(out.contains("2. starter homes [Residential Buying] 74/100 (-12%)"));
    }

    #[test]
    fn renders_empty_state_when_no_keywords_match() {
        let mut state = base_state();
        state.apply(Transition::KeywordsLoaded(Vec::new()));
        let out = render_dashboard(&state);
        assert!(out.contains("No keywords match the selected categories."));
    }

    #[test]
    fn renders_scoped_error_with_retry_hint() {
        let mut state = base_state();
        state.apply(Transition::KeywordsFailed(
            "Failed to load keywords. Please try again.".to_string(),
        ));
        let out = render_dashboard(&state);
        assert!(out.contains("error: Failed to load keywords. Please try again. (retry available)"));
    }

    #[test]
    fn chart_lines_omit_missing_keywords() {
        let mut state = base_state();
        let a = keyword_row("A", 80, 0);
        let b = keyword_row("B", 70, 0);
        state.apply(Transition::KeywordsLoaded(vec![a, b]));
        state.apply(Transition::ChartLoaded(vec![hometrends_dash::ChartPoint {
            date: "2024-01-02".parse().expect("date"),
            scores: [("A".to_string(), 55)].into_iter().collect(),
        }]));

        let out = render_dashboard(&state);
        assert!(out.contains("2024-01-02  A: 55"));
        assert!(!out.contains("B: "));
    }

    #[test]
    fn collapsed_keywords_render_without_details() {
        let mut state = base_state();
        state.apply(Transition::KeywordsLoaded(vec![keyword_row(
            "luxury condos",
            87,
            45,
        )]));
        state.apply(Transition::SectionToggled("luxury condos".to_string()));
        let out = render_dashboard(&state);
        assert!(out.contains("(collapsed)"));
    }

    #[test]
    fn renders_monthly_leaderboards() {
        let rows = vec![MonthlySummaryRow {
            id: Uuid::new_v4(),
            month: "2025-06-01".parse().expect("date"),
            top_keywords: Json(vec![TopKeywordEntry {
                keyword: "open houses".to_string(),
                score: 68,
                rank: 1,
            }]),
            created_at: Utc::now(),
        }];
        let out = render_monthly_summaries(&rows);
        assert!(out.contains("June 2025"));
        assert!(out.contains("1. open houses — 68"));
    }
}
