use serde::{Deserialize, Serialize};

/// The chart window the user has selected.
///
/// Carried through the filter state for display; the sample data set ships
/// whole-history trend rows, so queries do not window on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    Days30,
    Days90,
    Months12,
}

impl TimeRange {
    /// Parse a CLI-style short form: `30d`, `90d`, or `12m`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "30d" => Some(TimeRange::Days30),
            "90d" => Some(TimeRange::Days90),
            "12m" => Some(TimeRange::Months12),
            _ => None,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::Days30 => write!(f, "30 Days"),
            TimeRange::Days90 => write!(f, "90 Days"),
            TimeRange::Months12 => write!(f, "12 Months"),
        }
    }
}

/// Categorical bucket for regional interest magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntensityLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Unknown,
}

impl IntensityLevel {
    /// Map the store's free-text bucket to a variant; anything
    /// unrecognized lands in [`IntensityLevel::Unknown`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Very High" => IntensityLevel::VeryHigh,
            "High" => IntensityLevel::High,
            "Moderate" => IntensityLevel::Moderate,
            "Low" => IntensityLevel::Low,
            _ => IntensityLevel::Unknown,
        }
    }
}

impl std::fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntensityLevel::VeryHigh => write!(f, "Very High"),
            IntensityLevel::High => write!(f, "High"),
            IntensityLevel::Moderate => write!(f, "Moderate"),
            IntensityLevel::Low => write!(f, "Low"),
            IntensityLevel::Unknown => write!(f, "Unknown"),
        }
    }
}
