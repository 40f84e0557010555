use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::forms::{FormId, FormStatus, FormSubmission, ScoreBand};
use crate::workflows::users::UserId;

/// Score movements within this many points either way count as stable.
pub const STABLE_MARGIN: i32 = 5;

/// Direction of the score between two analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
    /// Only one analysis exists, nothing to compare against.
    First,
}

impl Trend {
    /// Classify the move from `earlier` to `later`. A delta of exactly
    /// `STABLE_MARGIN` is still stable.
    pub fn between(earlier: u8, later: u8) -> Self {
        let delta = i32::from(later) - i32::from(earlier);
        if delta > STABLE_MARGIN {
            Self::Rising
        } else if delta < -STABLE_MARGIN {
            Self::Falling
        } else {
            Self::Stable
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Stable => "stable",
            Self::First => "first",
        }
    }
}

/// One row of the history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub form_id: FormId,
    pub filled_at: DateTime<Utc>,
    pub status: FormStatus,
    pub complete: bool,
    pub score: Option<u8>,
    pub panorama: Option<String>,
    pub strengths: usize,
    pub improvements: usize,
    pub alerts: usize,
}

impl From<&FormSubmission> for HistoryEntry {
    fn from(form: &FormSubmission) -> Self {
        let result = form.result.as_ref();
        Self {
            form_id: form.id.clone(),
            filled_at: form.filled_at,
            status: form.status,
            complete: form.is_complete(),
            score: result.map(|result| result.score),
            panorama: result.map(|result| result.panorama.clone()),
            strengths: result.map_or(0, |result| result.strengths.len()),
            improvements: result.map_or(0, |result| result.improvements.len()),
            alerts: result.map_or(0, |result| result.alerts.len()),
        }
    }
}

/// Derived per-request view of one producer; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub producer_id: UserId,
    pub producer_name: String,
    pub total_forms: usize,
    pub analyzed_forms: usize,
    pub drafts: usize,
    pub average_score: f64,
    /// `None` until the producer has an analyzed form.
    pub trend: Option<Trend>,
    pub latest_score: Option<u8>,
    pub previous_score: Option<u8>,
    pub category: Option<ScoreBand>,
    pub strengths_total: usize,
    pub improvements_total: usize,
    pub alerts_total: usize,
    pub recent_history: Vec<HistoryEntry>,
    pub active_alerts: Vec<String>,
    pub has_critical_alerts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormComparison {
    pub first: HistoryEntry,
    pub second: HistoryEntry,
    /// Second minus first; absent unless both forms are scored.
    pub score_delta: Option<i32>,
    pub percent_change: f64,
    pub improved: bool,
}

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportPeriod {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub period: ReportPeriod,
    pub total_forms: usize,
    /// Ascending by fill date.
    pub points: Vec<ScorePoint>,
    pub average_score: f64,
    /// Present once the period holds at least two points.
    pub trend: Option<Trend>,
}
