//! Pure aggregation over already-fetched submissions. The service layer
//! resolves owners and forms; everything here is deterministic.

use super::domain::{
    DashboardSummary, FormComparison, HistoryEntry, ReportPeriod, ScorePoint, Trend, TrendReport,
};
use crate::workflows::forms::{FormStatus, FormSubmission};
use crate::workflows::users::UserAccount;

/// Dashboard listings keep the five most recent analyses.
pub const RECENT_HISTORY_LEN: usize = 5;

const CRITICAL_MARKERS: [&str; 3] = ["critical", "urgent", "deaths"];

/// Analyzed forms carrying a result, newest first. The sort is stable so
/// forms filled at the same instant keep their storage order.
pub fn scored_newest_first(forms: &[FormSubmission]) -> Vec<&FormSubmission> {
    let mut scored: Vec<_> = forms.iter().filter(|form| form.is_scored()).collect();
    scored.sort_by(|a, b| b.filled_at.cmp(&a.filled_at));
    scored
}

pub fn history_entries(forms: &[FormSubmission]) -> Vec<HistoryEntry> {
    scored_newest_first(forms)
        .into_iter()
        .map(HistoryEntry::from)
        .collect()
}

fn mean(scores: impl Iterator<Item = u8>) -> f64 {
    let (sum, count) = scores.fold((0u64, 0u64), |(sum, count), score| {
        (sum + u64::from(score), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

pub fn is_critical_alert(text: &str) -> bool {
    let lowered = text.to_lowercase();
    CRITICAL_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

pub fn build_dashboard(producer: &UserAccount, forms: &[FormSubmission]) -> DashboardSummary {
    let count_status =
        |status: FormStatus| forms.iter().filter(|form| form.status == status).count();

    let mut summary = DashboardSummary {
        producer_id: producer.id(),
        producer_name: producer.profile.full_name.clone(),
        total_forms: forms.len(),
        analyzed_forms: count_status(FormStatus::Analyzed),
        drafts: count_status(FormStatus::Draft),
        average_score: 0.0,
        trend: None,
        latest_score: None,
        previous_score: None,
        category: None,
        strengths_total: 0,
        improvements_total: 0,
        alerts_total: 0,
        recent_history: Vec::new(),
        active_alerts: Vec::new(),
        has_critical_alerts: false,
    };

    let scored = scored_newest_first(forms);
    let Some(latest) = scored.first().and_then(|form| form.result.as_ref()) else {
        return summary;
    };

    summary.average_score = mean(scored.iter().filter_map(|form| form.score()));
    summary.latest_score = Some(latest.score);
    summary.previous_score = scored.get(1).and_then(|form| form.score());
    summary.trend = Some(match summary.previous_score {
        Some(previous) => Trend::between(previous, latest.score),
        None => Trend::First,
    });
    summary.category = Some(latest.band());
    summary.strengths_total = latest.strengths.len();
    summary.improvements_total = latest.improvements.len();
    summary.alerts_total = latest.alerts.len();
    summary.recent_history = scored
        .iter()
        .take(RECENT_HISTORY_LEN)
        .map(|form| HistoryEntry::from(*form))
        .collect();
    summary.active_alerts = latest.comments.clone();
    summary.has_critical_alerts = summary
        .active_alerts
        .iter()
        .any(|alert| is_critical_alert(alert));

    summary
}

pub fn compare(first: &FormSubmission, second: &FormSubmission) -> FormComparison {
    let (score_delta, percent_change, improved) = match (first.score(), second.score()) {
        (Some(before), Some(after)) => {
            let delta = i32::from(after) - i32::from(before);
            let percent = if before == 0 {
                0.0
            } else {
                f64::from(delta) / f64::from(before) * 100.0
            };
            (Some(delta), percent, after > before)
        }
        _ => (None, 0.0, false),
    };

    FormComparison {
        first: HistoryEntry::from(first),
        second: HistoryEntry::from(second),
        score_delta,
        percent_change,
        improved,
    }
}

pub fn build_trend_report(forms: &[FormSubmission], period: ReportPeriod) -> TrendReport {
    let mut in_period: Vec<_> = forms
        .iter()
        .filter(|form| form.is_scored() && period.contains(form.filled_at))
        .collect();
    in_period.sort_by(|a, b| a.filled_at.cmp(&b.filled_at));

    let points: Vec<ScorePoint> = in_period
        .iter()
        .filter_map(|form| {
            form.score().map(|score| ScorePoint {
                date: form.filled_at.date_naive(),
                score,
            })
        })
        .collect();

    let trend = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => {
            Some(Trend::between(first.score, last.score))
        }
        _ => None,
    };

    TrendReport {
        period,
        total_forms: in_period.len(),
        average_score: mean(points.iter().map(|point| point.score)),
        points,
        trend,
    }
}
