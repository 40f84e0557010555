use std::sync::Arc;

use chrono::{DateTime, Months, Utc};
use tracing::{debug, info};

use super::aggregate;
use super::domain::{DashboardSummary, FormComparison, HistoryEntry, ReportPeriod, TrendReport};
use crate::workflows::forms::{FormId, FormRepository};
use crate::workflows::users::{UserAccount, UserId, UserRepository};
use crate::workflows::WorkflowError;

/// Read-only aggregator over producers and their analyzed forms.
pub struct HistoryService<F, U> {
    forms: Arc<F>,
    users: Arc<U>,
    trend_window_months: u32,
}

impl<F, U> HistoryService<F, U>
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    pub fn new(forms: Arc<F>, users: Arc<U>, trend_window_months: u32) -> Self {
        Self {
            forms,
            users,
            trend_window_months,
        }
    }

    pub fn dashboard(&self, producer_id: UserId) -> Result<DashboardSummary, WorkflowError> {
        let producer = self.producer(producer_id)?;
        let forms = self.forms.find_by_owner(producer_id)?;
        let summary = aggregate::build_dashboard(&producer, &forms);
        debug!(
            producer_id = %producer_id,
            analyzed = summary.analyzed_forms,
            critical = summary.has_critical_alerts,
            "dashboard built"
        );
        Ok(summary)
    }

    /// Every analyzed form of the producer, newest first.
    pub fn full_history(&self, producer_id: UserId) -> Result<Vec<HistoryEntry>, WorkflowError> {
        let forms = self.forms.find_by_owner(producer_id)?;
        Ok(aggregate::history_entries(&forms))
    }

    pub fn compare(&self, first: &FormId, second: &FormId) -> Result<FormComparison, WorkflowError> {
        let before = self
            .forms
            .find_by_id(first)?
            .ok_or_else(|| WorkflowError::form_not_found(first))?;
        let after = self
            .forms
            .find_by_id(second)?
            .ok_or_else(|| WorkflowError::form_not_found(second))?;
        Ok(aggregate::compare(&before, &after))
    }

    /// Scores within `[start, end]`. Missing bounds default to the configured
    /// window ending now.
    pub fn trend_report(
        &self,
        producer_id: UserId,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<TrendReport, WorkflowError> {
        let end = end.unwrap_or_else(Utc::now);
        let start = match start {
            Some(start) => start,
            None => end
                .checked_sub_months(Months::new(self.trend_window_months))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        };
        if start > end {
            return Err(WorkflowError::Validation(
                "report start must not be after its end".to_string(),
            ));
        }

        let forms = self.forms.find_by_owner(producer_id)?;
        let report = aggregate::build_trend_report(&forms, ReportPeriod { start, end });
        info!(
            producer_id = %producer_id,
            points = report.points.len(),
            "trend report generated"
        );
        Ok(report)
    }

    fn producer(&self, id: UserId) -> Result<UserAccount, WorkflowError> {
        self.users
            .find_by_id(id)?
            .filter(UserAccount::is_producer)
            .ok_or_else(|| WorkflowError::producer_not_found(id))
    }
}
