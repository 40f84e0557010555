//! Longitudinal views over a producer's analyzed forms: dashboard, full
//! history, pairwise comparison and period trend reports.

pub mod aggregate;
pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    DashboardSummary, FormComparison, HistoryEntry, ReportPeriod, ScorePoint, Trend, TrendReport,
};
pub use router::history_router;
pub use service::HistoryService;
