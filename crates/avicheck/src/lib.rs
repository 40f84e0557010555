//! Poultry farm checkpoint service.
//!
//! Producers fill sectioned health, nutrition, egg-evaluation and disease
//! questionnaires. Submitted forms are scored by a rule-based engine, the
//! scored history drives dashboards and trend reports, and the latest
//! analysis feeds the veterinarian recommendation ranking.

pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod workflows;
