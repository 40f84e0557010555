//! Veterinarian ranking for producers by compatibility with the latest
//! analysis and distance to the farm.

pub mod distance;
pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Recommendation, RecommendationDefaults};
pub use router::recommendation_router;
pub use service::RecommendationService;
