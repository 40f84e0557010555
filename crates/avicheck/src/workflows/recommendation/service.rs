use std::sync::Arc;

use tracing::{debug, info};

use super::distance;
use super::domain::{Recommendation, RecommendationDefaults};
use super::scoring;
use crate::workflows::forms::{AnalysisResult, FormRepository};
use crate::workflows::history::aggregate::scored_newest_first;
use crate::workflows::users::{UserAccount, UserId, UserRepository};
use crate::workflows::WorkflowError;

/// Problem-driven searches return at most this many candidates.
pub const PROBLEM_RESULT_LIMIT: usize = 3;

pub struct RecommendationService<F, U> {
    forms: Arc<F>,
    users: Arc<U>,
    defaults: RecommendationDefaults,
}

impl<F, U> RecommendationService<F, U>
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    pub fn new(forms: Arc<F>, users: Arc<U>, defaults: RecommendationDefaults) -> Self {
        Self {
            forms,
            users,
            defaults,
        }
    }

    /// Veterinarians within `radius_km` of the producer ranked by
    /// compatibility with the latest analysis, nearer first on ties.
    pub fn recommend(
        &self,
        producer_id: UserId,
        radius_km: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Vec<Recommendation>, WorkflowError> {
        let radius_km = radius_km.unwrap_or(self.defaults.radius_km);
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(WorkflowError::Validation(
                "radius_km must be a non-negative number".to_string(),
            ));
        }
        let limit = limit.unwrap_or(self.defaults.limit);

        let producer = self.producer(producer_id)?;
        let latest = self.latest_analysis(producer_id)?;
        let origin = producer.profile.address.as_ref();

        let mut ranked: Vec<Recommendation> = self
            .veterinarians()?
            .iter()
            .filter_map(|candidate| {
                let bio = candidate.veterinarian().map_or("", |vet| vet.bio.as_str());
                let distance_km = distance::between(origin, candidate.profile.address.as_ref());
                Recommendation::for_candidate(
                    candidate,
                    Some(distance_km),
                    scoring::compatibility(bio, latest.as_ref()),
                    scoring::reason(bio, latest.as_ref(), Some(distance_km)),
                )
            })
            .filter(|recommendation| {
                recommendation
                    .distance_km
                    .is_some_and(|distance| distance <= radius_km)
            })
            .collect();
        rank(&mut ranked);
        ranked.truncate(limit);

        info!(
            producer_id = %producer_id,
            radius_km,
            results = ranked.len(),
            analyzed = latest.is_some(),
            "veterinarians recommended"
        );
        Ok(ranked)
    }

    /// Candidates whose biography covers the given problem tags.
    pub fn recommend_by_problems(
        &self,
        producer_id: UserId,
        problems: &[String],
    ) -> Result<Vec<Recommendation>, WorkflowError> {
        let producer = self.producer(producer_id)?;
        let origin = producer.profile.address.as_ref();
        let problems: Vec<String> = problems
            .iter()
            .map(|problem| problem.trim().to_string())
            .filter(|problem| !problem.is_empty())
            .collect();
        let reason = scoring::problem_reason(&problems);

        let mut ranked: Vec<Recommendation> = self
            .veterinarians()?
            .iter()
            .filter_map(|candidate| {
                let bio = candidate.veterinarian().map_or("", |vet| vet.bio.as_str());
                Recommendation::for_candidate(
                    candidate,
                    Some(distance::between(origin, candidate.profile.address.as_ref())),
                    scoring::problem_compatibility(bio, &problems),
                    reason.clone(),
                )
            })
            .filter(|recommendation| {
                recommendation.compatibility >= scoring::PROBLEM_MIN_COMPATIBILITY
            })
            .collect();
        rank(&mut ranked);
        ranked.truncate(PROBLEM_RESULT_LIMIT);

        debug!(producer_id = %producer_id, problems = problems.len(), results = ranked.len(), "problem search");
        Ok(ranked)
    }

    /// Veterinarians in exactly `city`/`state` whose biography mentions the
    /// specialty or avian work in general.
    pub fn find_by_specialty_and_location(
        &self,
        specialty: &str,
        city: &str,
        state: &str,
    ) -> Result<Vec<Recommendation>, WorkflowError> {
        let mut found: Vec<Recommendation> = self
            .users
            .find_by_state(state)?
            .iter()
            .filter(|account| {
                account
                    .profile
                    .address
                    .as_ref()
                    .is_some_and(|address| address.matches(city, state))
            })
            .filter_map(|account| {
                let bio = account.veterinarian()?.bio.as_str();
                if !(scoring::mentions(bio, specialty) || scoring::is_avian_specialist(bio)) {
                    return None;
                }
                Recommendation::for_candidate(
                    account,
                    None,
                    scoring::compatibility(bio, None),
                    scoring::reason(bio, None, None),
                )
            })
            .collect();
        found.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));
        Ok(found)
    }

    fn producer(&self, id: UserId) -> Result<UserAccount, WorkflowError> {
        self.users
            .find_by_id(id)?
            .filter(UserAccount::is_producer)
            .ok_or_else(|| WorkflowError::producer_not_found(id))
    }

    fn veterinarians(&self) -> Result<Vec<UserAccount>, WorkflowError> {
        Ok(self
            .users
            .list_all()?
            .into_iter()
            .filter(|account| account.veterinarian().is_some())
            .collect())
    }

    fn latest_analysis(&self, producer_id: UserId) -> Result<Option<AnalysisResult>, WorkflowError> {
        let forms = self.forms.find_by_owner(producer_id)?;
        Ok(scored_newest_first(&forms)
            .first()
            .and_then(|form| form.result.clone()))
    }
}

/// Compatibility descending, then distance ascending. Stable, so full ties
/// keep the directory order.
fn rank(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.compatibility.cmp(&a.compatibility).then_with(|| {
            let left = a.distance_km.unwrap_or(f64::INFINITY);
            let right = b.distance_km.unwrap_or(f64::INFINITY);
            left.total_cmp(&right)
        })
    });
}
