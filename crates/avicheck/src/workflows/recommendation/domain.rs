use serde::{Deserialize, Serialize};

use crate::workflows::users::{UserAccount, UserId};

/// Radius and result size used when a caller does not supply them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationDefaults {
    pub radius_km: f64,
    pub limit: usize,
}

impl Default for RecommendationDefaults {
    fn default() -> Self {
        Self {
            radius_km: 100.0,
            limit: 5,
        }
    }
}

/// One ranked veterinarian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub veterinarian_id: UserId,
    pub name: String,
    pub email: String,
    pub registration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub specialties: Vec<String>,
    pub bio: String,
    /// Absent for location searches, which match on city instead.
    pub distance_km: Option<f64>,
    pub compatibility: u8,
    pub reason: String,
}

impl Recommendation {
    /// `None` for accounts that are not veterinarians.
    pub(crate) fn for_candidate(
        account: &UserAccount,
        distance_km: Option<f64>,
        compatibility: u8,
        reason: String,
    ) -> Option<Self> {
        let profile = account.veterinarian()?;
        let address = account.profile.address.as_ref();
        Some(Self {
            veterinarian_id: account.id(),
            name: account.profile.full_name.clone(),
            email: account.profile.email.clone(),
            registration: profile.registration.clone(),
            city: address.map(|address| address.city.clone()),
            state: address.map(|address| address.state.clone()),
            specialties: super::scoring::specialties(&profile.bio),
            bio: profile.bio.clone(),
            distance_km,
            compatibility,
            reason,
        })
    }
}
