use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::store::{InMemoryFormRepository, InMemoryUserRepository};
use crate::workflows::forms::{
    AnalysisResult, FormId, FormRepository, FormStatus, FormSubmission, ProfessionSet,
    SectionedAnswers,
};
use crate::workflows::recommendation::{RecommendationDefaults, RecommendationService};
use crate::workflows::users::{
    Address, UserAccount, UserId, UserProfile, UserRole, VeterinarianProfile,
};

pub(super) const PRODUCER: UserId = UserId(1);

pub(super) fn producer() -> UserAccount {
    UserAccount {
        profile: UserProfile {
            id: PRODUCER,
            full_name: "João Pereira".to_string(),
            email: "joao@granja.test".to_string(),
            birth_date: None,
            address: Some(Address::new("MG", "Uberlândia")),
        },
        role: UserRole::Producer,
    }
}

pub(super) fn veterinarian(id: u32, city: &str, bio: &str) -> UserAccount {
    UserAccount {
        profile: UserProfile {
            id: UserId(id),
            full_name: format!("Vet {id}"),
            email: format!("vet{id}@clinic.test"),
            birth_date: None,
            address: Some(Address::new("MG", city)),
        },
        role: UserRole::Veterinarian(VeterinarianProfile {
            registration: format!("CRMV-MG {id}"),
            bio: bio.to_string(),
        }),
    }
}

/// Directory order: the out-of-town poultry vet is stored first so
/// distance tie-breaks are observable.
pub(super) fn directory() -> Vec<UserAccount> {
    vec![
        producer(),
        veterinarian(12, "Araguari", "Avicultura de postura"),
        veterinarian(10, "Uberlândia", "Poultry health and Newcastle control"),
        veterinarian(11, "Uberlândia", "Dairy cattle reproduction"),
        veterinarian(13, "Patos de Minas", "Aves ornamentais e silvestres"),
    ]
}

pub(super) fn analyzed_form(score: u8, alerts: &[&str]) -> FormSubmission {
    let filled_at = Utc
        .with_ymd_and_hms(2025, 5, 10, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    FormSubmission {
        id: FormId("form-1".to_string()),
        owner_id: PRODUCER,
        answers: SectionedAnswers::default(),
        status: FormStatus::Analyzed,
        filled_at,
        updated_at: filled_at,
        result: Some(AnalysisResult {
            score,
            panorama: String::new(),
            strengths: Vec::new(),
            improvements: Vec::new(),
            alerts: alerts.iter().map(|alert| alert.to_string()).collect(),
            recommended_professions: ProfessionSet::default(),
            comments: Vec::new(),
        }),
    }
}

pub(super) fn build_service(
    accounts: Vec<UserAccount>,
    forms: Vec<FormSubmission>,
) -> RecommendationService<InMemoryFormRepository, InMemoryUserRepository> {
    let users = Arc::new(InMemoryUserRepository::default());
    for account in accounts {
        users.insert(account).expect("account stored");
    }
    let form_repository = Arc::new(InMemoryFormRepository::default());
    for form in forms {
        form_repository.save(form).expect("form stored");
    }
    RecommendationService::new(form_repository, users, RecommendationDefaults::default())
}

pub(super) fn ids(recommendations: &[crate::workflows::recommendation::Recommendation]) -> Vec<u32> {
    recommendations
        .iter()
        .map(|recommendation| recommendation.veterinarian_id.0)
        .collect()
}
