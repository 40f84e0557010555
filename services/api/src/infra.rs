use avicheck::config::CheckpointConfig;
use avicheck::store::{InMemoryFormRepository, InMemoryUserRepository};
use avicheck::workflows::forms::{FormLifecycleService, RepositoryError};
use avicheck::workflows::history::HistoryService;
use avicheck::workflows::recommendation::{RecommendationDefaults, RecommendationService};
use avicheck::workflows::users::{
    Address, UserAccount, UserId, UserProfile, UserRole, VeterinarianProfile,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type FormService = FormLifecycleService<InMemoryFormRepository>;
pub(crate) type History = HistoryService<InMemoryFormRepository, InMemoryUserRepository>;
pub(crate) type Recommendations =
    RecommendationService<InMemoryFormRepository, InMemoryUserRepository>;

/// The three workflow services sharing one form store and one directory.
#[derive(Clone)]
pub(crate) struct CheckpointServices {
    pub(crate) forms: Arc<FormService>,
    pub(crate) history: Arc<History>,
    pub(crate) recommendations: Arc<Recommendations>,
}

impl CheckpointServices {
    pub(crate) fn in_memory(config: &CheckpointConfig, users: InMemoryUserRepository) -> Self {
        let form_repository = Arc::new(InMemoryFormRepository::default());
        let users = Arc::new(users);
        Self {
            forms: Arc::new(FormLifecycleService::new(form_repository.clone())),
            history: Arc::new(HistoryService::new(
                form_repository.clone(),
                users.clone(),
                config.trend_window_months,
            )),
            recommendations: Arc::new(RecommendationService::new(
                form_repository,
                users,
                RecommendationDefaults {
                    radius_km: config.recommendation_radius_km,
                    limit: config.recommendation_limit,
                },
            )),
        }
    }
}

pub(crate) const DEMO_PRODUCER: UserId = UserId(1);

fn account(
    id: u32,
    full_name: &str,
    email: &str,
    address: Address,
    role: UserRole,
) -> UserAccount {
    UserAccount {
        profile: UserProfile {
            id: UserId(id),
            full_name: full_name.to_string(),
            email: email.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1984, 4, 12),
            address: Some(address),
        },
        role,
    }
}

fn veterinarian(registration: &str, bio: &str) -> UserRole {
    UserRole::Veterinarian(VeterinarianProfile {
        registration: registration.to_string(),
        bio: bio.to_string(),
    })
}

/// Directory used by the server and the demo: one producer in Uberlândia
/// and a handful of veterinarians across Minas Gerais.
pub(crate) fn seed_directory() -> Result<InMemoryUserRepository, RepositoryError> {
    let users = InMemoryUserRepository::default();
    let accounts = [
        account(
            DEMO_PRODUCER.0,
            "Maria Oliveira",
            "maria@granjaboavista.test",
            Address::new("MG", "Uberlândia").with_coordinates(-18.9186, -48.2772),
            UserRole::Producer,
        ),
        account(
            2,
            "Dr. Tiago Lima",
            "tiago@vetcampo.test",
            Address::new("MG", "Uberlândia").with_coordinates(-18.9050, -48.2600),
            veterinarian(
                "CRMV-MG 10231",
                "Avicultura de postura, biosseguridade e Newcastle",
            ),
        ),
        account(
            3,
            "Dra. Helena Costa",
            "helena@clinicaaraguari.test",
            Address::new("MG", "Araguari").with_coordinates(-18.6456, -48.1934),
            veterinarian("CRMV-MG 8812", "Clínica geral de grandes animais e reprodução"),
        ),
        account(
            4,
            "Dr. Rafael Souza",
            "rafael@avesmg.test",
            Address::new("MG", "Belo Horizonte").with_coordinates(-19.9167, -43.9345),
            veterinarian("CRMV-MG 5520", "Poultry nutrition and avian influenza surveillance"),
        ),
        account(
            5,
            "Administrador",
            "admin@avicheck.test",
            Address::new("MG", "Uberlândia"),
            UserRole::Administrator,
        ),
    ];
    for account in accounts {
        users.insert(account)?;
    }
    Ok(users)
}
