//! End-to-end scenarios for the checkpoint workflow: a producer fills a
//! questionnaire, gets it analyzed, and reads the dashboard and the ranked
//! veterinarians through the public services and merged HTTP routers.

mod common {
    use std::sync::Arc;

    use serde_json::json;

    use avicheck::store::{InMemoryFormRepository, InMemoryUserRepository};
    use avicheck::workflows::forms::{FormDraft, FormLifecycleService};
    use avicheck::workflows::history::HistoryService;
    use avicheck::workflows::recommendation::{RecommendationDefaults, RecommendationService};
    use avicheck::workflows::users::{
        Address, UserAccount, UserId, UserProfile, UserRole, VeterinarianProfile,
    };

    pub(super) const PRODUCER: UserId = UserId(1);

    pub(super) struct Services {
        pub(super) forms: Arc<FormLifecycleService<InMemoryFormRepository>>,
        pub(super) history: Arc<HistoryService<InMemoryFormRepository, InMemoryUserRepository>>,
        pub(super) recommendations:
            Arc<RecommendationService<InMemoryFormRepository, InMemoryUserRepository>>,
    }

    pub(super) fn services() -> Services {
        let form_repository = Arc::new(InMemoryFormRepository::default());
        let users = Arc::new(InMemoryUserRepository::default());
        users
            .insert(UserAccount {
                profile: UserProfile {
                    id: PRODUCER,
                    full_name: "Maria Oliveira".to_string(),
                    email: "maria@granja.test".to_string(),
                    birth_date: None,
                    address: Some(Address::new("MG", "Uberlândia")),
                },
                role: UserRole::Producer,
            })
            .expect("producer");
        users
            .insert(UserAccount {
                profile: UserProfile {
                    id: UserId(2),
                    full_name: "Dr. Tiago Lima".to_string(),
                    email: "tiago@clinic.test".to_string(),
                    birth_date: None,
                    address: Some(Address::new("MG", "Uberlândia")),
                },
                role: UserRole::Veterinarian(VeterinarianProfile {
                    registration: "CRMV-MG 2020".to_string(),
                    bio: "Avicultura e sanidade de aves".to_string(),
                }),
            })
            .expect("veterinarian");

        Services {
            forms: Arc::new(FormLifecycleService::new(form_repository.clone())),
            history: Arc::new(HistoryService::new(form_repository.clone(), users.clone(), 6)),
            recommendations: Arc::new(RecommendationService::new(
                form_repository,
                users,
                RecommendationDefaults::default(),
            )),
        }
    }

    /// Complete questionnaire in the frontend vocabulary reporting sudden
    /// deaths.
    pub(super) fn outbreak_draft() -> FormDraft {
        serde_json::from_value(json!({
            "owner_id": 1,
            "answers": {
                "saude": {
                    "sinaisDoenca": "sim",
                    "sinaisClinicos": ["espirros", "apatia"],
                    "vacinacao": "nao",
                    "quarentena": "sim",
                    "avesSilvestres": "sim"
                },
                "nutricao": {
                    "tipoAlimentacao": "racaoIndustrial",
                    "armazenamento": "sim",
                    "fungosBolor": "nao"
                },
                "avaliacao": {
                    "registrosZootecnicos": "nao",
                    "fotoperiodo": "sim",
                    "qualidadeCasca": "rachaduras",
                    "limpezaOvos": "sujidades"
                },
                "doencas": {
                    "mortesRepentinas": "sim",
                    "quedaProducaoRepentina": "sim",
                    "sintomasNeurologicos": "nao",
                    "sintomasRespiratorios": "sim",
                    "diarreiaVerde": "nao",
                    "contatoAvesSilvestres": "nao"
                }
            }
        }))
        .expect("draft payload")
    }
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use avicheck::workflows::forms::{form_router, FormStatus, Profession};
use avicheck::workflows::history::{history_router, Trend};
use avicheck::workflows::recommendation::recommendation_router;
use avicheck::workflows::WorkflowError;

use common::*;

#[test]
fn outbreak_questionnaire_flows_from_draft_to_recommendation() {
    let services = services();

    let draft = services.forms.save(outbreak_draft()).expect("saved");
    assert_eq!(draft.status, FormStatus::Draft);
    assert!(draft.is_complete());

    services.forms.submit(&draft.id).expect("submitted");
    let analyzed = services.forms.analyze(&draft.id).expect("analyzed");
    let result = analyzed.result.as_ref().expect("result attached");

    // 8 strengths, 1 improvement and 10 alerts.
    assert_eq!(result.strengths.len(), 8);
    assert_eq!(result.improvements.len(), 1);
    assert_eq!(result.alerts.len(), 10);
    assert_eq!(result.score, 0);
    assert!(result.has_critical_alert());
    assert!(result
        .recommended_professions
        .contains(Profession::Physician));

    let dashboard = services.history.dashboard(PRODUCER).expect("dashboard");
    assert_eq!(dashboard.analyzed_forms, 1);
    assert_eq!(dashboard.trend, Some(Trend::First));
    assert!(dashboard.has_critical_alerts);

    let ranked = services
        .recommendations
        .recommend(PRODUCER, None, None)
        .expect("ranked");
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].compatibility, 95);
    assert_eq!(
        ranked[0].reason,
        "Geographic proximity, Poultry specialist, Urgent situation"
    );
}

#[test]
fn incomplete_questionnaire_cannot_be_submitted() {
    let services = services();
    let mut draft = outbreak_draft();
    draft.answers.diseases = None;

    let form = services.forms.save(draft).expect("saved");
    let err = services.forms.submit(&form.id).expect_err("incomplete");

    assert!(matches!(err, WorkflowError::IncompleteForm { .. }));
    assert_eq!(err.to_string(), format!("form {} is incomplete; missing sections: diseases", form.id));
}

#[tokio::test]
async fn merged_routers_serve_every_workflow() {
    let services = services();
    let mut draft = outbreak_draft();
    draft.submit = true;
    let form = services.forms.save(draft).expect("saved");
    assert_eq!(form.status, FormStatus::Submitted);
    services.forms.analyze(&form.id).expect("analyzed");

    let router = Router::new()
        .merge(form_router(services.forms.clone()))
        .merge(history_router(services.history.clone()))
        .merge(recommendation_router(services.recommendations.clone()));

    for uri in [
        format!("/api/v1/forms/{}", form.id),
        "/api/v1/producers/1/forms".to_string(),
        "/api/v1/producers/1/dashboard".to_string(),
        "/api/v1/producers/1/history".to_string(),
        "/api/v1/producers/1/trends".to_string(),
        "/api/v1/producers/1/recommendations".to_string(),
        format!("/api/v1/comparisons?first={0}&second={0}", form.id),
        "/api/v1/veterinarians/search?specialty=aves&city=Uberl%C3%A2ndia&state=MG".to_string(),
    ] {
        let response = router
            .clone()
            .oneshot(Request::get(uri.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    }

    let response = router
        .oneshot(
            Request::get("/api/v1/producers/1/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let dashboard: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(dashboard["producer_name"], "Maria Oliveira");
    assert_eq!(dashboard["category"], "critical");
}
