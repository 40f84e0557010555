use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::store::{InMemoryFormRepository, InMemoryUserRepository};
use crate::workflows::forms::{
    AnalysisResult, FormId, FormRepository, FormStatus, FormSubmission, ProfessionSet,
    ScoreBand, SectionedAnswers,
};
use crate::workflows::history::HistoryService;
use crate::workflows::users::{Address, UserAccount, UserId, UserProfile, UserRole};

pub(super) const PRODUCER: UserId = UserId(7);

pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn producer() -> UserAccount {
    UserAccount {
        profile: UserProfile {
            id: PRODUCER,
            full_name: "Ana Souza".to_string(),
            email: "ana@granja.test".to_string(),
            birth_date: None,
            address: Some(Address::new("MG", "Uberlândia")),
        },
        role: UserRole::Producer,
    }
}

pub(super) fn result(score: u8, comments: &[&str]) -> AnalysisResult {
    AnalysisResult {
        score,
        panorama: ScoreBand::from_score(score).panorama().to_string(),
        strengths: vec!["strength".to_string(); 3],
        improvements: vec!["improvement".to_string()],
        alerts: vec!["alert".to_string(); 2],
        recommended_professions: ProfessionSet::default(),
        comments: comments.iter().map(|comment| comment.to_string()).collect(),
    }
}

pub(super) fn form(id: &str, status: FormStatus, day: i64) -> FormSubmission {
    let filled_at = base_time() + Duration::days(day);
    FormSubmission {
        id: FormId(id.to_string()),
        owner_id: PRODUCER,
        answers: SectionedAnswers::default(),
        status,
        filled_at,
        updated_at: filled_at,
        result: None,
    }
}

pub(super) fn analyzed(id: &str, day: i64, score: u8) -> FormSubmission {
    analyzed_with_comments(id, day, score, &[])
}

pub(super) fn analyzed_with_comments(
    id: &str,
    day: i64,
    score: u8,
    comments: &[&str],
) -> FormSubmission {
    FormSubmission {
        result: Some(result(score, comments)),
        ..form(id, FormStatus::Analyzed, day)
    }
}

pub(super) fn build_service(
    forms: Vec<FormSubmission>,
) -> HistoryService<InMemoryFormRepository, InMemoryUserRepository> {
    let form_repository = Arc::new(InMemoryFormRepository::default());
    for form in forms {
        form_repository.save(form).expect("form stored");
    }
    let users = Arc::new(InMemoryUserRepository::default());
    users.insert(producer()).expect("producer stored");
    HistoryService::new(form_repository, users, 6)
}
