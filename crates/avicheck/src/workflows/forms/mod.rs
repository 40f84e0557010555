//! Questionnaire submissions: typed answers, lifecycle and rule-based analysis.

pub mod analysis;
pub mod domain;
mod locks;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use analysis::{AnalysisEngine, AnalysisResult, Profession, ProfessionSet, ScoreBand};
pub use domain::{
    ClinicalSign, DiseasesSection, EggCleanliness, EvaluationSection, FeedType, FormDraft, FormId,
    FormStatus, FormSubmission, HealthSection, NutritionSection, Section, SectionedAnswers,
    ShellQuality, YesNo,
};
pub use repository::{FormRepository, RepositoryError};
pub use router::{form_router, FormView};
pub use service::FormLifecycleService;
