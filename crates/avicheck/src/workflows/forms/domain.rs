use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::analysis::AnalysisResult;
use crate::workflows::users::UserId;

/// Identifier wrapper for questionnaire submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub String);

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle tracked for every submission: draft → submitted → analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Draft,
    Submitted,
    Analyzed,
}

impl FormStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FormStatus::Draft => "draft",
            FormStatus::Submitted => "submitted",
            FormStatus::Analyzed => "analyzed",
        }
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for FormStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" | "rascunho" => Ok(FormStatus::Draft),
            "submitted" | "submetido" => Ok(FormStatus::Submitted),
            "analyzed" | "analisado" => Ok(FormStatus::Analyzed),
            _ => Err(UnknownStatus(raw.to_string())),
        }
    }
}

/// The four question groups a complete form must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Health,
    Nutrition,
    Evaluation,
    Diseases,
}

impl Section {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Health,
            Self::Nutrition,
            Self::Evaluation,
            Self::Diseases,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Nutrition => "nutrition",
            Self::Evaluation => "evaluation",
            Self::Diseases => "diseases",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Binary answer. Values outside the vocabulary are kept as `Unrecognized`
/// so one malformed answer never rejects the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YesNo {
    #[serde(alias = "sim")]
    Yes,
    #[serde(alias = "nao", alias = "não")]
    No,
    #[serde(other)]
    Unrecognized,
}

/// Tags of the clinical-signs multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClinicalSign {
    #[serde(alias = "semAlteracoes")]
    NoAlterations,
    #[serde(alias = "espirros")]
    Sneezing,
    #[serde(alias = "diarreia")]
    Diarrhea,
    #[serde(alias = "apatia")]
    Apathy,
    #[serde(alias = "quedaProducao")]
    ProductionDrop,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedType {
    #[serde(alias = "racaoIndustrial")]
    IndustrialFeed,
    #[serde(alias = "comidaCaseira")]
    HomemadeFood,
    #[serde(alias = "sobrasAlimentos")]
    FoodScraps,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShellQuality {
    #[serde(alias = "semAlteracao")]
    NoAlterations,
    #[serde(alias = "rachaduras")]
    Cracks,
    #[serde(alias = "rugosa")]
    Rough,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EggCleanliness {
    #[serde(alias = "semAlteracao")]
    NoAlterations,
    #[serde(alias = "sujidades")]
    Dirty,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSection {
    #[serde(default, alias = "sinaisDoenca", skip_serializing_if = "Option::is_none")]
    pub disease_signs: Option<YesNo>,
    #[serde(default, alias = "sinaisClinicos", skip_serializing_if = "Option::is_none")]
    pub clinical_signs: Option<Vec<ClinicalSign>>,
    #[serde(default, alias = "vacinacao", skip_serializing_if = "Option::is_none")]
    pub vaccination: Option<YesNo>,
    #[serde(default, alias = "quarentena", skip_serializing_if = "Option::is_none")]
    pub quarantine: Option<YesNo>,
    #[serde(default, alias = "avesSilvestres", skip_serializing_if = "Option::is_none")]
    pub wild_bird_access: Option<YesNo>,
}

impl HealthSection {
    pub fn is_answered(&self) -> bool {
        self.disease_signs.is_some()
            || self
                .clinical_signs
                .as_ref()
                .is_some_and(|signs| !signs.is_empty())
            || self.vaccination.is_some()
            || self.quarantine.is_some()
            || self.wild_bird_access.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSection {
    #[serde(default, alias = "tipoAlimentacao", skip_serializing_if = "Option::is_none")]
    pub feed_type: Option<FeedType>,
    #[serde(default, alias = "armazenamento", skip_serializing_if = "Option::is_none")]
    pub proper_storage: Option<YesNo>,
    #[serde(default, alias = "fungosBolor", skip_serializing_if = "Option::is_none")]
    pub mold_or_pests: Option<YesNo>,
}

impl NutritionSection {
    pub fn is_answered(&self) -> bool {
        self.feed_type.is_some() || self.proper_storage.is_some() || self.mold_or_pests.is_some()
    }
}

/// Egg and production evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSection {
    #[serde(default, alias = "registrosZootecnicos", skip_serializing_if = "Option::is_none")]
    pub production_records: Option<YesNo>,
    #[serde(
        default,
        alias = "fotoperiodo",
        alias = "fotoperíodo",
        skip_serializing_if = "Option::is_none"
    )]
    pub photoperiod: Option<YesNo>,
    #[serde(default, alias = "qualidadeCasca", skip_serializing_if = "Option::is_none")]
    pub shell_quality: Option<ShellQuality>,
    #[serde(default, alias = "limpezaOvos", skip_serializing_if = "Option::is_none")]
    pub egg_cleanliness: Option<EggCleanliness>,
}

impl EvaluationSection {
    pub fn is_answered(&self) -> bool {
        self.production_records.is_some()
            || self.photoperiod.is_some()
            || self.shell_quality.is_some()
            || self.egg_cleanliness.is_some()
    }
}

/// Avian influenza and Newcastle screening questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseasesSection {
    #[serde(default, alias = "mortesRepentinas", skip_serializing_if = "Option::is_none")]
    pub sudden_deaths: Option<YesNo>,
    #[serde(
        default,
        alias = "quedaProducaoRepentina",
        skip_serializing_if = "Option::is_none"
    )]
    pub sudden_production_drop: Option<YesNo>,
    #[serde(default, alias = "sintomasNeurologicos", skip_serializing_if = "Option::is_none")]
    pub neurological_signs: Option<YesNo>,
    #[serde(default, alias = "sintomasRespiratorios", skip_serializing_if = "Option::is_none")]
    pub respiratory_signs: Option<YesNo>,
    #[serde(default, alias = "diarreiaVerde", skip_serializing_if = "Option::is_none")]
    pub green_diarrhea: Option<YesNo>,
    #[serde(default, alias = "contatoAvesSilvestres", skip_serializing_if = "Option::is_none")]
    pub wild_bird_contact: Option<YesNo>,
}

impl DiseasesSection {
    pub fn is_answered(&self) -> bool {
        self.sudden_deaths.is_some()
            || self.sudden_production_drop.is_some()
            || self.neurological_signs.is_some()
            || self.respiratory_signs.is_some()
            || self.green_diarrhea.is_some()
            || self.wild_bird_contact.is_some()
    }
}

/// Answers grouped by section. A missing section is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionedAnswers {
    #[serde(default, alias = "saude", skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthSection>,
    #[serde(default, alias = "nutricao", skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionSection>,
    #[serde(default, alias = "avaliacao", skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationSection>,
    #[serde(default, alias = "doencas", skip_serializing_if = "Option::is_none")]
    pub diseases: Option<DiseasesSection>,
}

impl SectionedAnswers {
    /// Whether a section is present with at least one answered question.
    /// Completeness is structural: one filled key is enough.
    pub fn has_section(&self, section: Section) -> bool {
        match section {
            Section::Health => self.health.as_ref().is_some_and(HealthSection::is_answered),
            Section::Nutrition => self
                .nutrition
                .as_ref()
                .is_some_and(NutritionSection::is_answered),
            Section::Evaluation => self
                .evaluation
                .as_ref()
                .is_some_and(EvaluationSection::is_answered),
            Section::Diseases => self
                .diseases
                .as_ref()
                .is_some_and(DiseasesSection::is_answered),
        }
    }

    pub fn missing_sections(&self) -> Vec<Section> {
        Section::ordered()
            .into_iter()
            .filter(|section| !self.has_section(*section))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        Section::ordered()
            .into_iter()
            .all(|section| self.has_section(section))
    }
}

/// Stored questionnaire with its lifecycle metadata and, once analyzed,
/// the attached result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: FormId,
    pub owner_id: UserId,
    pub answers: SectionedAnswers,
    pub status: FormStatus,
    pub filled_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
}

impl FormSubmission {
    pub fn is_complete(&self) -> bool {
        self.answers.is_complete()
    }

    pub fn score(&self) -> Option<u8> {
        self.result.as_ref().map(|result| result.score)
    }

    /// Analyzed and carrying a result; the only forms history reads from.
    pub fn is_scored(&self) -> bool {
        self.status == FormStatus::Analyzed && self.result.is_some()
    }
}

/// Payload for creating or editing a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub answers: SectionedAnswers,
    /// Attempt the draft → submitted transition right after saving.
    #[serde(default)]
    pub submit: bool,
}
