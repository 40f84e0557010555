mod rules;
mod scoring;

pub use scoring::{overall_score, ScoreBand};

use super::domain::SectionedAnswers;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless engine turning sectioned answers into scored feedback.
///
/// Every section is examined independently; a missing section contributes
/// nothing and unrecognized answers are skipped, so analysis never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalysisEngine;

impl AnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, answers: &SectionedAnswers) -> AnalysisResult {
        let mut findings = Findings::default();

        if let Some(health) = &answers.health {
            rules::health(health, &mut findings);
        }
        if let Some(nutrition) = &answers.nutrition {
            rules::nutrition(nutrition, &mut findings);
        }
        if let Some(evaluation) = &answers.evaluation {
            rules::evaluation(evaluation, &mut findings);
        }
        if let Some(diseases) = &answers.diseases {
            rules::diseases(diseases, &mut findings);
        }

        let score = overall_score(
            findings.strengths.len(),
            findings.improvements.len(),
            findings.alerts.len(),
        );
        let comments = scoring::comments(&findings.professions);

        debug!(
            score,
            strengths = findings.strengths.len(),
            improvements = findings.improvements.len(),
            alerts = findings.alerts.len(),
            "questionnaire analyzed"
        );

        AnalysisResult {
            score,
            panorama: ScoreBand::from_score(score).panorama().to_string(),
            strengths: findings.strengths,
            improvements: findings.improvements,
            alerts: findings.alerts,
            recommended_professions: findings.professions,
            comments,
        }
    }
}

/// Scored feedback attached to an analyzed submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub panorama: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub alerts: Vec<String>,
    pub recommended_professions: ProfessionSet,
    pub comments: Vec<String>,
}

impl AnalysisResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }

    pub fn has_critical_alert(&self) -> bool {
        self.alerts
            .iter()
            .any(|alert| alert.to_lowercase().contains("critical"))
    }
}

/// Professionals the analysis can point a producer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    Veterinarian,
    AnimalScientist,
    Physician,
}

impl Profession {
    /// Fixed order used when rendering comments.
    pub const fn priority() -> [Self; 3] {
        [Self::Veterinarian, Self::AnimalScientist, Self::Physician]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Veterinarian => "Veterinarian",
            Self::AnimalScientist => "Animal Scientist",
            Self::Physician => "Physician",
        }
    }
}

/// Insertion-ordered, deduplicating set of professions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Profession>", into = "Vec<Profession>")]
pub struct ProfessionSet(Vec<Profession>);

impl ProfessionSet {
    pub fn insert(&mut self, profession: Profession) -> bool {
        if self.0.contains(&profession) {
            return false;
        }
        self.0.push(profession);
        true
    }

    pub fn contains(&self, profession: Profession) -> bool {
        self.0.contains(&profession)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Profession> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Profession>> for ProfessionSet {
    fn from(values: Vec<Profession>) -> Self {
        values.into_iter().collect()
    }
}

impl From<ProfessionSet> for Vec<Profession> {
    fn from(set: ProfessionSet) -> Self {
        set.0
    }
}

impl FromIterator<Profession> for ProfessionSet {
    fn from_iter<I: IntoIterator<Item = Profession>>(iter: I) -> Self {
        let mut set = ProfessionSet::default();
        for profession in iter {
            set.insert(profession);
        }
        set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bucket {
    Strength,
    Improvement,
    Alert,
}

/// Accumulator shared by the section rule sets.
#[derive(Debug, Default)]
pub(crate) struct Findings {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub alerts: Vec<String>,
    pub professions: ProfessionSet,
}

impl Findings {
    pub(crate) fn record(&mut self, bucket: Bucket, statement: &str, refer: &[Profession]) {
        let target = match bucket {
            Bucket::Strength => &mut self.strengths,
            Bucket::Improvement => &mut self.improvements,
            Bucket::Alert => &mut self.alerts,
        };
        target.push(statement.to_string());
        for profession in refer {
            self.professions.insert(*profession);
        }
    }
}
