use super::{Profession, ProfessionSet};
use serde::{Deserialize, Serialize};

const STRENGTH_POINTS: i64 = 10;
const IMPROVEMENT_PENALTY: i64 = 3;
const ALERT_PENALTY: i64 = 8;

/// `clamp(0, 100, strengths*10 - improvements*3 - alerts*8)`.
pub fn overall_score(strengths: usize, improvements: usize, alerts: usize) -> u8 {
    let raw = weighted(strengths, STRENGTH_POINTS)
        .saturating_sub(weighted(improvements, IMPROVEMENT_PENALTY))
        .saturating_sub(weighted(alerts, ALERT_PENALTY));
    raw.clamp(0, 100) as u8
}

fn weighted(count: usize, weight: i64) -> i64 {
    i64::try_from(count)
        .unwrap_or(i64::MAX)
        .saturating_mul(weight)
}

/// The four score bands shared by the panorama and the dashboard category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Attention,
    Critical,
}

impl ScoreBand {
    pub const fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 60 {
            Self::Good
        } else if score >= 40 {
            Self::Attention
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Attention => "Attention",
            Self::Critical => "Critical",
        }
    }

    pub const fn panorama(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Excellent! Your farm shows great management and health conditions."
            }
            Self::Good => {
                "Good! Your farm is in adequate condition, but some points can be improved."
            }
            Self::Attention => {
                "Attention! Your farm needs important improvements to keep the flock healthy."
            }
            Self::Critical => {
                "Critical! Your farm has serious problems that must be fixed urgently."
            }
        }
    }
}

fn comment_for(profession: Profession) -> &'static str {
    match profession {
        Profession::Veterinarian => "We suggest an assessment by a veterinarian.",
        Profession::AnimalScientist => "We suggest an assessment by an animal scientist.",
        Profession::Physician => {
            "We suggest an urgent assessment by a physician if workers show clinical signs."
        }
    }
}

/// Comments follow the fixed profession priority, not insertion order.
pub(crate) fn comments(professions: &ProfessionSet) -> Vec<String> {
    Profession::priority()
        .into_iter()
        .filter(|profession| professions.contains(*profession))
        .map(|profession| comment_for(profession).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_clamped_to_bounds() {
        assert_eq!(overall_score(0, 0, 0), 0);
        assert_eq!(overall_score(0, 4, 6), 0);
        assert_eq!(overall_score(15, 0, 0), 100);
        assert_eq!(overall_score(usize::MAX, 0, 0), 100);
        assert_eq!(overall_score(0, usize::MAX, usize::MAX), 0);
    }

    #[test]
    fn score_weights_buckets() {
        assert_eq!(overall_score(8, 1, 1), 69);
        assert_eq!(overall_score(5, 0, 2), 34);
    }

    #[test]
    fn bands_use_inclusive_lower_bounds() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::Attention);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::Attention);
        assert_eq!(ScoreBand::from_score(39), ScoreBand::Critical);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Critical);
    }

    #[test]
    fn comments_follow_priority_not_insertion() {
        let professions: ProfessionSet = vec![
            Profession::Physician,
            Profession::AnimalScientist,
            Profession::Veterinarian,
            Profession::Physician,
        ]
        .into();
        let comments = comments(&professions);
        assert_eq!(comments.len(), 3);
        assert!(comments[0].contains("veterinarian"));
        assert!(comments[1].contains("animal scientist"));
        assert!(comments[2].contains("physician"));
    }
}
