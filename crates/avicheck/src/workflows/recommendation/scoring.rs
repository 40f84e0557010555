//! Bio keyword heuristics and compatibility arithmetic.

use crate::workflows::forms::AnalysisResult;

pub const BASE_COMPATIBILITY: u8 = 60;
pub const PROBLEM_BASE_COMPATIBILITY: u8 = 40;
pub const AVIAN_BONUS: u8 = 20;
pub const CRITICAL_ALERT_BONUS: u8 = 10;
pub const LOW_SCORE_BONUS: u8 = 5;
pub const PROBLEM_MATCH_BONUS: u8 = 15;
/// Problem-driven matches below this are dropped.
pub const PROBLEM_MIN_COMPATIBILITY: u8 = 50;
/// Analyses scoring under this are treated as urgent.
pub const URGENT_SCORE: u8 = 50;
pub const NEARBY_KM: f64 = 20.0;

const AVIAN_TERMS: [&str; 5] = ["poultry", "avian", "birds", "avicultura", "aves"];
const POULTRY_TERMS: [&str; 2] = ["poultry", "avicultura"];

const SPECIALTY_KEYWORDS: [(&[&str], &str); 5] = [
    (&["poultry", "avicultura"], "Poultry farming"),
    (&["avian", "birds", "aves"], "Avian medicine"),
    (&["nutrition", "nutrição"], "Animal nutrition"),
    (&["reproduction", "reprodução"], "Animal reproduction"),
    (&["clinic", "clínica"], "General practice"),
];
const DEFAULT_SPECIALTY: &str = "General veterinary medicine";

fn mentions_any(bio: &str, terms: &[&str]) -> bool {
    let lowered = bio.to_lowercase();
    terms.iter().any(|term| lowered.contains(term))
}

pub fn mentions(bio: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    !term.is_empty() && bio.to_lowercase().contains(&term)
}

pub fn is_avian_specialist(bio: &str) -> bool {
    mentions_any(bio, &AVIAN_TERMS)
}

pub fn specialties(bio: &str) -> Vec<String> {
    let found: Vec<String> = SPECIALTY_KEYWORDS
        .iter()
        .filter(|(terms, _)| mentions_any(bio, terms))
        .map(|(_, label)| (*label).to_string())
        .collect();
    if found.is_empty() {
        vec![DEFAULT_SPECIALTY.to_string()]
    } else {
        found
    }
}

/// Fit of a candidate against the producer's latest analysis, if any.
pub fn compatibility(bio: &str, latest: Option<&AnalysisResult>) -> u8 {
    let mut score = BASE_COMPATIBILITY;
    if is_avian_specialist(bio) {
        score = score.saturating_add(AVIAN_BONUS);
    }
    if let Some(result) = latest {
        if result.has_critical_alert() {
            score = score.saturating_add(CRITICAL_ALERT_BONUS);
        }
        if result.score < URGENT_SCORE {
            score = score.saturating_add(LOW_SCORE_BONUS);
        }
    }
    score.min(100)
}

/// Fit against an explicit list of problem tags.
pub fn problem_compatibility(bio: &str, problems: &[String]) -> u8 {
    let matches = problems
        .iter()
        .filter(|problem| mentions(bio, problem))
        .count();
    let mut score = u32::from(PROBLEM_BASE_COMPATIBILITY)
        + u32::try_from(matches)
            .unwrap_or(u32::MAX)
            .saturating_mul(u32::from(PROBLEM_MATCH_BONUS));
    if is_avian_specialist(bio) {
        score = score.saturating_add(u32::from(AVIAN_BONUS));
    }
    u8::try_from(score.min(100)).unwrap_or(100)
}

pub fn reason(bio: &str, latest: Option<&AnalysisResult>, distance_km: Option<f64>) -> String {
    let mut reasons = Vec::new();
    if distance_km.is_some_and(|distance| distance <= NEARBY_KM) {
        reasons.push("Geographic proximity");
    }
    if mentions_any(bio, &POULTRY_TERMS) {
        reasons.push("Poultry specialist");
    }
    if latest.is_some_and(|result| result.score < URGENT_SCORE) {
        reasons.push("Urgent situation");
    }
    if reasons.is_empty() {
        "Qualified professional".to_string()
    } else {
        reasons.join(", ")
    }
}

pub fn problem_reason(problems: &[String]) -> String {
    format!("Specialization in: {}", problems.join(", "))
}
