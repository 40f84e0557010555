use super::super::domain::{
    ClinicalSign, DiseasesSection, EggCleanliness, EvaluationSection, FeedType, HealthSection,
    NutritionSection, ShellQuality, YesNo,
};
use super::{Bucket, Findings, Profession};

const VET: &[Profession] = &[Profession::Veterinarian];
const VET_AND_PHYSICIAN: &[Profession] = &[Profession::Veterinarian, Profession::Physician];
const NUTRITION_TEAM: &[Profession] = &[Profession::AnimalScientist, Profession::Veterinarian];

/// One statement emitted for a recognized answer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Finding {
    bucket: Bucket,
    statement: &'static str,
    refer: &'static [Profession],
}

const fn strength(statement: &'static str) -> Finding {
    Finding {
        bucket: Bucket::Strength,
        statement,
        refer: &[],
    }
}

const fn improvement(statement: &'static str, refer: &'static [Profession]) -> Finding {
    Finding {
        bucket: Bucket::Improvement,
        statement,
        refer,
    }
}

const fn alert(statement: &'static str, refer: &'static [Profession]) -> Finding {
    Finding {
        bucket: Bucket::Alert,
        statement,
        refer,
    }
}

/// Outcome table for a yes/no question.
#[derive(Debug, Clone, Copy)]
pub(crate) struct YesNoRule {
    yes: Finding,
    no: Finding,
}

impl YesNoRule {
    fn apply(&self, answer: Option<YesNo>, findings: &mut Findings) {
        let finding = match answer {
            Some(YesNo::Yes) => self.yes,
            Some(YesNo::No) => self.no,
            Some(YesNo::Unrecognized) | None => return,
        };
        emit(finding, findings);
    }
}

fn emit(finding: Finding, findings: &mut Findings) {
    findings.record(finding.bucket, finding.statement, finding.refer);
}

const DISEASE_SIGNS: YesNoRule = YesNoRule {
    yes: alert(
        "Your birds are showing signs of disease. Monitor the flock constantly and keep daily notes on production and behaviour changes.",
        VET,
    ),
    no: strength("Your birds show no signs of disease; keep monitoring the flock."),
};

const VACCINATION: YesNoRule = YesNoRule {
    yes: strength(
        "Well done! Vaccination is up to date (Newcastle, Marek, Infectious Bronchitis, Gumboro and anticoccidials).",
    ),
    no: alert(
        "Careful! Vaccination is not up to date, compromising the health of the birds and of consumers.",
        VET,
    ),
};

const QUARANTINE: YesNoRule = YesNoRule {
    yes: strength("Excellent! New birds are quarantined correctly, preventing disease spread."),
    no: improvement(
        "New birds must be quarantined before they are introduced to the flock.",
        &[],
    ),
};

const WILD_BIRD_ACCESS: YesNoRule = YesNoRule {
    yes: alert(
        "Careful! Wild birds can transmit avian influenza. Remove nearby fruit trees and screen the housing.",
        VET,
    ),
    no: strength("Very good! Wild birds have no access, preventing avian influenza transmission."),
};

const PROPER_STORAGE: YesNoRule = YesNoRule {
    yes: strength("Very good! Feed is stored in a closed, dry and protected place."),
    no: alert(
        "Attention! Improper storage compromises feed quality and bird health.",
        &[],
    ),
};

const MOLD_OR_PESTS: YesNoRule = YesNoRule {
    yes: alert("Careful! Feed quality is compromised by mold, fungi or insects!", &[]),
    no: strength("Very good! Feed quality is preserved with no mold, fungi or insects."),
};

const PRODUCTION_RECORDS: YesNoRule = YesNoRule {
    yes: strength(
        "Excellent! Keeping production records helps track productivity and spot problems early.",
    ),
    no: improvement(
        "Attention! Recording production, feed consumption and mortality is essential to manage the farm.",
        &[],
    ),
};

const PHOTOPERIOD: YesNoRule = YesNoRule {
    yes: strength("Very good! Correct lighting management (16h of light) stimulates laying."),
    no: alert(
        "Attention! Inadequate lighting compromises production. Laying hens need at least 16 hours of light per day.",
        VET,
    ),
};

const SUDDEN_DEATHS: YesNoRule = YesNoRule {
    yes: alert(
        "CRITICAL! Sudden deaths may indicate Avian Influenza or Newcastle disease. Immediate isolation required!",
        VET_AND_PHYSICIAN,
    ),
    no: strength("No sudden deaths observed, indicating no serious disease so far."),
};

const SUDDEN_PRODUCTION_DROP: YesNoRule = YesNoRule {
    yes: alert(
        "Attention! A sudden production drop may indicate disease, stress or feeding problems.",
        &[],
    ),
    no: strength("Egg production is normal; your birds look healthy."),
};

const NEUROLOGICAL_SIGNS: YesNoRule = YesNoRule {
    yes: alert(
        "CRITICAL! Tremors, twisted necks or staggering indicate serious neurological problems (Influenza/Newcastle)!",
        VET_AND_PHYSICIAN,
    ),
    no: strength("No neurological signs is a strong indicator of flock health."),
};

const RESPIRATORY_SIGNS: YesNoRule = YesNoRule {
    yes: alert(
        "Attention! Coughing, sneezing or wheezing indicate respiratory disease. Watch whether these signs increase.",
        &[],
    ),
    no: strength("Birds without respiratory signs indicate good health and welfare."),
};

const GREEN_DIARRHEA: YesNoRule = YesNoRule {
    yes: alert(
        "CRITICAL! Green or watery diarrhea may indicate a viral infection (Avian Influenza or Newcastle)!",
        VET_AND_PHYSICIAN,
    ),
    no: strength("Normal droppings show the birds have no intestinal changes."),
};

const WILD_BIRD_CONTACT: YesNoRule = YesNoRule {
    yes: alert(
        "CRITICAL! Contact with wild birds carries Avian Influenza and Newcastle risk. Stop the contact immediately!",
        VET_AND_PHYSICIAN,
    ),
    no: strength("Keep restricting contact with wild birds to prevent contamination."),
};

const NO_CLINICAL_SIGNS: Finding = strength("Your birds show no clinical signs of disease.");

fn clinical_sign_finding(sign: ClinicalSign) -> Option<Finding> {
    match sign {
        ClinicalSign::Sneezing => Some(alert(
            "Careful! Your birds are sneezing. Respiratory signs spread quickly and can cut production.",
            &[],
        )),
        ClinicalSign::Diarrhea => Some(alert(
            "Careful! Your birds have diarrhea, a non-specific sign that may indicate Salmonella or coccidiosis.",
            &[],
        )),
        ClinicalSign::Apathy => Some(alert(
            "Careful! Your birds are apathetic, which lowers productive performance.",
            &[],
        )),
        ClinicalSign::ProductionDrop => Some(alert(
            "Production drop detected. This is multifactorial and calls for a full flock assessment.",
            &[],
        )),
        ClinicalSign::NoAlterations | ClinicalSign::Unrecognized => None,
    }
}

/// Multi-select: the no-alterations sentinel short-circuits to a single
/// strength; otherwise each recognized tag raises its own alert once. A
/// veterinarian is referred only when at least one recognized tag fired.
fn clinical_signs(signs: &[ClinicalSign], findings: &mut Findings) {
    if signs.contains(&ClinicalSign::NoAlterations) {
        emit(NO_CLINICAL_SIGNS, findings);
        return;
    }

    const TAG_ORDER: [ClinicalSign; 4] = [
        ClinicalSign::Sneezing,
        ClinicalSign::Diarrhea,
        ClinicalSign::Apathy,
        ClinicalSign::ProductionDrop,
    ];
    let mut fired = false;
    for sign in TAG_ORDER {
        if signs.contains(&sign) {
            if let Some(finding) = clinical_sign_finding(sign) {
                emit(finding, findings);
                fired = true;
            }
        }
    }
    if fired {
        findings.professions.insert(Profession::Veterinarian);
    }
}

pub(crate) fn health(section: &HealthSection, findings: &mut Findings) {
    DISEASE_SIGNS.apply(section.disease_signs, findings);
    if let Some(signs) = &section.clinical_signs {
        clinical_signs(signs, findings);
    }
    VACCINATION.apply(section.vaccination, findings);
    QUARANTINE.apply(section.quarantine, findings);
    WILD_BIRD_ACCESS.apply(section.wild_bird_access, findings);
}

pub(crate) fn nutrition(section: &NutritionSection, findings: &mut Findings) {
    match section.feed_type {
        Some(FeedType::IndustrialFeed) => emit(
            strength("Good choice! Industrial feed provides every component the birds require."),
            findings,
        ),
        Some(FeedType::HomemadeFood | FeedType::FoodScraps) => emit(
            improvement(
                "Homemade food or scraps can leave nutrients out, harming the birds.",
                NUTRITION_TEAM,
            ),
            findings,
        ),
        Some(FeedType::Unrecognized) | None => {}
    }
    PROPER_STORAGE.apply(section.proper_storage, findings);
    MOLD_OR_PESTS.apply(section.mold_or_pests, findings);
}

pub(crate) fn evaluation(section: &EvaluationSection, findings: &mut Findings) {
    PRODUCTION_RECORDS.apply(section.production_records, findings);
    PHOTOPERIOD.apply(section.photoperiod, findings);

    let shell = match section.shell_quality {
        Some(ShellQuality::NoAlterations) => Some(strength(
            "Very good! Shell quality is good, protecting the egg contents.",
        )),
        Some(ShellQuality::Cracks) => Some(alert(
            "Careful! Cracks and fissures let microorganisms in. Collect more often and check the feed.",
            VET,
        )),
        Some(ShellQuality::Rough) => Some(alert(
            "Careful! Rough shells may indicate nutritional deficiency, heat stress or diseases such as Newcastle or bronchitis.",
            VET,
        )),
        Some(ShellQuality::Unrecognized) | None => None,
    };
    if let Some(finding) = shell {
        emit(finding, findings);
    }

    let cleanliness = match section.egg_cleanliness {
        Some(EggCleanliness::NoAlterations) => Some(strength(
            "Very good! Clean eggs show hens are not laying on the litter and collection is correct.",
        )),
        Some(EggCleanliness::Dirty) => Some(alert(
            "Careful! Dirty eggs can be contaminated by microorganisms. Check collection frequency and nest cleaning.",
            VET,
        )),
        Some(EggCleanliness::Unrecognized) | None => None,
    };
    if let Some(finding) = cleanliness {
        emit(finding, findings);
    }
}

pub(crate) fn diseases(section: &DiseasesSection, findings: &mut Findings) {
    SUDDEN_DEATHS.apply(section.sudden_deaths, findings);
    SUDDEN_PRODUCTION_DROP.apply(section.sudden_production_drop, findings);
    NEUROLOGICAL_SIGNS.apply(section.neurological_signs, findings);
    RESPIRATORY_SIGNS.apply(section.respiratory_signs, findings);
    GREEN_DIARRHEA.apply(section.green_diarrhea, findings);
    WILD_BIRD_CONTACT.apply(section.wild_bird_contact, findings);
}
