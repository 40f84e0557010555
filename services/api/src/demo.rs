use crate::infra::{seed_directory, CheckpointServices, DEMO_PRODUCER};
use avicheck::config::CheckpointConfig;
use avicheck::error::AppError;
use avicheck::workflows::forms::{
    AnalysisResult, ClinicalSign, DiseasesSection, EggCleanliness, EvaluationSection, FeedType,
    FormDraft, HealthSection, NutritionSection, SectionedAnswers, ShellQuality, YesNo,
};
use avicheck::workflows::history::{DashboardSummary, FormComparison};
use avicheck::workflows::recommendation::Recommendation;
use avicheck::workflows::WorkflowError;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Search radius for the veterinarian ranking, in kilometres.
    #[arg(long)]
    pub(crate) radius_km: Option<f64>,
    /// Maximum number of veterinarians to list.
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Print the whole walkthrough as JSON instead of text.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct DemoReport {
    pub(crate) baseline: AnalysisResult,
    pub(crate) follow_up: AnalysisResult,
    pub(crate) comparison: FormComparison,
    pub(crate) dashboard: DashboardSummary,
    pub(crate) recommendations: Vec<Recommendation>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let report = build_demo_report(&args)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_demo_report(&report);
    }
    Ok(())
}

pub(crate) fn build_demo_report(args: &DemoArgs) -> Result<DemoReport, AppError> {
    let directory = seed_directory().map_err(WorkflowError::from)?;
    let services = CheckpointServices::in_memory(&CheckpointConfig::default(), directory);

    let baseline = analyze(&services, outbreak_answers())?;
    let follow_up = analyze(&services, recovered_answers())?;

    let comparison = services.history.compare(&baseline.0, &follow_up.0)?;
    let dashboard = services.history.dashboard(DEMO_PRODUCER)?;
    let recommendations =
        services
            .recommendations
            .recommend(DEMO_PRODUCER, args.radius_km, args.limit)?;

    Ok(DemoReport {
        baseline: baseline.1,
        follow_up: follow_up.1,
        comparison,
        dashboard,
        recommendations,
    })
}

fn analyze(
    services: &CheckpointServices,
    answers: SectionedAnswers,
) -> Result<(avicheck::workflows::forms::FormId, AnalysisResult), AppError> {
    let form = services.forms.save(FormDraft {
        owner_id: Some(DEMO_PRODUCER),
        answers,
        submit: true,
    })?;
    let analyzed = services.forms.analyze(&form.id)?;
    let result = analyzed
        .result
        .ok_or_else(|| WorkflowError::Validation(format!("form {} has no result", form.id)))?;
    Ok((form.id, result))
}

fn render_demo_report(report: &DemoReport) {
    println!("AviCheck demo");
    render_analysis("Baseline questionnaire", &report.baseline);
    render_analysis("Follow-up questionnaire", &report.follow_up);

    let comparison = &report.comparison;
    println!("\nEvolution");
    match comparison.score_delta {
        Some(delta) => println!(
            "- Score delta: {delta:+} ({:.1}%), improved: {}",
            comparison.percent_change, comparison.improved
        ),
        None => println!("- Score delta unavailable"),
    }

    let dashboard = &report.dashboard;
    println!("\nDashboard for {}", dashboard.producer_name);
    println!(
        "- Forms: {} total, {} analyzed, {} drafts",
        dashboard.total_forms, dashboard.analyzed_forms, dashboard.drafts
    );
    println!("- Average score: {:.1}", dashboard.average_score);
    if let Some(trend) = dashboard.trend {
        println!("- Trend: {}", trend.label());
    }
    if let Some(category) = dashboard.category {
        println!("- Category: {}", category.label());
    }
    if dashboard.has_critical_alerts {
        println!("- Critical alerts are active");
    }

    println!("\nRecommended veterinarians");
    if report.recommendations.is_empty() {
        println!("- None within the search radius");
    }
    for recommendation in &report.recommendations {
        let distance = recommendation
            .distance_km
            .map(|distance| format!("{distance:.1} km"))
            .unwrap_or_else(|| "distance unknown".to_string());
        println!(
            "- {} ({}) compatibility {} | {} | {}",
            recommendation.name,
            recommendation.registration,
            recommendation.compatibility,
            distance,
            recommendation.reason
        );
    }
}

fn render_analysis(title: &str, result: &AnalysisResult) {
    println!("\n{title}");
    println!("- Score: {} ({})", result.score, result.band().label());
    println!("- {}", result.panorama);
    println!(
        "- {} strengths, {} improvements, {} alerts",
        result.strengths.len(),
        result.improvements.len(),
        result.alerts.len()
    );
    for alert in result.alerts.iter().filter(|alert| alert.starts_with("CRITICAL")) {
        println!("  ! {alert}");
    }
    for comment in &result.comments {
        println!("  > {comment}");
    }
}

fn outbreak_answers() -> SectionedAnswers {
    SectionedAnswers {
        health: Some(HealthSection {
            disease_signs: Some(YesNo::Yes),
            clinical_signs: Some(vec![ClinicalSign::Sneezing, ClinicalSign::ProductionDrop]),
            vaccination: Some(YesNo::No),
            quarantine: Some(YesNo::Yes),
            wild_bird_access: Some(YesNo::Yes),
        }),
        nutrition: Some(NutritionSection {
            feed_type: Some(FeedType::HomemadeFood),
            proper_storage: Some(YesNo::Yes),
            mold_or_pests: Some(YesNo::No),
        }),
        evaluation: Some(EvaluationSection {
            production_records: Some(YesNo::No),
            photoperiod: Some(YesNo::Yes),
            shell_quality: Some(ShellQuality::Rough),
            egg_cleanliness: Some(EggCleanliness::NoAlterations),
        }),
        diseases: Some(DiseasesSection {
            sudden_deaths: Some(YesNo::Yes),
            sudden_production_drop: Some(YesNo::Yes),
            neurological_signs: Some(YesNo::No),
            respiratory_signs: Some(YesNo::Yes),
            green_diarrhea: Some(YesNo::No),
            wild_bird_contact: Some(YesNo::No),
        }),
    }
}

fn recovered_answers() -> SectionedAnswers {
    SectionedAnswers {
        health: Some(HealthSection {
            disease_signs: Some(YesNo::No),
            clinical_signs: Some(vec![ClinicalSign::NoAlterations]),
            vaccination: Some(YesNo::Yes),
            quarantine: Some(YesNo::Yes),
            wild_bird_access: Some(YesNo::No),
        }),
        nutrition: Some(NutritionSection {
            feed_type: Some(FeedType::IndustrialFeed),
            proper_storage: Some(YesNo::Yes),
            mold_or_pests: Some(YesNo::No),
        }),
        evaluation: Some(EvaluationSection {
            production_records: Some(YesNo::Yes),
            photoperiod: Some(YesNo::Yes),
            shell_quality: Some(ShellQuality::NoAlterations),
            egg_cleanliness: Some(EggCleanliness::NoAlterations),
        }),
        diseases: Some(DiseasesSection {
            sudden_deaths: Some(YesNo::No),
            sudden_production_drop: Some(YesNo::No),
            neurological_signs: Some(YesNo::No),
            respiratory_signs: Some(YesNo::No),
            green_diarrhea: Some(YesNo::No),
            wild_bird_contact: Some(YesNo::No),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_report_shows_recovery() {
        let report = build_demo_report(&DemoArgs::default()).expect("demo runs");

        assert!(report.baseline.has_critical_alert());
        assert_eq!(report.follow_up.score, 100);
        assert!(report.comparison.improved);
        assert_eq!(report.dashboard.analyzed_forms, 2);
        assert!(report.dashboard.trend.is_some());
        assert_eq!(report.comparison.score_delta, Some(98));
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn demo_honours_limit() {
        let args = DemoArgs {
            limit: Some(1),
            ..DemoArgs::default()
        };

        let report = build_demo_report(&args).expect("demo runs");

        assert_eq!(report.recommendations.len(), 1);
    }
}
