use clap::Args;
use prakriti::config::{AppConfig, ScoringConfig};
use prakriti::constitution::{
    AssessmentReport, AssessmentView, ConstitutionScorer, IntakeAnswers, IntakeImporter,
    WeightProfile,
};
use prakriti::error::AppError;
use std::io::Read;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Intake answers as JSON (use `-` to read from stdin)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Weight profile to score with (intake or assessment)
    #[arg(long, value_parser = parse_profile)]
    pub(crate) profile: Option<WeightProfile>,
    /// Print the full assessment as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// CSV export of intake forms, one patient per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Weight profile to score with (intake or assessment)
    #[arg(long, value_parser = parse_profile)]
    pub(crate) profile: Option<WeightProfile>,
    /// Print one JSON document per row instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn parse_profile(raw: &str) -> Result<WeightProfile, String> {
    WeightProfile::parse(raw)
        .ok_or_else(|| format!("unknown weight profile '{raw}' (expected intake or assessment)"))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        profile,
        json,
    } = args;

    let scorer = build_scorer(profile)?;
    let raw = if input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&input)?
    };
    let answers: IntakeAnswers = serde_json::from_str(&raw)?;

    let view = AssessmentReport::generate(&scorer, &answers).view(scorer.config());
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        for line in assessment_lines(&view) {
            println!("{line}");
        }
    }

    Ok(())
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let ImportArgs { csv, profile, json } = args;

    let scorer = build_scorer(profile)?;
    let rows = IntakeImporter::from_path(&csv)?;

    if !json {
        println!("Scored {} intake rows from {}", rows.len(), csv.display());
    }
    for row in rows {
        let view = AssessmentReport::generate(&scorer, &row.answers).view(scorer.config());
        if json {
            let payload = serde_json::json!({
                "line": row.line,
                "name": row.name,
                "assessment": view,
            });
            println!("{}", serde_json::to_string(&payload)?);
            continue;
        }

        let name = row.name.as_deref().unwrap_or("(unnamed)");
        println!("\nLine {}: {}", row.line, name);
        for line in assessment_lines(&view) {
            println!("  {line}");
        }
    }

    Ok(())
}

fn build_scorer(profile: Option<WeightProfile>) -> Result<ConstitutionScorer, AppError> {
    let mut scoring: ScoringConfig = AppConfig::load()?.scoring;
    if let Some(profile) = profile {
        scoring.profile = profile;
        scoring.table_path = None;
    }
    Ok(scoring.build_scorer()?)
}

pub(crate) fn assessment_lines(view: &AssessmentView) -> Vec<String> {
    let summary = &view.summary;
    let mut lines = Vec::new();

    if summary.neutral_fallback {
        lines.push(format!(
            "Constitution: {} (no weighted answers, neutral split)",
            summary.constitution
        ));
    } else {
        lines.push(format!(
            "Constitution: {} (dominant {})",
            summary.constitution,
            summary.dominant.label()
        ));
    }

    for entry in &summary.distribution {
        lines.push(format!(
            "  {:<6} {:>3}%  raw {}",
            entry.label, entry.percentage, entry.raw_score
        ));
    }

    if let Some(bmi) = view.metrics.bmi {
        lines.push(format!("BMI: {bmi:.1}"));
    }
    lines.push(format!(
        "Build: {} / metabolism {}",
        view.build.body_frame, view.build.metabolic_rate
    ));

    if !summary.contributions.is_empty() {
        lines.push("Contributions:".to_string());
        for component in &summary.contributions {
            lines.push(format!(
                "  {:<22} {:<5} +{:<3} {}",
                component.question.label(),
                component.category.label(),
                component.weight,
                component.notes
            ));
        }
    }

    lines.push("Diet:".to_string());
    lines.extend(
        view.recommendations
            .diet
            .iter()
            .map(|item| format!("  - {item}")),
    );
    lines.push("Lifestyle:".to_string());
    lines.extend(
        view.recommendations
            .lifestyle
            .iter()
            .map(|item| format!("  - {item}")),
    );

    lines
}
