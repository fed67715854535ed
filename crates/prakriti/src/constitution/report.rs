use serde::Serialize;

use super::config::ScorerConfig;
use super::domain::{Dosha, IntakeAnswers};
use super::insights::{BodyMetrics, ConstitutionalBuild};
use super::recommendations::Recommendations;
use super::scorer::{ConstitutionResult, ConstitutionScorer, ScoreComponent};

/// Everything shown to the practitioner after an assessment is scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub result: ConstitutionResult,
    pub metrics: BodyMetrics,
    pub build: ConstitutionalBuild,
    pub recommendations: Recommendations,
}

impl AssessmentReport {
    pub fn generate(scorer: &ConstitutionScorer, answers: &IntakeAnswers) -> Self {
        let result = scorer.score(answers);
        let dominant = result.dominant();
        Self {
            metrics: BodyMetrics::from_answers(answers),
            build: ConstitutionalBuild::for_dosha(dominant),
            recommendations: Recommendations::for_dosha(dominant),
            result,
        }
    }

    pub fn view(&self, config: &ScorerConfig) -> AssessmentView {
        AssessmentView {
            summary: self.summary(config),
            metrics: self.metrics.clone(),
            build: self.build,
            recommendations: self.recommendations.clone(),
        }
    }

    pub fn summary(&self, config: &ScorerConfig) -> AssessmentSummary {
        let distribution = self
            .result
            .ranked(config)
            .into_iter()
            .map(|dosha| DistributionEntry {
                category: dosha,
                label: dosha.label(),
                percentage: self.result.percentage(dosha),
                raw_score: self.result.counters().get(dosha),
            })
            .collect();

        AssessmentSummary {
            distribution,
            dominant: self.result.dominant(),
            constitution: self.result.label().to_string(),
            combined_label: self.result.combined_label(),
            neutral_fallback: self.result.is_fallback(),
            contributions: self.result.components().to_vec(),
        }
    }
}

/// Response payload for a scored assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentView {
    pub summary: AssessmentSummary,
    pub metrics: BodyMetrics,
    pub build: ConstitutionalBuild,
    pub recommendations: Recommendations,
}

/// Flattened view used by the CLI and the HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentSummary {
    pub distribution: Vec<DistributionEntry>,
    pub dominant: Dosha,
    pub constitution: String,
    pub combined_label: Option<String>,
    pub neutral_fallback: bool,
    pub contributions: Vec<ScoreComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionEntry {
    pub category: Dosha,
    pub label: &'static str,
    pub percentage: u8,
    pub raw_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constitution::domain::{
        BodyFrame, EnergyPattern, SkinType, StressResponse, TemperaturePreference,
    };
    use crate::constitution::WeightTable;

    #[test]
    fn report_orders_distribution_and_picks_guidance() {
        let scorer = ConstitutionScorer::new(WeightTable::assessment(), ScorerConfig::default());
        let answers = IntakeAnswers {
            body_frame: Some(BodyFrame::Medium),
            skin_type: Some(SkinType::Oily),
            energy_pattern: Some(EnergyPattern::Intense),
            stress_response: Some(StressResponse::Calm),
            temperature_preference: Some(TemperaturePreference::Warm),
            ..IntakeAnswers::default()
        };

        let report = AssessmentReport::generate(&scorer, &answers);
        let summary = report.summary(scorer.config());

        // pitta 7, kapha 2, vata 2
        assert_eq!(summary.dominant, Dosha::Pitta);
        assert_eq!(summary.distribution[0].category, Dosha::Pitta);
        assert_eq!(summary.distribution[0].percentage, 64);
        assert_eq!(summary.distribution[1].category, Dosha::Vata);
        assert_eq!(summary.constitution, "Pitta");
        assert!(summary.combined_label.is_none());
        assert_eq!(summary.contributions.len(), 5);
        assert_eq!(report.build.metabolic_rate, "High (Steady)");
        assert_eq!(report.recommendations.diet[0], "Cool, fresh foods");
    }
}
