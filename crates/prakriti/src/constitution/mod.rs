//! Constitution scoring: intake answers in, a three-way Vata/Pitta/Kapha distribution out.
//!
//! The scorer is a pure function of its input. Weight tables decide how much
//! each answer counts, [`ScorerConfig`] decides how ties and close results are
//! labelled, and everything downstream (body metrics, recommendations, report
//! views) is derived from the returned [`ConstitutionResult`].

mod config;
pub mod domain;
mod import;
pub mod insights;
mod recommendations;
mod report;
mod scorer;
mod weights;

pub use config::{ScorerConfig, ScorerConfigError, TieBreakOrder};
pub use domain::{AnswerOption, Dosha, IntakeAnswers};
pub use import::{IntakeImportError, IntakeImporter, IntakeRow};
pub use insights::{BodyMetrics, ConstitutionalBuild};
pub use recommendations::Recommendations;
pub use report::{AssessmentReport, AssessmentSummary, AssessmentView, DistributionEntry};
pub use scorer::{
    score, ConstitutionLabel, ConstitutionResult, ConstitutionScorer, ScoreAccumulator,
    ScoreComponent, FALLBACK_DISTRIBUTION,
};
pub use weights::{
    AgeBrackets, BodyWeightBrackets, Categorized, Increment, KeywordGroup, Question,
    SexWeights, WeightProfile, WeightTable, WeightTableError,
};
