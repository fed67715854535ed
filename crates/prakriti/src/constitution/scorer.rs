use std::fmt;

use serde::{Serialize, Serializer};

use super::config::ScorerConfig;
use super::domain::{Dosha, IntakeAnswers, Sex};
use super::weights::{Categorized, Increment, Question, WeightTable};

/// Neutral distribution returned when no answer carried any weight.
pub const FALLBACK_DISTRIBUTION: (u8, u8, u8) = (33, 34, 33);

/// Raw per-category totals before normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreAccumulator {
    vata: u32,
    pitta: u32,
    kapha: u32,
}

impl ScoreAccumulator {
    pub fn new(vata: u32, pitta: u32, kapha: u32) -> Self {
        Self { vata, pitta, kapha }
    }

    pub fn get(&self, dosha: Dosha) -> u32 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    /// Widened so that three saturated counters cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.vata) + u64::from(self.pitta) + u64::from(self.kapha)
    }

    fn add(&mut self, increment: Increment) {
        let slot = match increment.category {
            Dosha::Vata => &mut self.vata,
            Dosha::Pitta => &mut self.pitta,
            Dosha::Kapha => &mut self.kapha,
        };
        *slot = slot.saturating_add(increment.weight);
    }
}

/// Discrete contribution to a result, kept so practitioners can audit a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub question: Question,
    pub category: Dosha,
    pub weight: u32,
    pub notes: String,
}

/// Either the single leading category or a close pairing of the top two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstitutionLabel {
    Single(Dosha),
    Combined(Dosha, Dosha),
}

impl fmt::Display for ConstitutionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstitutionLabel::Single(dosha) => write!(f, "{dosha}"),
            ConstitutionLabel::Combined(first, second) => write!(f, "{first}-{second}"),
        }
    }
}

impl Serialize for ConstitutionLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Normalized distribution plus the trail that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstitutionResult {
    vata_percentage: u8,
    pitta_percentage: u8,
    kapha_percentage: u8,
    dominant: Dosha,
    label: ConstitutionLabel,
    counters: ScoreAccumulator,
    fallback: bool,
    components: Vec<ScoreComponent>,
}

impl ConstitutionResult {
    /// Normalizes raw counters into percentages and resolves the labels.
    pub fn from_counters(
        counters: ScoreAccumulator,
        components: Vec<ScoreComponent>,
        config: &ScorerConfig,
    ) -> Self {
        let total = counters.total();
        if total == 0 {
            let (vata, pitta, kapha) = FALLBACK_DISTRIBUTION;
            let dominant = config.tie_break_order.first();
            return Self {
                vata_percentage: vata,
                pitta_percentage: pitta,
                kapha_percentage: kapha,
                dominant,
                label: ConstitutionLabel::Single(dominant),
                counters,
                fallback: true,
                components,
            };
        }

        let vata = rounded_share(counters.vata, total);
        let mut pitta = rounded_share(counters.pitta, total);
        // Both shares can round up from .5 and overshoot by one.
        if vata + pitta > 100 {
            pitta = 100 - vata;
        }
        let kapha = 100 - vata - pitta;

        let dominant = dominant_category(&counters, config);
        let mut result = Self {
            vata_percentage: vata,
            pitta_percentage: pitta,
            kapha_percentage: kapha,
            dominant,
            label: ConstitutionLabel::Single(dominant),
            counters,
            fallback: false,
            components,
        };
        result.label = result.resolve_label(config);
        result
    }

    pub fn vata_percentage(&self) -> u8 {
        self.vata_percentage
    }

    pub fn pitta_percentage(&self) -> u8 {
        self.pitta_percentage
    }

    pub fn kapha_percentage(&self) -> u8 {
        self.kapha_percentage
    }

    pub fn percentage(&self, dosha: Dosha) -> u8 {
        match dosha {
            Dosha::Vata => self.vata_percentage,
            Dosha::Pitta => self.pitta_percentage,
            Dosha::Kapha => self.kapha_percentage,
        }
    }

    pub fn dominant(&self) -> Dosha {
        self.dominant
    }

    pub fn label(&self) -> ConstitutionLabel {
        self.label
    }

    /// Present only when the top two categories were too close to separate.
    pub fn combined_label(&self) -> Option<String> {
        match self.label {
            ConstitutionLabel::Combined(..) => Some(self.label.to_string()),
            ConstitutionLabel::Single(_) => None,
        }
    }

    pub fn counters(&self) -> ScoreAccumulator {
        self.counters
    }

    /// True when no answer carried weight and the neutral split was returned.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn components(&self) -> &[ScoreComponent] {
        &self.components
    }

    /// Categories ordered by percentage, then raw counter, then tie-break order.
    pub fn ranked(&self, config: &ScorerConfig) -> [Dosha; 3] {
        let mut ranked = Dosha::ALL;
        ranked.sort_by(|left, right| {
            self.percentage(*right)
                .cmp(&self.percentage(*left))
                .then_with(|| self.counters.get(*right).cmp(&self.counters.get(*left)))
                .then_with(|| {
                    config
                        .tie_break_order
                        .rank(*left)
                        .cmp(&config.tie_break_order.rank(*right))
                })
        });
        ranked
    }

    fn resolve_label(&self, config: &ScorerConfig) -> ConstitutionLabel {
        if !config.combined_label_enabled {
            return ConstitutionLabel::Single(self.dominant);
        }

        let [first, second, _] = self.ranked(config);
        let gap = self.percentage(first) - self.percentage(second);
        if gap < config.closeness_threshold {
            ConstitutionLabel::Combined(first, second)
        } else {
            ConstitutionLabel::Single(first)
        }
    }
}

/// `round(count / total * 100)` with halves rounded up, in exact integer math.
fn rounded_share(count: u32, total: u64) -> u8 {
    let count = u64::from(count);
    ((count * 200 + total) / (2 * total)) as u8
}

fn dominant_category(counters: &ScoreAccumulator, config: &ScorerConfig) -> Dosha {
    let order = config.tie_break_order.as_slice();
    let mut dominant = order[0];
    for candidate in &order[1..] {
        if counters.get(*candidate) > counters.get(dominant) {
            dominant = *candidate;
        }
    }
    dominant
}

/// Pure scorer pairing a weight table with the labelling policy.
#[derive(Debug, Clone)]
pub struct ConstitutionScorer {
    table: WeightTable,
    config: ScorerConfig,
}

impl Default for ConstitutionScorer {
    fn default() -> Self {
        Self::new(WeightTable::intake(), ScorerConfig::default())
    }
}

impl ConstitutionScorer {
    pub fn new(table: WeightTable, config: ScorerConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &WeightTable {
        &self.table
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn score(&self, answers: &IntakeAnswers) -> ConstitutionResult {
        let (counters, components) = self.accumulate(answers);
        ConstitutionResult::from_counters(counters, components, &self.config)
    }

    /// Applies the weight table without normalizing.
    pub fn accumulate(&self, answers: &IntakeAnswers) -> (ScoreAccumulator, Vec<ScoreComponent>) {
        let mut tally = Tally::default();
        let table = &self.table;

        if let (Some(age), Some(brackets)) = (answers.age, table.age) {
            tally.push(
                Question::Age,
                Increment {
                    category: brackets.category(age),
                    weight: brackets.weight,
                },
                format!("age {age}"),
            );
        }

        let sex_increment = match answers.sex {
            Some(Sex::Male) => table.sex.male,
            Some(Sex::Female) => table.sex.female,
            Some(Sex::Other) | None => None,
        };
        if let (Some(sex), Some(increment)) = (answers.sex, sex_increment) {
            tally.push(Question::Sex, increment, format!("sex {sex}"));
        }

        let weight_bracket = answers
            .weight_kg
            .zip(table.body_weight)
            .map(|(weight_kg, brackets)| (weight_kg, brackets.increment(weight_kg)));
        match weight_bracket {
            Some((weight_kg, increment)) => {
                tally.push(
                    Question::BodyWeight,
                    increment,
                    format!("body weight {weight_kg:.1} kg"),
                );
            }
            None => tally.option(table, answers.body_frame),
        }

        tally.option(table, answers.skin_type);
        tally.option(table, answers.hair_type);
        tally.option(table, answers.bowel_pattern);
        tally.option(table, answers.sleep_pattern);
        tally.option(table, answers.appetite);
        tally.option(table, answers.digestion);
        tally.option(table, answers.stress_level);
        tally.option(table, answers.stress_response);
        tally.option(table, answers.energy_pattern);
        tally.option(table, answers.temperature_preference);
        tally.option(table, answers.emotional_tendency);

        if let Some(history) = answers.medical_history.as_deref() {
            for group in &table.keyword_groups {
                if let Some(keyword) = group.first_match(history) {
                    tally.push(
                        Question::MedicalHistory,
                        Increment {
                            category: group.category,
                            weight: group.weight,
                        },
                        format!("medical history mentions '{keyword}'"),
                    );
                }
            }
        }

        for preference in &answers.food_preferences {
            tally.push(
                Question::FoodPreference,
                Increment {
                    category: preference.category(),
                    weight: table.food_preference,
                },
                format!("prefers {preference}"),
            );
        }

        (tally.counters, tally.components)
    }
}

#[derive(Default)]
struct Tally {
    counters: ScoreAccumulator,
    components: Vec<ScoreComponent>,
}

impl Tally {
    fn push(&mut self, question: Question, increment: Increment, notes: String) {
        if increment.weight == 0 {
            return;
        }
        self.counters.add(increment);
        self.components.push(ScoreComponent {
            question,
            category: increment.category,
            weight: increment.weight,
            notes,
        });
    }

    fn option<T>(&mut self, table: &WeightTable, answer: Option<T>)
    where
        T: Categorized + fmt::Display,
    {
        if let Some(answer) = answer {
            let increment = Increment {
                category: answer.category(),
                weight: table.question_weight(T::QUESTION),
            };
            self.push(
                T::QUESTION,
                increment,
                format!("{} {}", T::QUESTION.label(), answer),
            );
        }
    }
}

/// Scores with the intake weight table and the supplied policy.
pub fn score(answers: &IntakeAnswers, config: &ScorerConfig) -> ConstitutionResult {
    ConstitutionScorer::new(WeightTable::intake(), config.clone()).score(answers)
}
