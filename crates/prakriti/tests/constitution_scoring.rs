use prakriti::constitution::domain::{
    Appetite, BodyFrame, BowelPattern, EnergyPattern, FoodPreference, Sex, SkinType, SleepPattern,
};
use prakriti::constitution::{
    score, ConstitutionLabel, ConstitutionResult, ConstitutionScorer, Dosha, IntakeAnswers,
    ScoreAccumulator, ScorerConfig, TieBreakOrder, WeightProfile, FALLBACK_DISTRIBUTION,
};

fn result_for(vata: u32, pitta: u32, kapha: u32) -> ConstitutionResult {
    ConstitutionResult::from_counters(
        ScoreAccumulator::new(vata, pitta, kapha),
        Vec::new(),
        &ScorerConfig::default(),
    )
}

fn shares(result: &ConstitutionResult) -> (u8, u8, u8) {
    (
        result.vata_percentage(),
        result.pitta_percentage(),
        result.kapha_percentage(),
    )
}

#[test]
fn percentages_always_sum_to_one_hundred() {
    for vata in 0..=20 {
        for pitta in 0..=20 {
            for kapha in 0..=20 {
                let result = result_for(vata, pitta, kapha);
                let (v, p, k) = shares(&result);
                assert_eq!(
                    u32::from(v) + u32::from(p) + u32::from(k),
                    100,
                    "counters ({vata}, {pitta}, {kapha}) gave {v}/{p}/{k}"
                );
                assert!(v <= 100 && p <= 100 && k <= 100);
            }
        }
    }
}

#[test]
fn zero_counters_fall_back_to_neutral_split() {
    let result = result_for(0, 0, 0);

    assert_eq!(shares(&result), FALLBACK_DISTRIBUTION);
    assert!(result.is_fallback());
    assert_eq!(result.dominant(), Dosha::Vata);
    assert_eq!(result.combined_label(), None);
}

#[test]
fn fallback_dominant_follows_configured_tie_break() {
    let config = ScorerConfig {
        tie_break_order: TieBreakOrder::new([Dosha::Kapha, Dosha::Vata, Dosha::Pitta])
            .expect("valid order"),
        ..ScorerConfig::default()
    };

    let result = score(&IntakeAnswers::default(), &config);

    assert!(result.is_fallback());
    assert_eq!(result.dominant(), Dosha::Kapha);
}

#[test]
fn adding_weight_moves_shares_toward_that_category() {
    for vata in 0..=12 {
        for pitta in 0..=12 {
            for kapha in 0..=12 {
                let base = result_for(vata, pitta, kapha);
                if base.is_fallback() {
                    continue;
                }
                let more_vata = result_for(vata + 1, pitta, kapha);
                let more_pitta = result_for(vata, pitta + 1, kapha);
                let more_kapha = result_for(vata, pitta, kapha + 1);

                assert!(more_vata.vata_percentage() >= base.vata_percentage());
                assert!(more_pitta.pitta_percentage() >= base.pitta_percentage());
                assert!(more_kapha.kapha_percentage() >= base.kapha_percentage());

                // The other two shares cannot both rise.
                assert!(
                    !(more_vata.pitta_percentage() > base.pitta_percentage()
                        && more_vata.kapha_percentage() > base.kapha_percentage())
                );
                assert!(
                    !(more_pitta.vata_percentage() > base.vata_percentage()
                        && more_pitta.kapha_percentage() > base.kapha_percentage())
                );
                assert!(
                    !(more_kapha.vata_percentage() > base.vata_percentage()
                        && more_kapha.pitta_percentage() > base.pitta_percentage())
                );
            }
        }
    }
}

#[test]
fn dominant_uses_raw_counters_even_when_rounding_disagrees() {
    let result = result_for(344, 313, 343);

    assert_eq!(shares(&result), (34, 31, 35));
    assert_eq!(result.dominant(), Dosha::Vata);
    // The combined label ranks by displayed percentage.
    assert_eq!(
        result.label(),
        ConstitutionLabel::Combined(Dosha::Kapha, Dosha::Vata)
    );
}

#[test]
fn assessment_profile_example_matches_expected_split() {
    let result = result_for(2, 7, 2);

    assert_eq!(shares(&result), (18, 64, 18));
    assert_eq!(result.dominant(), Dosha::Pitta);
    assert_eq!(result.label(), ConstitutionLabel::Single(Dosha::Pitta));
}

#[test]
fn scoring_is_deterministic_for_identical_answers() {
    let answers = IntakeAnswers {
        age: Some(34),
        sex: Some(Sex::Male),
        weight_kg: Some(72.0),
        skin_type: Some(SkinType::Oily),
        bowel_pattern: Some(BowelPattern::Loose),
        sleep_pattern: Some(SleepPattern::Sound),
        appetite: Some(Appetite::Strong),
        energy_pattern: Some(EnergyPattern::Intense),
        food_preferences: vec![FoodPreference::Sweet, FoodPreference::Spicy],
        medical_history: Some("Occasional acidity".to_string()),
        ..IntakeAnswers::default()
    };
    let scorer = ConstitutionScorer::default();

    let first = scorer.score(&answers);
    let second = scorer.score(&answers);

    assert_eq!(first, second);
    assert_eq!(first.dominant(), Dosha::Pitta);
    assert!(!first.components().is_empty());
}

#[test]
fn body_frame_counts_only_without_body_weight() {
    let scorer = ConstitutionScorer::default();
    let framed = IntakeAnswers {
        body_frame: Some(BodyFrame::Heavy),
        ..IntakeAnswers::default()
    };
    let weighed = IntakeAnswers {
        weight_kg: Some(50.0),
        ..framed.clone()
    };

    assert_eq!(scorer.score(&framed).counters(), ScoreAccumulator::new(0, 0, 3));
    assert_eq!(
        scorer.score(&weighed).counters(),
        ScoreAccumulator::new(15, 0, 0)
    );
}

#[test]
fn assessment_profile_ignores_demographics() {
    let scorer = ConstitutionScorer::new(WeightProfile::Assessment.table(), ScorerConfig::default());
    let answers = IntakeAnswers {
        age: Some(70),
        sex: Some(Sex::Female),
        weight_kg: Some(95.0),
        ..IntakeAnswers::default()
    };

    assert!(scorer.score(&answers).is_fallback());
}
