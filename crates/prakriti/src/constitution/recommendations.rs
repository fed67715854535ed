use serde::Serialize;

use super::domain::Dosha;

/// Balancing guidance for the leading category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    pub diet: Vec<&'static str>,
    pub lifestyle: Vec<&'static str>,
    pub exercises: Vec<&'static str>,
    pub precautions: Vec<&'static str>,
}

impl Recommendations {
    pub fn for_dosha(dosha: Dosha) -> Self {
        match dosha {
            Dosha::Vata => Self {
                diet: vec![
                    "Warm, cooked foods",
                    "Sweet, sour, salty tastes",
                    "Regular meal times",
                    "Avoid cold drinks",
                    "Include healthy fats",
                ],
                lifestyle: vec![
                    "Regular sleep schedule",
                    "Oil massage",
                    "Meditation",
                    "Avoid overstimulation",
                    "Stay warm",
                ],
                exercises: vec![
                    "Gentle yoga",
                    "Walking",
                    "Swimming",
                    "Tai chi",
                    "Avoid intense cardio",
                ],
                precautions: vec![
                    "Avoid irregular eating",
                    "Manage stress",
                    "Stay hydrated",
                    "Avoid cold weather",
                    "Regular routine",
                ],
            },
            Dosha::Pitta => Self {
                diet: vec![
                    "Cool, fresh foods",
                    "Sweet, bitter, astringent tastes",
                    "Avoid spicy foods",
                    "Regular hydration",
                    "Include cooling herbs",
                ],
                lifestyle: vec![
                    "Moderate exercise",
                    "Cool environment",
                    "Avoid excessive heat",
                    "Practice patience",
                    "Take breaks",
                ],
                exercises: vec![
                    "Moderate cardio",
                    "Swimming",
                    "Cycling",
                    "Yoga",
                    "Avoid hot yoga",
                ],
                precautions: vec![
                    "Avoid anger triggers",
                    "Stay cool",
                    "Moderate sun exposure",
                    "Avoid skipping meals",
                    "Manage competition",
                ],
            },
            Dosha::Kapha => Self {
                diet: vec![
                    "Light, warm foods",
                    "Pungent, bitter, astringent tastes",
                    "Avoid heavy meals",
                    "Include digestive spices",
                    "Reduce dairy intake",
                ],
                lifestyle: vec![
                    "Regular exercise",
                    "Stay active",
                    "Avoid daytime sleep",
                    "Stimulating activities",
                    "Social engagement",
                ],
                exercises: vec![
                    "Vigorous exercise",
                    "Running",
                    "Weight training",
                    "Hot yoga",
                    "High-intensity activities",
                ],
                precautions: vec![
                    "Avoid overeating",
                    "Stay active",
                    "Avoid excessive sleep",
                    "Manage weight",
                    "Avoid cold, damp conditions",
                ],
            },
        }
    }
}
