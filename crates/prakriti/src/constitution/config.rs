use serde::{Deserialize, Serialize};

use super::domain::Dosha;

/// Policy knobs applied after the weight table has produced raw counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub combined_label_enabled: bool,
    pub closeness_threshold: u8,
    pub tie_break_order: TieBreakOrder,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            combined_label_enabled: true,
            closeness_threshold: 10,
            tie_break_order: TieBreakOrder::default(),
        }
    }
}

/// Precedence used when raw counters are exactly equal. Always a permutation
/// of the three categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Dosha>", into = "Vec<Dosha>")]
pub struct TieBreakOrder([Dosha; 3]);

impl TieBreakOrder {
    pub fn new(order: [Dosha; 3]) -> Result<Self, ScorerConfigError> {
        for dosha in Dosha::ALL {
            if !order.contains(&dosha) {
                return Err(ScorerConfigError::TieBreakMissing(dosha));
            }
        }
        Ok(Self(order))
    }

    /// Parses a comma separated list such as `pitta,vata,kapha`.
    pub fn parse_list(raw: &str) -> Result<Self, ScorerConfigError> {
        let parsed = raw
            .split(',')
            .map(|part| {
                Dosha::parse(part)
                    .ok_or_else(|| ScorerConfigError::UnknownCategory(part.trim().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(parsed)
    }

    pub fn first(&self) -> Dosha {
        self.0[0]
    }

    pub fn as_slice(&self) -> &[Dosha; 3] {
        &self.0
    }

    /// Lower values win ties.
    pub fn rank(&self, dosha: Dosha) -> usize {
        self.0
            .iter()
            .position(|candidate| *candidate == dosha)
            .unwrap_or(self.0.len())
    }
}

impl Default for TieBreakOrder {
    fn default() -> Self {
        Self([Dosha::Vata, Dosha::Pitta, Dosha::Kapha])
    }
}

impl TryFrom<Vec<Dosha>> for TieBreakOrder {
    type Error = ScorerConfigError;

    fn try_from(value: Vec<Dosha>) -> Result<Self, Self::Error> {
        let order: [Dosha; 3] = value
            .try_into()
            .map_err(|rejected: Vec<Dosha>| ScorerConfigError::TieBreakLength(rejected.len()))?;
        Self::new(order)
    }
}

impl From<TieBreakOrder> for Vec<Dosha> {
    fn from(value: TieBreakOrder) -> Self {
        value.0.to_vec()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScorerConfigError {
    #[error("tie-break order must list exactly three categories, found {0}")]
    TieBreakLength(usize),
    #[error("tie-break order is missing {0}")]
    TieBreakMissing(Dosha),
    #[error("unknown constitution category '{0}'")]
    UnknownCategory(String),
}
