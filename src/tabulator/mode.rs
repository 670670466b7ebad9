use super::{Result, TabulationError};
use crate::model::RankedVoteCounts;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Raw scoring selection as supplied by a caller.
///
/// A `borda_weight` of zero leaves Borda scoring off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabulatorConfig {
    pub borda_weight: u32,
    pub use_tally: bool,
}

/// Which per-option figure decides majorities and eliminations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScoringMode {
    /// First-choice votes.
    Plurality,
    /// Positional score `sum(count[i] * (weight - i))`.
    Borda { weight: u32 },
    /// Mentions at any rank.
    Tally,
}

impl Default for ScoringMode {
    fn default() -> Self {
        ScoringMode::Plurality
    }
}

impl ScoringMode {
    pub fn from_config(config: &TabulatorConfig) -> Result<ScoringMode> {
        match (config.borda_weight, config.use_tally) {
            (0, false) => Ok(ScoringMode::Plurality),
            (0, true) => Ok(ScoringMode::Tally),
            (weight, false) => Ok(ScoringMode::Borda { weight }),
            (_, true) => Err(TabulationError::ConflictingModes),
        }
    }

    /// Weight applied when deriving Borda scores. Zero outside Borda mode.
    pub fn borda_weight(&self) -> u32 {
        match self {
            ScoringMode::Borda { weight } => *weight,
            _ => 0,
        }
    }

    pub fn metric(&self, counts: &RankedVoteCounts) -> i64 {
        match self {
            ScoringMode::Plurality => counts.first_rank() as i64,
            ScoringMode::Borda { .. } => counts.borda_score(),
            ScoringMode::Tally => counts.tally_count() as i64,
        }
    }
}

impl Display for ScoringMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringMode::Plurality => write!(f, "plurality"),
            ScoringMode::Borda { weight } => write!(f, "borda (weight {})", weight),
            ScoringMode::Tally => write!(f, "tally"),
        }
    }
}
