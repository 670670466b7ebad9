use crate::election::eliminated_between;
use crate::model::FinalResult;
use crate::tabulator::ScoringMode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Serializable summary of a finished election.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionReport {
    pub mode: ScoringMode,
    #[serde(rename = "ballotCount")]
    pub ballot_count: usize,
    pub options: Vec<String>,
    pub rounds: Vec<RoundReport>,
    pub winner: Option<String>,
    pub tied: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: usize,
    #[serde(rename = "firstChoice")]
    pub first_choice: IndexMap<String, u64>,
    /// The figure the scoring mode decides on.
    pub score: IndexMap<String, i64>,
    #[serde(rename = "exhaustedBallots")]
    pub exhausted_ballots: usize,
    pub eliminated: Vec<String>,
}

impl ElectionReport {
    pub fn from_final_result(result: &FinalResult, mode: ScoringMode) -> ElectionReport {
        let options = result
            .stage_results
            .first()
            .map(|stage| stage.ranked_vote_counts().keys().cloned().collect())
            .unwrap_or_default();

        let rounds = result
            .stage_results
            .iter()
            .enumerate()
            .map(|(i, stage)| RoundReport {
                round: i + 1,
                first_choice: stage.first_rank_votes(),
                score: stage
                    .ranked_vote_counts()
                    .iter()
                    .map(|(name, counts)| (name.clone(), mode.metric(counts)))
                    .collect(),
                exhausted_ballots: stage.ballots().iter().filter(|b| b.is_empty()).count(),
                eliminated: eliminated_between(stage, result.stage_results.get(i + 1)),
            })
            .collect();

        ElectionReport {
            mode,
            ballot_count: result.total_num_voters,
            options,
            rounds,
            winner: result.winner.clone(),
            tied: result.tie_options.clone(),
        }
    }
}
