use super::{Ballot, ModelError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-option vote counts for one round, indexed by rank position.
///
/// `vote_counts` always has one slot per registered option, even once some
/// options have been eliminated and those slots can no longer fill up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedVoteCounts {
    vote_counts: Vec<u64>,
    borda_score: i64,
    tally_count: u64,
}

impl RankedVoteCounts {
    pub fn num_options(&self) -> usize {
        self.vote_counts.len()
    }

    pub fn vote_counts(&self) -> &[u64] {
        &self.vote_counts
    }

    /// Votes received at rank 0.
    pub fn first_rank(&self) -> u64 {
        self.vote_counts.first().copied().unwrap_or(0)
    }

    pub fn borda_score(&self) -> i64 {
        self.borda_score
    }

    pub fn tally_count(&self) -> u64 {
        self.tally_count
    }

    /// Whether any rank position holds a vote.
    pub fn has_votes(&self) -> bool {
        self.vote_counts.iter().any(|&count| count > 0)
    }
}

/// Mutable accumulator used while a round is being counted.
#[derive(Debug, Clone)]
pub struct RankedVoteCountsBuilder {
    vote_counts: Vec<u64>,
}

impl RankedVoteCountsBuilder {
    pub fn new(num_options: usize) -> RankedVoteCountsBuilder {
        RankedVoteCountsBuilder {
            vote_counts: vec![0; num_options],
        }
    }

    pub fn add_vote(&mut self, rank: usize) -> Result<()> {
        let num_options = self.vote_counts.len();
        match self.vote_counts.get_mut(rank) {
            Some(count) => {
                *count += 1;
                Ok(())
            }
            None => Err(ModelError::RankOutOfRange { rank, num_options }),
        }
    }

    /// Freeze the counts and derive the scalar scores.
    ///
    /// Rank `i` contributes `count * (borda_weight - i)`, which goes negative
    /// once `i` exceeds the weight.
    pub fn finish(self, borda_weight: u32) -> RankedVoteCounts {
        let weight = i64::from(borda_weight);
        let mut borda_score = 0i64;
        let mut tally_count = 0u64;

        for (rank, &count) in self.vote_counts.iter().enumerate() {
            borda_score += count as i64 * (weight - rank as i64);
            tally_count += count;
        }

        RankedVoteCounts {
            vote_counts: self.vote_counts,
            borda_score,
            tally_count,
        }
    }
}

/// Snapshot of one round: counts for every registered option plus the
/// ballots that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    ranked_vote_counts: IndexMap<String, RankedVoteCounts>,
    ballots: Vec<Ballot>,
}

impl StageResult {
    pub(crate) fn new(
        ranked_vote_counts: IndexMap<String, RankedVoteCounts>,
        ballots: Vec<Ballot>,
    ) -> StageResult {
        StageResult {
            ranked_vote_counts,
            ballots,
        }
    }

    /// Counts keyed by option name, in option registration order.
    pub fn ranked_vote_counts(&self) -> &IndexMap<String, RankedVoteCounts> {
        &self.ranked_vote_counts
    }

    pub fn counts_for(&self, option: &str) -> Option<&RankedVoteCounts> {
        self.ranked_vote_counts.get(option)
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn first_rank_votes(&self) -> IndexMap<String, u64> {
        self.ranked_vote_counts
            .iter()
            .map(|(name, counts)| (name.clone(), counts.first_rank()))
            .collect()
    }

    /// Options holding at least one first-choice vote.
    pub fn options_with_first_rank_votes(&self) -> Vec<&str> {
        self.ranked_vote_counts
            .iter()
            .filter(|(_, counts)| counts.first_rank() > 0)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Options holding a vote at any rank.
    pub fn options_with_votes(&self) -> Vec<&str> {
        self.ranked_vote_counts
            .iter()
            .filter(|(_, counts)| counts.has_votes())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Outcome of a complete election: every round in order, then either a
/// winner, a set of options left tied, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResult {
    pub total_num_voters: usize,
    pub stage_results: Vec<StageResult>,
    pub winner: Option<String>,
    pub tie_options: Option<Vec<String>>,
}

impl FinalResult {
    pub fn num_rounds(&self) -> usize {
        self.stage_results.len()
    }

    pub fn last_stage(&self) -> Option<&StageResult> {
        self.stage_results.last()
    }
}
