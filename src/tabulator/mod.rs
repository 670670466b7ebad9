//! Round-by-round instant-runoff tabulation.
//!
//! A [`Tabulator`] is fixed to one option registry and one [`ScoringMode`].
//! Each call works on a single round and never touches another round's
//! ballots, so a caller drives the election by looping
//! `tally -> find_winner -> find_losers -> advance`.

mod mode;

pub use mode::{ScoringMode, TabulatorConfig};

use crate::model::{Ballot, ModelError, RankedVoteCountsBuilder, StageResult, VoteOption};
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashSet;

/// Share of the round total an option must strictly exceed to win.
const MAJORITY_SHARE: f64 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum TabulationError {
    #[error("options are required")]
    NoOptions,
    #[error("option {0:?} is registered more than once")]
    DuplicateOption(String),
    #[error("Borda scoring requires a positive weight")]
    InvalidBordaWeight,
    #[error("Borda scoring and tally counting cannot both be enabled")]
    ConflictingModes,
    #[error("no option has votes left to eliminate")]
    NothingToEliminate,
    #[error("losers must be passed to build the next round")]
    EmptyLosers,
    #[error("ballot {voter:?} ranks unregistered option {option:?}")]
    UnknownOption { voter: String, option: String },
    #[error("Malformed ballot: {0}")]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TabulationError>;

#[derive(Debug, Clone)]
pub struct Tabulator {
    options: Vec<VoteOption>,
    mode: ScoringMode,
}

impl Tabulator {
    pub fn new(options: Vec<VoteOption>, mode: ScoringMode) -> Result<Tabulator> {
        if options.is_empty() {
            return Err(TabulationError::NoOptions);
        }

        if let ScoringMode::Borda { weight: 0 } = mode {
            return Err(TabulationError::InvalidBordaWeight);
        }

        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.name.as_str()) {
                return Err(TabulationError::DuplicateOption(option.name.clone()));
            }
        }

        Ok(Tabulator { options, mode })
    }

    pub fn from_config(options: Vec<VoteOption>, config: &TabulatorConfig) -> Result<Tabulator> {
        if options.is_empty() {
            return Err(TabulationError::NoOptions);
        }
        let mode = ScoringMode::from_config(config)?;
        Tabulator::new(options, mode)
    }

    pub fn options(&self) -> &[VoteOption] {
        &self.options
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Count one round of ballots into a [`StageResult`].
    ///
    /// Every registered option gets an entry, including options no ballot
    /// mentions. The ballots are copied into the result.
    pub fn tally(&self, ballots: &[Ballot]) -> Result<StageResult> {
        let num_options = self.options.len();
        let mut builders: IndexMap<&str, RankedVoteCountsBuilder> = self
            .options
            .iter()
            .map(|option| {
                (
                    option.name.as_str(),
                    RankedVoteCountsBuilder::new(num_options),
                )
            })
            .collect();

        for ballot in ballots {
            for (rank, option) in ballot.ranking.iter().enumerate() {
                let builder = builders.get_mut(option.as_str()).ok_or_else(|| {
                    TabulationError::UnknownOption {
                        voter: ballot.voter.clone(),
                        option: option.clone(),
                    }
                })?;
                builder.add_vote(rank)?;
            }
        }

        let borda_weight = self.mode.borda_weight();
        let counts = builders
            .into_iter()
            .map(|(name, builder)| (name.to_string(), builder.finish(borda_weight)))
            .collect();

        Ok(StageResult::new(counts, ballots.to_vec()))
    }

    /// First option, in registration order, holding a strict majority of
    /// the round's total metric. A zero total never yields a winner.
    pub fn find_winner<'a>(&self, stage: &'a StageResult) -> Option<&'a str> {
        let counts = stage.ranked_vote_counts();
        let total: i64 = counts.values().map(|c| self.mode.metric(c)).sum();

        if total == 0 {
            return None;
        }

        counts
            .iter()
            .find(|(_, c)| self.mode.metric(c) as f64 / total as f64 > MAJORITY_SHARE)
            .map(|(name, _)| name.as_str())
    }

    /// Options to eliminate after a round with no winner, in registration
    /// order.
    ///
    /// The lowest metric is taken over options that still have a vote at
    /// some rank, but every option matching it is returned, including
    /// options with no votes at all. When the tie covers every option that
    /// still holds a first choice, the tie is broken by a one-round
    /// lookahead.
    pub fn find_losers(&self, stage: &StageResult) -> Result<Vec<String>> {
        let counts = stage.ranked_vote_counts();

        let lowest = counts
            .values()
            .filter(|c| c.has_votes())
            .map(|c| self.mode.metric(c))
            .min()
            .ok_or(TabulationError::NothingToEliminate)?;

        let losers: Vec<String> = counts
            .iter()
            .filter(|(_, c)| self.mode.metric(c) == lowest)
            .map(|(name, _)| name.clone())
            .collect();

        let num_viable = stage.options_with_first_rank_votes().len();
        if losers.len() == 1 || losers.len() != num_viable {
            tracing::debug!(lowest, ?losers, "lowest-scoring options");
            return Ok(losers);
        }

        tracing::debug!(lowest, ?losers, "every viable option tied, simulating eliminations");
        self.break_tie(stage, &losers)
    }

    /// Resolve a tie spanning all viable options.
    ///
    /// For each tied option, eliminate it alone, re-count, and sum the
    /// first choices then held by the other tied options. The options with
    /// the smallest sum lose. Only one round is simulated.
    fn break_tie(&self, stage: &StageResult, tied: &[String]) -> Result<Vec<String>> {
        let scores = tied
            .par_iter()
            .map(|candidate| -> Result<(String, u64)> {
                let hypothetical = self.advance(stage, std::slice::from_ref(candidate))?;
                let transferred: u64 = tied
                    .iter()
                    .filter(|other| *other != candidate)
                    .filter_map(|other| hypothetical.counts_for(other))
                    .map(|c| c.first_rank())
                    .sum();
                Ok((candidate.clone(), transferred))
            })
            .collect::<Result<Vec<_>>>()?;

        let fewest = scores
            .iter()
            .map(|(_, score)| *score)
            .min()
            .ok_or(TabulationError::NothingToEliminate)?;

        tracing::debug!(?scores, fewest, "elimination scenario scores");

        Ok(scores
            .into_iter()
            .filter(|(_, score)| *score == fewest)
            .map(|(name, _)| name)
            .collect())
    }

    /// Ballots for the next round: each current ballot with the losers
    /// removed, voter ids and remaining order kept.
    pub fn next_ballots(&self, stage: &StageResult, losers: &[String]) -> Result<Vec<Ballot>> {
        if losers.is_empty() {
            return Err(TabulationError::EmptyLosers);
        }

        let removed: HashSet<&str> = losers.iter().map(|s| s.as_str()).collect();
        Ok(stage
            .ballots()
            .iter()
            .map(|ballot| ballot.without(&removed))
            .collect())
    }

    /// Eliminate `losers` and count the resulting ballots.
    pub fn advance(&self, stage: &StageResult, losers: &[String]) -> Result<StageResult> {
        let ballots = self.next_ballots(stage, losers)?;
        self.tally(&ballots)
    }
}
