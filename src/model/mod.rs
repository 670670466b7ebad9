pub mod election;
pub mod stage;

pub use election::{Ballot, VoteOption};
pub use stage::{FinalResult, RankedVoteCounts, RankedVoteCountsBuilder, StageResult};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("vote rank {rank} is outside the {num_options} available rank positions")]
    RankOutOfRange { rank: usize, num_options: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
