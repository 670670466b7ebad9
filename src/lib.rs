pub mod election;
pub mod formats;
pub mod model;
pub mod report;
pub mod tabulator;
pub mod util;

pub use model::{Ballot, FinalResult, RankedVoteCounts, StageResult, VoteOption};
pub use tabulator::{ScoringMode, TabulationError, Tabulator, TabulatorConfig};
