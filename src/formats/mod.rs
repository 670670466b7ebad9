//! Ballot file readers.

pub mod json;
pub mod text;

use crate::model::{Ballot, VoteOption};
use itertools::Itertools;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, FormatError>;

/// Options and ballots as read from a file, before tabulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionInput {
    pub options: Vec<VoteOption>,
    pub ballots: Vec<Ballot>,
}

impl ElectionInput {
    /// Build an input whose options are every name mentioned on the
    /// ballots, in order of first appearance.
    pub fn from_ballots(ballots: Vec<Ballot>) -> ElectionInput {
        let options = ballots
            .iter()
            .flat_map(|ballot| ballot.ranking.iter())
            .unique()
            .map(|name| VoteOption::new(name.as_str()))
            .collect();

        ElectionInput { options, ballots }
    }
}

fn anonymous_voter(position: usize) -> String {
    format!("ballot-{}", position)
}

/// Read an election file, choosing the reader by extension: `.json` files
/// are read as JSON, everything else as the line-oriented text format.
pub fn read_election(path: &Path) -> Result<ElectionInput> {
    let contents = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        json::parse_election(&contents)
    } else {
        text::parse_election(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ballots_orders_options_by_first_appearance() {
        let ballots = vec![
            Ballot::new("a".to_string(), vec!["B".to_string(), "C".to_string()]),
            Ballot::new("b".to_string(), vec!["A".to_string(), "B".to_string()]),
        ];

        let input = ElectionInput::from_ballots(ballots);

        let names: Vec<&str> = input.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }
}
