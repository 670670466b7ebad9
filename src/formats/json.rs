use super::{anonymous_voter, ElectionInput, Result};
use crate::model::{Ballot, VoteOption};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonElection {
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub ballots: Vec<JsonBallot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonBallot {
    #[serde(default)]
    pub voter: Option<String>,
    pub ranking: Vec<String>,
}

pub fn parse_election(contents: &str) -> Result<ElectionInput> {
    let raw: JsonElection = serde_json::from_str(contents)?;

    let ballots: Vec<Ballot> = raw
        .ballots
        .into_iter()
        .enumerate()
        .map(|(i, ballot)| {
            let voter = ballot.voter.unwrap_or_else(|| anonymous_voter(i + 1));
            Ballot::new(voter, ballot.ranking)
        })
        .collect();

    Ok(match raw.options {
        Some(options) => ElectionInput {
            options: options.into_iter().map(|name| VoteOption { name }).collect(),
            ballots,
        },
        None => ElectionInput::from_ballots(ballots),
    })
}
