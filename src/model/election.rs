use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// A choice that can be ranked on a ballot, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteOption {
    pub name: String,
}

impl VoteOption {
    pub fn new(name: impl Into<String>) -> VoteOption {
        VoteOption { name: name.into() }
    }
}

impl Display for VoteOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for VoteOption {
    fn from(name: &str) -> Self {
        VoteOption::new(name)
    }
}

/// One voter's preferences, most preferred first.
///
/// Each option name is expected to appear at most once. The voter id is
/// carried along for traceability and never affects counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter: String,
    pub ranking: Vec<String>,
}

impl Ballot {
    pub fn new(voter: String, ranking: Vec<String>) -> Ballot {
        Ballot { voter, ranking }
    }

    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    /// The voter's top remaining choice, if any.
    pub fn first_choice(&self) -> Option<&str> {
        self.ranking.first().map(|s| s.as_str())
    }

    pub fn contains(&self, option: &str) -> bool {
        self.ranking.iter().any(|o| o == option)
    }

    /// Copy of this ballot with every option in `removed` dropped; the
    /// remaining options keep their relative order.
    pub fn without(&self, removed: &HashSet<&str>) -> Ballot {
        Ballot {
            voter: self.voter.clone(),
            ranking: self
                .ranking
                .iter()
                .filter(|option| !removed.contains(option.as_str()))
                .cloned()
                .collect(),
        }
    }
}
