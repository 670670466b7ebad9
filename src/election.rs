//! Runs rounds until a winner emerges or the remaining options can no
//! longer be separated.

use crate::model::{Ballot, FinalResult, StageResult};
use crate::tabulator::{Result, Tabulator};
use std::collections::HashSet;

enum RoundOutcome {
    Winner(String),
    Tie(Vec<String>),
    Exhausted,
    Continue(StageResult),
}

/// Tabulate a full election from its initial ballots.
pub fn run(tabulator: &Tabulator, ballots: &[Ballot]) -> Result<FinalResult> {
    let mut result = FinalResult {
        total_num_voters: ballots.len(),
        ..FinalResult::default()
    };

    let mut stage = tabulator.tally(ballots)?;

    loop {
        tracing::debug!(
            round = result.stage_results.len() + 1,
            first_rank = ?stage.first_rank_votes(),
            "tabulated round"
        );

        let outcome = next_outcome(tabulator, &stage)?;
        result.stage_results.push(stage);

        match outcome {
            RoundOutcome::Winner(winner) => {
                tracing::info!(%winner, rounds = result.stage_results.len(), "winner found");
                result.winner = Some(winner);
                break;
            }
            RoundOutcome::Tie(options) => {
                tracing::info!(?options, rounds = result.stage_results.len(), "unresolved tie");
                result.tie_options = Some(options);
                break;
            }
            RoundOutcome::Exhausted => {
                tracing::info!(rounds = result.stage_results.len(), "every ballot exhausted");
                break;
            }
            RoundOutcome::Continue(next) => stage = next,
        }
    }

    Ok(result)
}

fn next_outcome(tabulator: &Tabulator, stage: &StageResult) -> Result<RoundOutcome> {
    if let Some(winner) = tabulator.find_winner(stage) {
        return Ok(RoundOutcome::Winner(winner.to_string()));
    }

    let remaining = stage.options_with_votes();
    if remaining.is_empty() {
        return Ok(RoundOutcome::Exhausted);
    }

    let losers = tabulator.find_losers(stage)?;
    let loser_set: HashSet<&str> = losers.iter().map(|s| s.as_str()).collect();
    let tied_remaining = || -> Vec<String> {
        remaining
            .iter()
            .filter(|option| loser_set.contains(*option))
            .map(|option| option.to_string())
            .collect()
    };

    if remaining.iter().all(|option| loser_set.contains(option)) {
        return Ok(RoundOutcome::Tie(tied_remaining()));
    }

    let next = tabulator.advance(stage, &losers)?;
    if next.ballots() == stage.ballots() {
        // Only options absent from every ballot were picked, so another
        // round would repeat this one.
        return Ok(RoundOutcome::Tie(tied_remaining()));
    }

    tracing::debug!(?losers, "eliminated");
    Ok(RoundOutcome::Continue(next))
}

/// Options eliminated between `stage` and the round after it.
pub fn eliminated_between(stage: &StageResult, next: Option<&StageResult>) -> Vec<String> {
    let next = match next {
        Some(next) => next,
        None => return Vec::new(),
    };

    stage
        .options_with_votes()
        .into_iter()
        .filter(|option| {
            next.counts_for(option)
                .map_or(true, |counts| !counts.has_votes())
        })
        .map(|option| option.to_string())
        .collect()
}
