use super::CommandResult;
use colored::*;
use itertools::Itertools;
use ranked_tally::election;
use ranked_tally::formats::read_election;
use ranked_tally::report::ElectionReport;
use ranked_tally::util::write_serialized;
use ranked_tally::{Tabulator, TabulatorConfig};
use std::path::Path;

/// Run an instant-runoff election over a ballot file and print each round.
pub fn tabulate(input: &Path, config: TabulatorConfig, out: Option<&Path>) -> CommandResult {
    let election_input = read_election(input)?;
    let tabulator = Tabulator::from_config(election_input.options, &config)?;

    println!(
        "🚀 Tabulating {} ballots ({} mode)",
        election_input.ballots.len().to_string().bright_yellow(),
        tabulator.mode().to_string().bright_cyan()
    );

    let result = election::run(&tabulator, &election_input.ballots)?;
    let report = ElectionReport::from_final_result(&result, tabulator.mode());

    for round in &report.rounds {
        println!("\n{}", format!("Round {}", round.round).bright_cyan().bold());

        for (option, score) in round.score.iter().sorted_by(|a, b| b.1.cmp(a.1)) {
            let line = format!(
                "    {:>8}  {:>6}  {}",
                score,
                round.first_choice.get(option).copied().unwrap_or(0),
                option
            );
            if round.eliminated.contains(option) {
                println!("{}", line.red());
            } else if report.winner.as_ref() == Some(option) {
                println!("{}", line.bright_green().bold());
            } else {
                println!("{}", line);
            }
        }

        if round.exhausted_ballots > 0 {
            println!("    {} exhausted ballots", round.exhausted_ballots);
        }
        if !round.eliminated.is_empty() {
            println!("    ❌ eliminated: {}", round.eliminated.join(", "));
        }
    }

    println!();
    match (&report.winner, &report.tied) {
        (Some(winner), _) => println!("🏆 Winner: {}", winner.bright_green().bold()),
        (None, Some(tied)) => println!("🤝 Tied: {}", tied.join(", ").bright_yellow().bold()),
        (None, None) => println!("{}", "No winner: every ballot exhausted".yellow()),
    }

    if let Some(out) = out {
        write_serialized(out, &report)?;
        println!(
            "✅ Report written to {}",
            out.display().to_string().bright_green()
        );
    }

    Ok(())
}
