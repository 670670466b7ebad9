use super::CommandResult;
use colored::*;
use itertools::Itertools;
use ranked_tally::formats::read_election;
use std::collections::HashMap;
use std::path::Path;

/// Validate an election file and describe its contents.
pub fn info(input: &Path) -> CommandResult {
    let election = read_election(input)?;

    println!("📂 {}", input.display().to_string().bright_cyan());
    println!(
        "👥 {} options: {}",
        election.options.len().to_string().bright_yellow(),
        election.options.iter().join(", ")
    );
    println!(
        "🗳  {} ballots",
        election.ballots.len().to_string().bright_yellow()
    );

    let mut first_choices: HashMap<&str, usize> = HashMap::new();
    let mut empty = 0;
    for ballot in &election.ballots {
        match ballot.first_choice() {
            Some(choice) => *first_choices.entry(choice).or_insert(0) += 1,
            None => empty += 1,
        }
    }

    for option in &election.options {
        let count = first_choices.get(option.name.as_str()).copied().unwrap_or(0);
        println!("    {:>6}  {}", count.to_string().bright_white(), option.name);
    }

    let lengths = election.ballots.iter().map(|b| b.len()).counts();
    for (length, count) in lengths.into_iter().sorted() {
        println!("    {} ballots rank {} options", count, length);
    }

    if empty > 0 {
        println!("⚠️  {} empty ballots", empty.to_string().yellow());
    }

    Ok(())
}
