//! End-to-end checks of the round operations through the public API.

use ranked_tally::{
    election, Ballot, ScoringMode, StageResult, TabulationError, Tabulator, TabulatorConfig,
    VoteOption,
};

fn tabulator(names: &[&str], mode: ScoringMode) -> Tabulator {
    Tabulator::new(names.iter().map(|&n| VoteOption::new(n)).collect(), mode).unwrap()
}

fn ballots(groups: &[(usize, &[&str])]) -> Vec<Ballot> {
    let mut result = Vec::new();
    for (count, ranking) in groups {
        for _ in 0..*count {
            result.push(Ballot::new(
                format!("voter-{}", result.len() + 1),
                ranking.iter().map(|s| s.to_string()).collect(),
            ));
        }
    }
    result
}

fn first_rank(stage: &StageResult, option: &str) -> u64 {
    stage.counts_for(option).unwrap().first_rank()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_first_round_majority_needs_no_elimination() {
    let tab = tabulator(&["A", "B", "C"], ScoringMode::Plurality);
    let stage = tab
        .tally(&ballots(&[(3, &["A", "B", "C"]), (2, &["B", "A", "C"])]))
        .unwrap();

    assert_eq!(first_rank(&stage, "A"), 3);
    assert_eq!(first_rank(&stage, "B"), 2);
    assert_eq!(first_rank(&stage, "C"), 0);
    assert_eq!(tab.find_winner(&stage), Some("A"));
}

#[test]
fn test_elimination_transfers_votes() {
    let tab = tabulator(&["A", "B", "C"], ScoringMode::Plurality);
    let round1 = tab
        .tally(&ballots(&[
            (4, &["A", "B", "C"]),
            (3, &["B", "C", "A"]),
            (2, &["C", "A", "B"]),
        ]))
        .unwrap();

    assert_eq!(tab.find_winner(&round1), None);
    let losers = tab.find_losers(&round1).unwrap();
    assert_eq!(losers, names(&["C"]));

    let round2 = tab.advance(&round1, &losers).unwrap();
    let rankings: Vec<&Vec<String>> = round2.ballots().iter().map(|b| &b.ranking).collect();
    assert_eq!(rankings.iter().filter(|r| ***r == names(&["A", "B"])).count(), 6);
    assert_eq!(rankings.iter().filter(|r| ***r == names(&["B", "A"])).count(), 3);

    assert_eq!(first_rank(&round2, "A"), 6);
    assert_eq!(first_rank(&round2, "B"), 3);
    assert_eq!(tab.find_winner(&round2), Some("A"));
}

#[test]
fn test_full_tie_escalates_to_lookahead() {
    let tab = tabulator(&["A", "B", "C"], ScoringMode::Plurality);
    // C is already gone from every ballot. A and B hold one first choice
    // each, which is every option still holding one. Removing A passes its
    // ballot to B (2 votes move to the other tied option); removing B
    // exhausts its ballot (1 vote stays with A).
    let stage = tab.tally(&ballots(&[(1, &["A", "B"]), (1, &["B"])])).unwrap();

    assert_eq!(stage.options_with_first_rank_votes(), vec!["A", "B"]);
    assert_eq!(tab.find_losers(&stage).unwrap(), names(&["B"]));
}

#[test]
fn test_lookahead_with_three_way_tie() {
    let tab = tabulator(&["A", "B", "C"], ScoringMode::Plurality);
    // Removing A: B=2, C=1 -> 3. Removing B: A=1, C=2 -> 3.
    // Removing C: A=1, B=1 -> 2 (the C ballot exhausts).
    let stage = tab
        .tally(&ballots(&[(1, &["A", "B"]), (1, &["B", "C"]), (1, &["C"])]))
        .unwrap();

    assert_eq!(tab.find_winner(&stage), None);
    assert_eq!(tab.find_losers(&stage).unwrap(), names(&["C"]));
}

#[test]
fn test_borda_scores_and_negative_weighting() {
    let tab = tabulator(&["A", "B", "C"], ScoringMode::Borda { weight: 2 });
    let stage = tab.tally(&ballots(&[(1, &["A", "B", "C"])])).unwrap();

    assert_eq!(stage.counts_for("A").unwrap().borda_score(), 2);
    assert_eq!(stage.counts_for("B").unwrap().borda_score(), 1);
    assert_eq!(stage.counts_for("C").unwrap().borda_score(), 0);
    // 2 of a total of 3 points
    assert_eq!(tab.find_winner(&stage), Some("A"));
}

#[test]
fn test_borda_mode_eliminates_lowest_score() {
    let tab = tabulator(&["A", "B", "C"], ScoringMode::Borda { weight: 3 });
    // A: 2*3 + 1*2 = 8, B: 1*3 + 2*2 = 7, C: 3*1 = 3
    let stage = tab
        .tally(&ballots(&[(2, &["A", "B", "C"]), (1, &["B", "A", "C"])]))
        .unwrap();

    assert_eq!(tab.find_winner(&stage), None);
    assert_eq!(tab.find_losers(&stage).unwrap(), names(&["C"]));
}

#[test]
fn test_tally_mode_counts_all_mentions() {
    let tab = tabulator(&["A", "B", "C"], ScoringMode::Tally);
    let stage = tab
        .tally(&ballots(&[(2, &["A", "B"]), (1, &["C", "B"])]))
        .unwrap();

    assert_eq!(stage.counts_for("B").unwrap().tally_count(), 3);
    assert_eq!(stage.counts_for("A").unwrap().tally_count(), 2);
    // B holds 3 of 6 mentions, exactly half
    assert_eq!(tab.find_winner(&stage), None);
    assert_eq!(tab.find_losers(&stage).unwrap(), names(&["C"]));
}

#[test]
fn test_winner_threshold_is_strict() {
    let tab = tabulator(&["A", "B"], ScoringMode::Plurality);

    let half = tab.tally(&ballots(&[(50, &["A"]), (50, &["B"])])).unwrap();
    assert_eq!(tab.find_winner(&half), None);

    let just_over = tab.tally(&ballots(&[(51, &["A"]), (50, &["B"])])).unwrap();
    assert_eq!(tab.find_winner(&just_over), Some("A"));
}

#[test]
fn test_first_rank_total_matches_non_empty_ballots() {
    let tab = tabulator(&["A", "B", "C", "D"], ScoringMode::Plurality);
    let input = ballots(&[
        (3, &["A", "C"]),
        (2, &["D", "B", "A"]),
        (1, &[]),
        (4, &["C"]),
    ]);
    let stage = tab.tally(&input).unwrap();

    let total: u64 = stage.ranked_vote_counts().values().map(|c| c.first_rank()).sum();
    let non_empty = input.iter().filter(|b| !b.is_empty()).count() as u64;
    assert_eq!(total, non_empty);
    assert!(stage
        .ranked_vote_counts()
        .values()
        .all(|c| c.num_options() == 4));
}

#[test]
fn test_tally_is_idempotent() {
    let tab = tabulator(&["A", "B", "C"], ScoringMode::Borda { weight: 2 });
    let input = ballots(&[(2, &["B", "A", "C"]), (1, &["C"])]);

    assert_eq!(tab.tally(&input).unwrap(), tab.tally(&input).unwrap());
}

#[test]
fn test_losers_unchanged_by_option_order() {
    let input = ballots(&[
        (5, &["A", "B", "C", "D"]),
        (4, &["B", "A"]),
        (2, &["C", "D"]),
        (2, &["D", "C"]),
    ]);

    let forward = tabulator(&["A", "B", "C", "D"], ScoringMode::Plurality);
    let backward = tabulator(&["D", "C", "B", "A"], ScoringMode::Plurality);

    let mut forward_losers = forward.find_losers(&forward.tally(&input).unwrap()).unwrap();
    let mut backward_losers = backward.find_losers(&backward.tally(&input).unwrap()).unwrap();
    forward_losers.sort();
    backward_losers.sort();

    assert_eq!(forward_losers, names(&["C", "D"]));
    assert_eq!(forward_losers, backward_losers);
}

#[test]
fn test_advance_only_shrinks_ballots() {
    let tab = tabulator(&["A", "B", "C", "D"], ScoringMode::Plurality);
    let input = ballots(&[(2, &["D", "A", "B"]), (1, &["B", "D"]), (3, &["C"])]);
    let stage = tab.tally(&input).unwrap();

    let next = tab.advance(&stage, &names(&["D", "C"])).unwrap();

    for (before, after) in stage.ballots().iter().zip(next.ballots()) {
        assert_eq!(before.voter, after.voter);
        assert!(after.len() <= before.len());
        assert!(after.ranking.iter().all(|o| before.contains(o)));
    }
    assert_eq!(next.ballots()[0].ranking, names(&["A", "B"]));
}

#[test]
fn test_configuration_errors() {
    let config = TabulatorConfig {
        borda_weight: 2,
        use_tally: true,
    };
    assert!(matches!(
        Tabulator::from_config(vec![VoteOption::new("A")], &config),
        Err(TabulationError::ConflictingModes)
    ));
    assert!(matches!(
        Tabulator::new(Vec::new(), ScoringMode::Tally),
        Err(TabulationError::NoOptions)
    ));

    let tab = tabulator(&["A"], ScoringMode::Plurality);
    let stage = tab.tally(&ballots(&[(1, &["A"])])).unwrap();
    assert!(matches!(
        tab.advance(&stage, &[]),
        Err(TabulationError::EmptyLosers)
    ));
}

#[test]
fn test_full_election_records_every_round() {
    let tab = tabulator(&["A", "B", "C", "D"], ScoringMode::Plurality);
    let result = election::run(
        &tab,
        &ballots(&[
            (4, &["A", "B"]),
            (3, &["B", "C"]),
            (2, &["C", "B"]),
            (1, &["D", "B"]),
        ]),
    )
    .unwrap();

    // D out, then C, then B wins 6-4
    assert_eq!(result.num_rounds(), 3);
    assert_eq!(result.winner.as_deref(), Some("B"));
    assert_eq!(result.total_num_voters, 10);
    assert_eq!(first_rank(result.last_stage().unwrap(), "B"), 6);
}
