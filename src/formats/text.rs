//! Line-oriented ballot format.
//!
//! ```text
//! # comment
//! @options: A, B, C
//! alice: A > B > C
//! B > A
//! ```
//!
//! A line without a `voter:` prefix is an anonymous ballot and is named
//! after its line number. Without an `@options` header the options are
//! taken from the ballots in order of first appearance.

use super::{anonymous_voter, ElectionInput, FormatError, Result};
use crate::model::{Ballot, VoteOption};
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::{char, space0};
use nom::combinator::{all_consuming, map, opt, verify};
use nom::multi::{separated_list0, separated_list1};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::{Finish, IResult};

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Options(Vec<&'a str>),
    Ballot {
        voter: Option<&'a str>,
        ranking: Vec<&'a str>,
    },
}

fn is_name_char(c: char) -> bool {
    !matches!(c, '>' | ':' | ',' | '#' | '@')
}

fn name(input: &str) -> IResult<&str, &str> {
    verify(map(take_while1(is_name_char), str::trim), |s: &str| {
        !s.is_empty()
    })(input)
}

fn options_header(input: &str) -> IResult<&str, Vec<&str>> {
    preceded(
        tuple((char('@'), tag_no_case("options"), space0, char(':'))),
        separated_list1(char(','), name),
    )(input)
}

fn ranking(input: &str) -> IResult<&str, Vec<&str>> {
    delimited(space0, separated_list0(char('>'), name), space0)(input)
}

fn ballot_line(input: &str) -> IResult<&str, (Option<&str>, Vec<&str>)> {
    pair(opt(terminated(name, char(':'))), ranking)(input)
}

fn line(input: &str) -> IResult<&str, Line<'_>> {
    alt((
        map(options_header, Line::Options),
        map(ballot_line, |(voter, ranking)| Line::Ballot { voter, ranking }),
    ))(input)
}

fn parse_line(content: &str, line_number: usize) -> Result<Line<'_>> {
    all_consuming(line)(content)
        .finish()
        .map(|(_, parsed)| parsed)
        .map_err(|e| FormatError::Parse {
            line: line_number,
            message: format!("unexpected input {:?}", e.input),
        })
}

pub fn parse_election(contents: &str) -> Result<ElectionInput> {
    let mut options: Option<Vec<VoteOption>> = None;
    let mut ballots = Vec::new();

    for (index, raw_line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let content = raw_line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        match parse_line(content, line_number)? {
            Line::Options(names) => {
                if options.is_some() {
                    return Err(FormatError::Parse {
                        line: line_number,
                        message: "options declared more than once".to_string(),
                    });
                }
                options = Some(names.into_iter().map(VoteOption::new).collect());
            }
            Line::Ballot { voter, ranking } => {
                let voter = voter
                    .map(str::to_string)
                    .unwrap_or_else(|| anonymous_voter(line_number));
                ballots.push(Ballot::new(
                    voter,
                    ranking.into_iter().map(str::to_string).collect(),
                ));
            }
        }
    }

    Ok(match options {
        Some(options) => ElectionInput { options, ballots },
        None => ElectionInput::from_ballots(ballots),
    })
}
