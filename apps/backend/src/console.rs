//! Line commands and text rendering for the terminal runner.

use std::fmt::Write as _;

use crate::domain::evaluation::EvaluationResult;
use crate::domain::knowledge::KnowledgeBoard;
use crate::domain::round::{RoundId, RoundMode, RoundReview, RoundSummary, RoundView};
use crate::services::game_flow::SubmitResult;

pub const HISTORY_LIMIT: u64 = 10;

pub const HELP: &str = "\
<digits>     submit a guess
:new         abandon this round and start another (standard mode)
:hint        ask for a hint (Ctrl-C cancels)
:history     list recent rounds
:review <id> show a finished round
:mark <d>    cycle your note for digit d
:board       show your digit notes
:secret      reveal the secret (debug tools only)
:help        this text
:quit        leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Guess(String),
    NewRound,
    Hint,
    History,
    Review(RoundId),
    Mark(u8),
    Board,
    Secret,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// Anything not starting with `:` is a guess; the game validates it.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Some(ConsoleCommand::Guess(line.to_string())));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();

    let cmd = match (name.as_str(), arg) {
        ("new", None) => ConsoleCommand::NewRound,
        ("hint", None) => ConsoleCommand::Hint,
        ("history", None) => ConsoleCommand::History,
        ("board", None) => ConsoleCommand::Board,
        ("secret", None) => ConsoleCommand::Secret,
        ("help", None) => ConsoleCommand::Help,
        ("quit" | "q", None) => ConsoleCommand::Quit,
        ("mark", Some(d)) => match d.parse::<u8>() {
            Ok(d) if d <= 9 => ConsoleCommand::Mark(d),
            _ => return Err(format!("':mark' takes a single digit, got '{d}'")),
        },
        ("review", Some(id)) => match id.parse::<RoundId>() {
            Ok(id) => ConsoleCommand::Review(id),
            Err(_) => return Err(format!("':review' takes a round number, got '{id}'")),
        },
        ("mark", None) => return Err("':mark' needs a digit".to_string()),
        ("review", None) => return Err("':review' needs a round number".to_string()),
        _ => return Err(format!("Unknown command ':{name}'. Try ':help'")),
    };
    Ok(Some(cmd))
}

pub fn render_feedback(feedback: &EvaluationResult) -> String {
    if feedback.is_no_match {
        "no match".to_string()
    } else {
        format!(
            "{} exact, {} partial",
            feedback.exact_count, feedback.partial_count
        )
    }
}

pub fn render_submit(result: &SubmitResult) -> String {
    let mut out = format!(
        "#{} {}  {}",
        result.attempt_no,
        result.guess_text,
        render_feedback(&result.feedback)
    );
    if result.is_repeated {
        out.push_str("  (already tried)");
    }
    if result.did_win() {
        let _ = write!(out, "\nCracked it in {} attempts!", result.attempt_no);
    }
    out
}

fn mode_label(mode: RoundMode) -> String {
    match mode {
        RoundMode::Standard => "standard".to_string(),
        RoundMode::Daily(date) => format!("daily {date}"),
    }
}

pub fn render_round(view: &RoundView) -> String {
    let mut out = format!(
        "Round {} ({}, {}), {} digits",
        view.id,
        mode_label(view.mode),
        view.state,
        view.code_length
    );
    for (i, a) in view.attempts.iter().enumerate() {
        let _ = write!(
            out,
            "\n#{} {}  {}",
            i + 1,
            a.guess_text,
            render_feedback(&a.feedback())
        );
    }
    out
}

pub fn render_history(rounds: &[RoundSummary]) -> String {
    if rounds.is_empty() {
        return "No rounds yet".to_string();
    }
    rounds
        .iter()
        .map(|r| {
            format!(
                "Round {:>4}  {:<16} {:<11} {} attempts",
                r.id,
                mode_label(r.mode),
                r.state.to_string(),
                r.attempt_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_review(review: &RoundReview) -> String {
    let mut out = format!("Round {} ({})", review.id, review.state);
    for (i, a) in review.attempts.iter().enumerate() {
        let _ = write!(
            out,
            "\n#{} {}  {}",
            i + 1,
            a.guess_text,
            render_feedback(&a.feedback())
        );
    }
    match &review.secret {
        Some(code) => {
            let _ = write!(out, "\nSecret: {code}");
        }
        None => out.push_str("\nSecret: hidden"),
    }
    out
}

pub fn render_board(board: &KnowledgeBoard) -> String {
    let digits: String = board.entries().map(|(d, _)| format!("{d} ")).collect();
    let marks: String = board
        .entries()
        .map(|(_, m)| format!("{} ", m.symbol()))
        .collect();
    format!("{}\n{}", digits.trim_end(), marks.trim_end())
}
