//! Decoders for gnubg's human-readable output.
//!
//! gnubg's text output is not a stable format, so every decoder is a set of
//! independent pattern matches with a default for each field. Nothing here
//! returns an error.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::types::{CubeDecision, CubeRecommendation, MoveAnalysis, PositionEvaluation};

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("hard-coded pattern must compile")
}

static EQUITY_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Equity[:\s]+([-+]?\d+\.\d+)"));
static WIN_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Win[:\s]+([\d.]+)%"));
static GAMMON_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(?:Win\s+G|Gammon)[:\s]+([\d.]+)%"));
static BACKGAMMON_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(?:Win\s+BG|Backgammon)[:\s]+([\d.]+)%"));

static MOVE_EQUITY_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^([-+]?\d+\.?\d*)"));

static NO_DOUBLE_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)No\s+double[:\s]+([-+]?\d+\.\d+)"));
static DOUBLE_TAKE_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)Double,\s+take[:\s]+([-+]?\d+\.\d+)"));
static DOUBLE_PASS_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)Double,\s+pass[:\s]+([-+]?\d+\.\d+)"));

const EQUITY_MARKER: &str = "eq.:";

/// First capture group of `re` in `text`, as a float.
fn capture_f64(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn capture_percent(re: &Regex, text: &str) -> Option<f64> {
    capture_f64(re, text).map(|pct| pct / 100.0)
}

/// Parse the output of `eval`.
///
/// ```text
/// Equity: +0.234
/// Win: 56.2%
/// Win G: 12.3%
/// Win BG: 0.8%
/// ```
pub fn parse_evaluation(output: &str) -> PositionEvaluation {
    PositionEvaluation {
        equity: capture_f64(&EQUITY_RE, output).unwrap_or(0.0),
        win_prob: capture_percent(&WIN_RE, output).unwrap_or(0.0),
        gammon_prob: capture_percent(&GAMMON_RE, output).unwrap_or(0.0),
        bg_prob: capture_percent(&BACKGAMMON_RE, output).unwrap_or(0.0),
    }
}

/// Parse the ranked move list printed by `hint`.
///
/// ```text
///     1. Cubeful 2-ply    8/5 8/4                      Eq.: +0.200
///        0.571 0.000 0.000 - 0.429 0.000 0.000
///     2. Cubeful 2-ply    8/4 6/3                      Eq.: +0.177 (-0.023)
/// ```
///
/// Probability rows and any other annotation lines are skipped. Order follows
/// the output, which gnubg already prints best first.
pub fn parse_move_analysis(output: &str) -> Vec<MoveAnalysis> {
    let moves: Vec<MoveAnalysis> = output.lines().filter_map(parse_move_line).collect();
    debug!(count = moves.len(), "Parsed hint output");
    moves
}

fn parse_move_line(line: &str) -> Option<MoveAnalysis> {
    let trimmed = line.trim();

    if !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let dot_index = trimmed.find('.')?;
    let rank: u32 = match trimmed[..dot_index].parse() {
        Ok(rank) => rank,
        Err(_) => {
            debug!(line = trimmed, "Skipping line, rank is not a number");
            return None;
        }
    };

    // ASCII lowercasing keeps byte offsets aligned with `trimmed`
    let equity_index = match trimmed.to_ascii_lowercase().find(EQUITY_MARKER) {
        Some(idx) => idx,
        None => {
            debug!(rank, line = trimmed, "Skipping line, no Eq.: marker");
            return None;
        }
    };
    if equity_index <= dot_index {
        return None;
    }

    // Keep only from/to tokens; this drops labels like "Cubeful 2-ply"
    let move_section = &trimmed[dot_index + 1..equity_index];
    let notation = move_section
        .split_whitespace()
        .filter(|part| part.contains('/'))
        .collect::<Vec<_>>()
        .join(" ");

    if notation.is_empty() {
        warn!(rank, move_section = move_section.trim(), "Skipping move, no notation found");
        return None;
    }

    let equity_section = trimmed[equity_index + EQUITY_MARKER.len()..].trim_start();
    let Some(equity) = capture_f64(&MOVE_EQUITY_RE, equity_section) else {
        warn!(rank, equity_section, "Skipping move, equity did not parse");
        return None;
    };

    Some(MoveAnalysis {
        rank,
        notation,
        equity,
    })
}

/// Parse the output of `hint cube`.
///
/// The recommendation is inferred from the three equities, then replaced by
/// gnubg's own verdict when the text states one.
pub fn parse_cube_decision(output: &str) -> CubeDecision {
    let no_double_eq = capture_f64(&NO_DOUBLE_RE, output).unwrap_or(0.0);
    let double_take_eq = capture_f64(&DOUBLE_TAKE_RE, output).unwrap_or(0.0);
    let double_pass_eq = capture_f64(&DOUBLE_PASS_RE, output).unwrap_or(0.0);

    let recommendation = stated_recommendation(output).unwrap_or_else(|| {
        infer_recommendation(no_double_eq, double_take_eq, double_pass_eq)
    });

    CubeDecision {
        no_double_eq,
        double_take_eq,
        double_pass_eq,
        recommendation,
        details: Some(output.to_string()),
    }
}

/// Highest equity wins; ties fall back to no double.
fn infer_recommendation(no_double: f64, take: f64, pass: f64) -> CubeRecommendation {
    if take > no_double && take > pass {
        CubeRecommendation::Double
    } else if pass > no_double && pass > take {
        CubeRecommendation::TooGood
    } else {
        CubeRecommendation::NoDouble
    }
}

/// Explicit verdict phrases. Not exhaustive: other phrasings fall through to
/// the numeric inference.
fn stated_recommendation(output: &str) -> Option<CubeRecommendation> {
    let lower = output.to_lowercase();
    if lower.contains("correct cube action: double") {
        Some(CubeRecommendation::Double)
    } else if lower.contains("correct cube action: no double") {
        Some(CubeRecommendation::NoDouble)
    } else if lower.contains("too good") {
        Some(CubeRecommendation::TooGood)
    } else {
        None
    }
}
