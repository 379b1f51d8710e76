//! ATS breakdown — per-criterion sub-scores parsed from a breakdown section.
//!
//! The `breakdown` contract asks the model for one `Component: N/M` line per
//! weighted criterion plus the usual total in the score section. Component
//! parsing is best-effort: a malformed line is skipped rather than reported
//! as a zero, so the gauge UI never renders a phantom component.

use serde::Serialize;

/// The weighted criteria the breakdown prompt asks the model to score,
/// with each criterion's maximum contribution to the 100-point total.
pub const CRITERIA: &[(&str, u8)] = &[
    ("Technical", 25),
    ("Experience", 30),
    ("Education", 20),
    ("Keywords", 15),
    ("Formatting", 10),
];

/// One scored criterion out of a breakdown section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub label: String,
    pub score: u8,
    pub max: u8,
}

/// Parses `Component: N/M` lines out of a breakdown section body.
///
/// Lines without a `label: digits/digits` shape are skipped. A `Total` line
/// is skipped too — the overall score lives in the contract's score section,
/// and duplicating it as a component would double-count it in any chart.
pub fn parse_components(body: &str) -> Vec<ScoreComponent> {
    body.lines().filter_map(parse_component_line).collect()
}

fn parse_component_line(line: &str) -> Option<ScoreComponent> {
    let line = line.trim().trim_start_matches(['-', '*']).trim_start();
    let (label, rest) = line.split_once(':')?;
    let label = label.trim();
    if label.is_empty() || label.eq_ignore_ascii_case("total") {
        return None;
    }

    let (score_part, max_part) = rest.split_once('/')?;
    let score = leading_number(score_part)?;
    let max = leading_number(max_part)?.min(100);

    Some(ScoreComponent {
        label: label.to_string(),
        score: score.min(max) as u8,
        max: max as u8,
    })
}

/// First run of decimal digits in the text, ignoring leading prose.
fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
