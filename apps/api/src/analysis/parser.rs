//! Section parser — turns a raw LLM completion into typed analysis fields.
//!
//! The prompt can only loosely guarantee the model's output format, so the
//! parser is strict about the one signal it structurally depends on — the
//! delimiter-wrapped header lines — and maximally permissive about section
//! body content. The score section is mandatory: a reply without a parseable
//! `NN/100` value is rejected wholesale rather than partially trusted.
//! Narrative sections are optional and default to empty.
//!
//! Pure function: no I/O, no logging, no shared state. A failure is returned
//! as data on [`ParsedResult`], never raised past this module.

use std::panic::{catch_unwind, AssertUnwindSafe};

use indexmap::IndexMap;
use serde::Serialize;

use crate::analysis::contract::PromptContract;

/// Structured result of parsing one completion against a contract.
///
/// `sections` holds one entry per contract section id, in contract order —
/// an empty string when the model omitted that section. When `parse_error`
/// is set, every body is empty and `score` is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedResult {
    pub sections: IndexMap<String, String>,
    /// ATS compatibility score, clamped to 0–100.
    pub score: u8,
    pub parse_error: Option<String>,
}

impl ParsedResult {
    fn failed(contract: &PromptContract, message: String) -> Self {
        ParsedResult {
            sections: empty_sections(contract),
            score: 0,
            parse_error: Some(message),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.parse_error.is_some()
    }
}

fn empty_sections(contract: &PromptContract) -> IndexMap<String, String> {
    contract
        .sections
        .iter()
        .map(|s| (s.id.to_string(), String::new()))
        .collect()
}

/// Parses a raw completion against a contract.
///
/// Never panics: an unexpected processing error inside the scan is caught
/// here and converted into the same failure shape a malformed reply gets.
pub fn parse(raw: &str, contract: &PromptContract) -> ParsedResult {
    match catch_unwind(AssertUnwindSafe(|| scan(raw, contract))) {
        Ok(result) => result,
        Err(_) => ParsedResult::failed(
            contract,
            format!("internal parser failure\n\nRaw response:\n{raw}"),
        ),
    }
}

fn scan(raw: &str, contract: &PromptContract) -> ParsedResult {
    let mut bodies: IndexMap<&'static str, String> = contract
        .sections
        .iter()
        .map(|s| (s.id, String::new()))
        .collect();

    // Lines before the first header, and lines under a well-formed but
    // unknown header, are discarded — never merged into a neighbor section.
    let mut current: Option<&'static str> = None;

    for line in raw.lines() {
        let line = line.trim();

        if let Some(header) = delimited_header(line, contract.delimiter) {
            current = contract.section_for_header(header).map(|s| s.id);
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if let Some(id) = current {
            if let Some(body) = bodies.get_mut(id) {
                if !body.is_empty() {
                    body.push('\n');
                }
                body.push_str(line);
            }
        }
    }

    let score_body = bodies
        .get(contract.score_section)
        .map(String::as_str)
        .unwrap_or("");

    if score_body.is_empty() {
        return ParsedResult::failed(
            contract,
            format!(
                "score section '{}' missing from response\n\nRaw response:\n{raw}",
                contract.score_section
            ),
        );
    }

    let score = match extract_score(score_body) {
        Some(score) => score,
        None => {
            return ParsedResult::failed(
                contract,
                format!(
                    "no numeric score found in section '{}'\n\nRaw response:\n{raw}",
                    contract.score_section
                ),
            );
        }
    };

    ParsedResult {
        sections: bodies
            .into_iter()
            .map(|(id, body)| (id.to_string(), body))
            .collect(),
        score,
        parse_error: None,
    }
}

/// Returns the de-delimited, trimmed header text if the line both starts and
/// ends with the delimiter token (e.g. `**ATS SCORE**`).
fn delimited_header<'a>(line: &'a str, delimiter: &str) -> Option<&'a str> {
    if delimiter.is_empty() || line.len() < 2 * delimiter.len() {
        return None;
    }
    let inner = line.strip_prefix(delimiter)?.strip_suffix(delimiter)?;
    Some(inner.trim())
}

/// Extracts the first run of decimal digits appearing before an optional `/`
/// and clamps it to 0–100. `None` when no digits precede the slash.
fn extract_score(body: &str) -> Option<u8> {
    let before_slash = body.split('/').next().unwrap_or(body);
    let digits: String = before_slash
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    // Absurdly long digit runs overflow the parse; they are still over 100.
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    Some(value.min(100) as u8)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
