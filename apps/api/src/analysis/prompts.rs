//! Prompt construction for the Analysis module.
//!
//! The section format block is rendered from the active [`PromptContract`],
//! so the header tokens the model is told to reproduce are byte-identical to
//! the tokens the parser requires. Surrounding instruction text reuses the
//! cross-cutting fragments from `llm_client::prompts`.

use crate::analysis::breakdown::CRITERIA;
use crate::analysis::contract::{BodyShape, PromptContract};
use crate::llm_client::prompts::EXACT_FORMAT_INSTRUCTION;

/// Builds the full analysis prompt for one resume/job-title pair.
///
/// `resume_text` must already be truncated by the caller — the prompt layer
/// embeds whatever it is handed.
pub fn build_analysis_prompt(
    contract: &PromptContract,
    job_title: &str,
    resume_text: &str,
) -> String {
    format!(
        "Analyze this resume for a {job_title} position. \
         Provide analysis in EXACT format:\n\n{}\n\n{EXACT_FORMAT_INSTRUCTION}\n\n\
         Resume Content: {resume_text}",
        format_block(contract)
    )
}

/// Renders the section skeleton the model must fill in: each header wrapped
/// in the contract delimiter, followed by a body exemplar for its shape.
pub fn format_block(contract: &PromptContract) -> String {
    let delim = contract.delimiter;
    contract
        .sections
        .iter()
        .map(|section| {
            let body = match section.shape {
                BodyShape::Bullets => format!(
                    "- [{ex} 1]\n- [{ex} 2]",
                    ex = section.exemplar
                ),
                BodyShape::Numbered => format!(
                    "1. [{ex} 1]\n2. [{ex} 2]",
                    ex = section.exemplar
                ),
                BodyShape::Score => "[XX]/100".to_string(),
                BodyShape::SubScores => CRITERIA
                    .iter()
                    .map(|(label, max)| format!("{label}: [score]/{max}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            format!("{delim}{header}{delim}\n{body}", header = section.header)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
