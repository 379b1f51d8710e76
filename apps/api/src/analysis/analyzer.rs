//! Resume analysis — orchestrates the full analysis pipeline.
//!
//! Flow: extract PDF text → truncate → build prompt → completion call →
//! parse sections. Extraction and provider failures short-circuit as typed
//! errors before parsing is attempted; a malformed completion is NOT an
//! error — it comes back as `parse_error` data on the result so the caller
//! can retry the completion or show the raw text.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::breakdown::{parse_components, ScoreComponent};
use crate::analysis::contract::PromptContract;
use crate::analysis::parser::{parse, ParsedResult};
use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::extraction;
use crate::llm_client::prompts::ANALYST_SYSTEM;
use crate::llm_client::CompletionProvider;

/// One completed analysis. Created fresh per request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub id: Uuid,
    pub job_title: String,
    /// Name of the contract preset the reply was parsed against.
    pub contract: String,
    pub model: String,
    /// Characters of resume text sent to the model, after truncation.
    pub resume_chars: usize,
    pub result: ParsedResult,
    /// Per-criterion sub-scores, for contracts with a breakdown section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<ScoreComponent>>,
    pub created_at: DateTime<Utc>,
}

/// Runs the pipeline from uploaded PDF bytes.
pub async fn analyze_resume(
    provider: &dyn CompletionProvider,
    contract: &PromptContract,
    max_resume_chars: usize,
    pdf_bytes: Bytes,
    job_title: &str,
) -> Result<AnalysisResponse, AppError> {
    // pdf-extract is CPU-bound; keep it off the async worker threads.
    let text = tokio::task::spawn_blocking(move || extraction::extract_text(&pdf_bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

    let resume_text = extraction::truncate_chars(&text, max_resume_chars);
    if resume_text.len() < text.len() {
        info!(
            "Resume text truncated from {} to {} chars",
            text.chars().count(),
            max_resume_chars
        );
    }

    analyze_text(provider, contract, job_title, resume_text).await
}

/// Runs the pipeline from already-extracted resume text.
///
/// `resume_text` is expected to be truncated by the caller; this function
/// sends it as-is.
pub async fn analyze_text(
    provider: &dyn CompletionProvider,
    contract: &PromptContract,
    job_title: &str,
    resume_text: &str,
) -> Result<AnalysisResponse, AppError> {
    info!(
        "Analyzing resume for '{}' with contract '{}'",
        job_title, contract.name
    );

    let prompt = build_analysis_prompt(contract, job_title, resume_text);
    let raw = provider.complete(ANALYST_SYSTEM, &prompt).await?;

    let result = parse(&raw, contract);
    if let Some(error) = &result.parse_error {
        warn!(
            "Completion for '{}' did not parse: {}",
            job_title,
            error.lines().next().unwrap_or("unknown parse failure")
        );
    }

    let breakdown = breakdown_components(contract, &result);

    Ok(AnalysisResponse {
        id: Uuid::new_v4(),
        job_title: job_title.to_string(),
        contract: contract.name.to_string(),
        model: provider.model_id().to_string(),
        resume_chars: resume_text.chars().count(),
        result,
        breakdown,
        created_at: Utc::now(),
    })
}

/// Sub-score components for contracts that ask for them. `None` when the
/// contract has no breakdown section or the parse failed outright.
fn breakdown_components(
    contract: &PromptContract,
    result: &ParsedResult,
) -> Option<Vec<ScoreComponent>> {
    if result.is_failure() {
        return None;
    }
    let spec = contract.breakdown_spec()?;
    let body = result.sections.get(spec.id)?;
    Some(parse_components(body))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::contract::{breakdown, standard};
    use crate::llm_client::ProviderError;
    use async_trait::async_trait;

    /// Canned provider standing in for the chat client in pipeline tests.
    /// `None` simulates a provider failure.
    struct StubProvider {
        reply: Option<&'static str>,
    }

    impl StubProvider {
        fn replying(reply: &'static str) -> Self {
            StubProvider { reply: Some(reply) }
        }

        fn failing() -> Self {
            StubProvider { reply: None }
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, ProviderError> {
            match self.reply {
                Some(text) => Ok(text.to_string()),
                None => Err(ProviderError::RateLimited { retries: 3 }),
            }
        }

        fn model_id(&self) -> &str {
            "stub-model"
        }
    }

    const GOOD_REPLY: &str = "\
**STRENGTHS**
- Solid Rust experience
**WEAKNESSES**
- Sparse metrics
**REQUIRED IMPROVEMENTS**
1. Quantify outcomes
**ATS SCORE**
82/100
**REASONING**
- Title keywords present
";

    #[tokio::test]
    async fn test_pipeline_returns_parsed_sections_and_metadata() {
        let provider = StubProvider::replying(GOOD_REPLY);
        let response = analyze_text(
            &provider,
            &standard(),
            "Backend Engineer",
            "EXPERIENCE: five years of Rust services",
        )
        .await
        .unwrap();

        assert_eq!(response.job_title, "Backend Engineer");
        assert_eq!(response.contract, "standard");
        assert_eq!(response.model, "stub-model");
        assert_eq!(response.result.score, 82);
        assert!(response.result.parse_error.is_none());
        assert!(response.breakdown.is_none());
        assert_eq!(
            response.resume_chars,
            "EXPERIENCE: five years of Rust services".chars().count()
        );
    }

    #[tokio::test]
    async fn test_malformed_completion_is_data_not_an_error() {
        let provider = StubProvider::replying("I am sorry, I cannot do that.");
        let response = analyze_text(&provider, &standard(), "Data Analyst", "some resume")
            .await
            .unwrap();

        assert!(response.result.parse_error.is_some());
        assert_eq!(response.result.score, 0);
        assert!(response.result.sections.values().all(String::is_empty));
    }

    #[tokio::test]
    async fn test_provider_failure_short_circuits() {
        let provider = StubProvider::failing();
        let result = analyze_text(&provider, &standard(), "Data Analyst", "some resume").await;

        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[tokio::test]
    async fn test_breakdown_contract_attaches_components() {
        let provider = StubProvider::replying(
            "\
**MISSING SKILLS**
- Kubernetes
**RECOMMENDATIONS**
- Add a platform project
**ATS BREAKDOWN**
Technical: 20/25
Experience: 24/30
Education: 15/20
Keywords: 12/15
Formatting: 8/10
**ATS SCORE**
79/100
",
        );
        let response = analyze_text(&provider, &breakdown(), "SRE", "resume text")
            .await
            .unwrap();

        let components = response.breakdown.unwrap();
        assert_eq!(components.len(), 5);
        assert_eq!(components[1].label, "Experience");
        assert_eq!(components[1].score, 24);
        assert_eq!(response.result.score, 79);
    }

    #[tokio::test]
    async fn test_failed_parse_yields_no_breakdown() {
        let provider = StubProvider::replying("no sections at all");
        let response = analyze_text(&provider, &breakdown(), "SRE", "resume text")
            .await
            .unwrap();

        assert!(response.result.parse_error.is_some());
        assert!(response.breakdown.is_none());
    }
}
