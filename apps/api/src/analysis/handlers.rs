//! Axum route handlers for the Analysis API.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{analyze_resume, AnalysisResponse};
use crate::analysis::contract::{self, PromptContract};
use crate::analysis::parser::{parse, ParsedResult};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseRawRequest {
    pub raw_text: String,
    pub contract: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseRawResponse {
    pub contract: String,
    pub result: ParsedResult,
}

#[derive(Debug, Serialize)]
pub struct ContractsResponse {
    pub contracts: Vec<PromptContract>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyses
///
/// Multipart form: `resume` (PDF file), `job_title` (text), optional
/// `contract` (preset name, defaults to `standard`). Runs the full
/// extract → complete → parse pipeline. A malformed completion still
/// answers 200 — the failure is carried in `result.parse_error`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut resume: Option<Bytes> = None;
    let mut job_title: Option<String> = None;
    let mut contract_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                resume = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume upload: {e}"))
                })?);
            }
            Some("job_title") => {
                job_title = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job_title field: {e}"))
                })?);
            }
            Some("contract") => {
                contract_name = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read contract field: {e}"))
                })?);
            }
            _ => {} // unknown fields are ignored
        }
    }

    let resume = resume
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("Missing 'resume' file field".to_string()))?;

    let job_title = job_title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Missing or empty 'job_title' field".to_string()))?;

    let contract = resolve_contract(contract_name.as_deref())?;

    let response = analyze_resume(
        state.provider.as_ref(),
        &contract,
        state.config.max_resume_chars,
        resume,
        &job_title,
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/analyses/parse
///
/// Parses a raw completion against a contract without calling the provider.
/// Debug/preview seam: lets front-ends and operators inspect how a reply
/// maps to sections.
pub async fn handle_parse_raw(
    Json(request): Json<ParseRawRequest>,
) -> Result<Json<ParseRawResponse>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text cannot be empty".to_string()));
    }

    let contract = resolve_contract(request.contract.as_deref())?;
    let result = parse(&request.raw_text, &contract);

    Ok(Json(ParseRawResponse {
        contract: contract.name.to_string(),
        result,
    }))
}

/// GET /api/v1/contracts
///
/// Lists the shipped contract presets so front-ends can pick the one
/// matching the prompt template they want sent.
pub async fn handle_list_contracts() -> Json<ContractsResponse> {
    Json(ContractsResponse {
        contracts: contract::presets(),
    })
}

fn resolve_contract(name: Option<&str>) -> Result<PromptContract, AppError> {
    match name {
        None => Ok(contract::standard()),
        Some(name) => contract::by_name(name)
            .ok_or_else(|| AppError::Validation(format!("Unknown contract preset '{name}'"))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_contract_defaults_to_standard() {
        let contract = resolve_contract(None).unwrap();
        assert_eq!(contract.name, "standard");
    }

    #[test]
    fn test_resolve_contract_rejects_unknown_preset() {
        let result = resolve_contract(Some("pipe_delimited"));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_raw_request_deserializes_without_contract() {
        let json = r#"{"raw_text": "**ATS SCORE**\n70/100"}"#;
        let request: ParseRawRequest = serde_json::from_str(json).unwrap();
        assert!(request.contract.is_none());
    }

    #[tokio::test]
    async fn test_parse_raw_handler_round_trip() {
        let request = ParseRawRequest {
            raw_text: "**STRENGTHS**\n- Good Python\n**ATS SCORE**\n85/100\n".to_string(),
            contract: Some("standard".to_string()),
        };
        let Json(response) = handle_parse_raw(Json(request)).await.unwrap();

        assert_eq!(response.contract, "standard");
        assert_eq!(response.result.score, 85);
        assert_eq!(response.result.sections["strengths"], "- Good Python");
    }

    #[tokio::test]
    async fn test_parse_raw_handler_rejects_empty_input() {
        let request = ParseRawRequest {
            raw_text: "   ".to_string(),
            contract: None,
        };
        let result = handle_parse_raw(Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_contracts_exposes_all_presets() {
        let Json(response) = handle_list_contracts().await;
        let names: Vec<_> = response.contracts.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["standard", "detailed", "breakdown"]);
    }
}
