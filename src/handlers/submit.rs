//! Submission handler -- the single `/submit` endpoint.

use axum::{body::Bytes, extract::State, Json};
use base64::Engine;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Language, Report, Submission},
    state::AppState,
    utils::{hash_bytes, validate_source_code},
};

/// Request body for `POST /submit`. Every field is optional at the
/// deserialization layer so a missing/malformed payload can be mapped to
/// `AppError::MissingCode`/`MalformedPayload` instead of axum's default
/// 422 JSON-rejection response.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Base64-encoded source bytes.
    pub code: Option<String>,
    /// One of `python3`, `javascript`, `julia`, `c`.
    pub language: Option<String>,
    /// Problem key; dashes are equivalent to underscores.
    pub problem: Option<String>,
}

/// `POST /submit`
pub async fn submit(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Report>> {
    let payload: SubmitRequest =
        serde_json::from_slice(&body).map_err(|_| AppError::MalformedPayload)?;

    let code = payload
        .code
        .filter(|c| !c.is_empty())
        .ok_or(AppError::MissingCode)?;
    let language_tag = payload.language.ok_or(AppError::MalformedPayload)?;
    let problem = payload.problem.ok_or(AppError::MalformedPayload)?;

    let source = base64::engine::general_purpose::STANDARD
        .decode(&code)
        .map_err(|_| AppError::InvalidBase64)?;

    validate_source_code(&source).map_err(|_| AppError::MalformedPayload)?;

    let language = Language::from_wire(&language_tag)
        .ok_or_else(|| AppError::UnknownLanguage(language_tag.clone()))?;

    tracing::info!(
        problem = %problem,
        language = %language,
        source_fingerprint = %hash_bytes(&source)[..16],
        "submission received"
    );

    let submission = Submission {
        language,
        source,
        problem,
    };

    let report = state.evaluation().evaluate(submission).await?;

    Ok(Json(report))
}
