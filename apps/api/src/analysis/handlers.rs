//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::render::render_markdown;
use crate::analysis::{run_analysis, AnalysisInput};
use crate::errors::{AppError, MissingInput};
use crate::heuristics::feedback::generate_feedback;
use crate::heuristics::fields::analyze_fields;
use crate::models::analysis::{ExtractedFields, FeedbackReport, LabelScore};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Markdown,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u32,
    pub score_exact: f64,
    pub label_scores: Vec<LabelScore>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeTextRequest {
    pub resume_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart upload with a `resume` PDF part and a `job_description` text part.
/// Returns the full report as JSON, or as Markdown with `?format=markdown`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let upload_limit = state.config.max_upload_bytes;
    let mut input = AnalysisInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, "Malformed upload", upload_limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| upload_error(e, "Failed to read resume", upload_limit))?;
                input.document = Some(bytes);
            }
            "job_description" => {
                let text = field.text().await.map_err(|e| {
                    upload_error(e, "Failed to read job description", upload_limit)
                })?;
                input.job_description = Some(text);
            }
            other => debug!("Ignoring unexpected upload field '{other}'"),
        }
    }

    let report = run_analysis(state.fit_scorer.as_ref(), input).await?;

    Ok(match query.format {
        ReportFormat::Json => Json(report).into_response(),
        ReportFormat::Markdown => (
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_markdown(&report),
        )
            .into_response(),
    })
}

/// Body-limit rejections surface as multipart errors carrying a 413 status.
fn upload_error(err: MultipartError, context: &str, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

/// POST /api/v1/score
///
/// Scores already-extracted resume text against a job description.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::MissingInput(MissingInput::JobDescription));
    }

    let result = state
        .fit_scorer
        .score(&request.resume_text, &request.job_description)
        .await?;

    Ok(Json(ScoreResponse {
        score: result.display_score(),
        score_exact: result.score,
        label_scores: result.label_scores,
    }))
}

/// POST /api/v1/fields
pub async fn handle_fields(Json(request): Json<ResumeTextRequest>) -> Json<ExtractedFields> {
    Json(analyze_fields(&request.resume_text))
}

/// POST /api/v1/feedback
pub async fn handle_feedback(Json(request): Json<ResumeTextRequest>) -> Json<FeedbackReport> {
    Json(generate_feedback(&request.resume_text))
}
