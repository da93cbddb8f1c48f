//! Fit scoring: zero-shot multi-label classification of resume + job
//! description against a fixed set of quality dimensions.
//!
//! `AppState` holds an `Arc<dyn FitScorer>`; the default backend is
//! `ZeroShotFitScorer`, which reaches the classifier through the shared
//! `ModelHandle`.

pub mod model;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::classifier_client::ClassifierError;
use crate::models::analysis::{LabelScore, ScoreResult};
use crate::scoring::model::{ClassifierOutput, ModelHandle};
use crate::scoring::prompts::{build_bounded_prompt, PromptLimits, CANDIDATE_LABELS};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("classifier unavailable: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("classifier returned malformed output: {0}")]
    MalformedOutput(String),

    #[error("scoring timed out after {0:?}")]
    Timeout(Duration),
}

/// Scores how well a resume fits a job description, 0 – 100.
#[async_trait]
pub trait FitScorer: Send + Sync {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ScoreResult, ScoringError>;
}

pub struct ZeroShotFitScorer {
    model: Arc<ModelHandle>,
    limits: PromptLimits,
    timeout: Duration,
}

impl ZeroShotFitScorer {
    pub fn new(model: Arc<ModelHandle>, limits: PromptLimits, timeout: Duration) -> Self {
        Self {
            model,
            limits,
            timeout,
        }
    }

    async fn classify(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ScoreResult, ScoringError> {
        let (prompt, truncated) = build_bounded_prompt(resume_text, job_description, self.limits);
        if truncated {
            debug!(
                "Scoring prompt truncated to {} chars (resume ≤ {}, job description ≤ {})",
                prompt.chars().count(),
                self.limits.max_resume_chars,
                self.limits.max_job_description_chars
            );
        }

        let classifier = self.model.get().await?;
        let output = classifier.classify(&prompt, &CANDIDATE_LABELS, true).await?;
        aggregate(&output, &CANDIDATE_LABELS)
    }
}

#[async_trait]
impl FitScorer for ZeroShotFitScorer {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ScoreResult, ScoringError> {
        // The bound covers a first-use model load as well as the call itself.
        tokio::time::timeout(self.timeout, self.classify(resume_text, job_description))
            .await
            .map_err(|_| ScoringError::Timeout(self.timeout))?
    }
}

/// Maps classifier output back onto `labels` order and averages the
/// confidences into a percentage.
fn aggregate(output: &ClassifierOutput, labels: &[&str]) -> Result<ScoreResult, ScoringError> {
    if output.labels.len() != output.scores.len() {
        return Err(ScoringError::MalformedOutput(format!(
            "{} labels but {} scores",
            output.labels.len(),
            output.scores.len()
        )));
    }
    if labels.is_empty() {
        return Err(ScoringError::MalformedOutput(
            "no candidate labels".to_string(),
        ));
    }

    let mut label_scores = Vec::with_capacity(labels.len());
    for &label in labels {
        let confidence = output
            .labels
            .iter()
            .position(|l| l == label)
            .map(|i| output.scores[i])
            .ok_or_else(|| ScoringError::MalformedOutput(format!("missing label '{label}'")))?;

        if !confidence.is_finite() {
            return Err(ScoringError::MalformedOutput(format!(
                "non-finite confidence for '{label}'"
            )));
        }

        label_scores.push(LabelScore {
            label: label.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
        });
    }

    let mean =
        label_scores.iter().map(|s| s.confidence).sum::<f64>() / label_scores.len() as f64;

    Ok(ScoreResult {
        score: (mean * 100.0).clamp(0.0, 100.0),
        label_scores,
    })
}
