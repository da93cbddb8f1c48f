//! Analysis pipeline: validates the two inputs, extracts text once, then runs
//! the scorer, the field heuristics and the feedback rules over that text.

pub mod handlers;
pub mod render;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::document::extract_text_async;
use crate::errors::{AppError, MissingInput};
use crate::heuristics::feedback::generate_feedback;
use crate::heuristics::fields::analyze_fields;
use crate::models::analysis::{ExtractedFields, FeedbackReport, LabelScore};
use crate::scoring::FitScorer;

pub const ATS_NOTE: &str = "If the extracted data is incorrect, please update your resume layout. \
    This indicates that the ATS may not be reading your resume correctly.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    /// Integer score shown to the applicant, 0 – 100.
    pub score: u32,
    pub score_exact: f64,
    pub label_scores: Vec<LabelScore>,
    pub fields: ExtractedFields,
    pub feedback: FeedbackReport,
    pub ats_note: String,
}

/// Raw inputs as the upload form delivers them; either may be absent.
#[derive(Debug, Default)]
pub struct AnalysisInput {
    pub document: Option<Bytes>,
    pub job_description: Option<String>,
}

impl AnalysisInput {
    /// Checks the document first, then the job description. Nothing downstream
    /// runs unless both are present.
    pub fn validate(self) -> Result<(Bytes, String), AppError> {
        let document = self
            .document
            .filter(|d| !d.is_empty())
            .ok_or(AppError::MissingInput(MissingInput::Document))?;
        let job_description = self
            .job_description
            .filter(|jd| !jd.trim().is_empty())
            .ok_or(AppError::MissingInput(MissingInput::JobDescription))?;
        Ok((document, job_description))
    }
}

pub async fn run_analysis(
    scorer: &dyn FitScorer,
    input: AnalysisInput,
) -> Result<AnalysisReport, AppError> {
    let (document, job_description) = input.validate()?;
    let analysis_id = Uuid::new_v4();

    info!(%analysis_id, "Extracting text from {} byte document", document.len());
    let resume_text = extract_text_async(document).await?;

    info!(%analysis_id, "Scoring {} chars of resume text", resume_text.chars().count());
    let score = scorer.score(&resume_text, &job_description).await?;

    let fields = analyze_fields(&resume_text);
    let feedback = generate_feedback(&resume_text);

    info!(%analysis_id, score = score.score, "Analysis complete");

    Ok(AnalysisReport {
        analysis_id,
        analyzed_at: Utc::now(),
        score: score.display_score(),
        score_exact: score.score,
        label_scores: score.label_scores,
        fields,
        feedback,
        ats_note: ATS_NOTE.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::document::tests::build_pdf;
    use crate::models::analysis::{ScoreResult, NOT_FOUND};
    use crate::scoring::ScoringError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fixed-score scorer that counts how often it was asked.
    pub(crate) struct StubScorer {
        pub calls: AtomicUsize,
        pub score: Option<f64>,
    }

    impl StubScorer {
        pub(crate) fn returning(score: f64) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                score: Some(score),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                score: None,
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FitScorer for StubScorer {
        async fn score(
            &self,
            _resume_text: &str,
            _job_description: &str,
        ) -> Result<ScoreResult, ScoringError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.score {
                Some(score) => Ok(ScoreResult {
                    score,
                    label_scores: vec![],
                }),
                None => Err(ScoringError::MalformedOutput("stub failure".to_string())),
            }
        }
    }

    fn input(document: Option<Vec<u8>>, job_description: Option<&str>) -> AnalysisInput {
        AnalysisInput {
            document: document.map(Bytes::from),
            job_description: job_description.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_missing_document_never_scores() {
        let scorer = StubScorer::returning(50.0);
        let err = run_analysis(&scorer, input(None, Some("Rust engineer")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingInput(MissingInput::Document)));
        assert_eq!(scorer.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_job_description_never_scores() {
        let scorer = StubScorer::returning(50.0);
        let pdf = build_pdf(&["Jane Doe"]);
        let err = run_analysis(&scorer, input(Some(pdf), Some("   \n")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingInput(MissingInput::JobDescription)
        ));
        assert_eq!(scorer.calls(), 0);
    }

    #[tokio::test]
    async fn test_document_is_checked_before_job_description() {
        let scorer = StubScorer::returning(50.0);
        let err = run_analysis(&scorer, input(None, None)).await.unwrap_err();
        assert!(matches!(err, AppError::MissingInput(MissingInput::Document)));
    }

    #[tokio::test]
    async fn test_empty_upload_counts_as_missing() {
        let scorer = StubScorer::returning(50.0);
        let err = run_analysis(&scorer, input(Some(vec![]), Some("job")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingInput(MissingInput::Document)));
    }

    #[tokio::test]
    async fn test_invalid_document_is_a_parse_error() {
        let scorer = StubScorer::returning(50.0);
        let err = run_analysis(&scorer, input(Some(b"not a pdf".to_vec()), Some("job")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DocumentParse(_)));
        assert_eq!(scorer.calls(), 0);
    }

    #[tokio::test]
    async fn test_full_analysis_report() {
        let scorer = StubScorer::returning(64.8);
        let pdf = build_pdf(&["Jane Doe, reach me at jane@example.com"]);
        let report = run_analysis(&scorer, input(Some(pdf), Some("Rust engineer")))
            .await
            .unwrap();

        assert_eq!(scorer.calls(), 1);
        assert_eq!(report.score, 64);
        assert!((report.score_exact - 64.8).abs() < 1e-9);
        assert_eq!(report.fields.email, "jane@example.com");
        assert_eq!(report.fields.experience, NOT_FOUND);
        assert_eq!(report.feedback.skills_relevance.len(), 1);
        assert_eq!(report.ats_note, ATS_NOTE);
    }

    #[tokio::test]
    async fn test_scorer_failure_is_model_unavailable() {
        let scorer = StubScorer::failing();
        let pdf = build_pdf(&["Jane Doe"]);
        let err = run_analysis(&scorer, input(Some(pdf), Some("job")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ModelUnavailable(_)));
    }
}
