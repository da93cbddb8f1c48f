/// Classifier client: the single point of entry for hosted zero-shot inference.
///
/// No other module talks to the inference backend directly. Scoring code
/// reaches it through the `ZeroShotClassifier` trait and the process-wide
/// `ModelHandle`.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::scoring::model::{ClassifierLoader, ClassifierOutput, ZeroShotClassifier};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
    multi_label: bool,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    /// Block instead of returning 503 while the backend loads the weights.
    wait_for_model: bool,
}

/// The backend answers either column-wise or as one object per label.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Columns {
        labels: Vec<String>,
        scores: Vec<f64>,
    },
    Rows(Vec<LabelRow>),
}

#[derive(Debug, Deserialize)]
struct LabelRow {
    label: String,
    score: f64,
}

impl From<ZeroShotResponse> for ClassifierOutput {
    fn from(response: ZeroShotResponse) -> Self {
        match response {
            ZeroShotResponse::Columns { labels, scores } => ClassifierOutput { labels, scores },
            ZeroShotResponse::Rows(rows) => {
                let (labels, scores) = rows.into_iter().map(|r| (r.label, r.score)).unzip();
                ClassifierOutput { labels, scores }
            }
        }
    }
}

/// Outcome of a single failed request: rate limits, server errors and
/// transport failures are retried, everything else is returned as-is.
enum Attempt {
    Retryable(ClassifierError),
    Fatal(ClassifierError),
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Zero-shot classification over the hosted inference API, with retry on
/// rate limits and server errors.
#[derive(Clone)]
pub struct ClassifierClient {
    client: Client,
    endpoint: String,
    api_token: String,
    retry_delay: Duration,
}

impl ClassifierClient {
    pub fn new(api_url: &str, model: &str, api_token: String) -> Result<Self, ClassifierError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/{}", api_url.trim_end_matches('/'), model),
            api_token,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Overrides the base backoff delay (doubled on every retry).
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(
        &self,
        sequence: &str,
        labels: &[&str],
        multi_label: bool,
    ) -> Result<ClassifierOutput, ClassifierError> {
        let request_body = ZeroShotRequest {
            inputs: sequence,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
                multi_label,
            },
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            let retryable = match self.try_call(&request_body, labels.len()).await {
                Ok(output) => return Ok(output),
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Retryable(e)) => e,
            };
            if attempt >= MAX_RETRIES {
                warn!("Classifier call failed after {attempt} attempts: {retryable}");
                return Err(retryable);
            }

            let delay = self.retry_delay * (1 << (attempt - 1));
            warn!(
                "Classifier call attempt {} failed, retrying after {}ms...",
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn try_call(
        &self,
        request_body: &ZeroShotRequest<'_>,
        label_count: usize,
    ) -> Result<ClassifierOutput, Attempt> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(request_body)
            .send()
            .await
            .map_err(|e| Attempt::Retryable(e.into()))?;

        let status = response.status();

        if status.as_u16() == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("Classifier API returned {}: {}", status, body);
            return Err(Attempt::Retryable(ClassifierError::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(Attempt::Fatal(ClassifierError::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Attempt::Fatal(e.into()))?;
        let parsed: ZeroShotResponse =
            serde_json::from_str(&body).map_err(|e| Attempt::Fatal(e.into()))?;

        debug!("Classifier call succeeded for {} label(s)", label_count);

        Ok(parsed.into())
    }
}

#[async_trait]
impl ZeroShotClassifier for ClassifierClient {
    async fn classify(
        &self,
        sequence: &str,
        labels: &[&str],
        multi_label: bool,
    ) -> Result<ClassifierOutput, ClassifierError> {
        self.call(sequence, labels, multi_label).await
    }
}

/// Builds a [`ClassifierClient`] and warms the hosted model with one call,
/// so the first real analysis does not pay the weight-loading cost.
pub struct HttpClassifierLoader {
    pub api_url: String,
    pub model: String,
    pub api_token: String,
}

#[async_trait]
impl ClassifierLoader for HttpClassifierLoader {
    async fn load(&self) -> Result<Arc<dyn ZeroShotClassifier>, ClassifierError> {
        let client = ClassifierClient::new(&self.api_url, &self.model, self.api_token.clone())?;
        info!("Warming up classifier at {}", client.endpoint());
        client.call("warm up", &["ready"], false).await?;
        Ok(Arc::new(client))
    }
}
