//! Process-wide classifier handle.
//!
//! The classifier is expensive to bring up, so it is loaded lazily on first
//! use and kept for the rest of the process. Concurrent first uses all wait
//! on the same load; the loader runs exactly once unless it fails, in which
//! case the next caller tries again.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::classifier_client::ClassifierError;

/// Raw classifier answer. `labels[i]` is scored by `scores[i]`; the order is
/// whatever the backend chose, usually by descending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

/// Zero-shot text classification against caller-supplied labels.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    async fn classify(
        &self,
        sequence: &str,
        labels: &[&str],
        multi_label: bool,
    ) -> Result<ClassifierOutput, ClassifierError>;
}

/// Constructs the classifier on first use.
#[async_trait]
pub trait ClassifierLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn ZeroShotClassifier>, ClassifierError>;
}

pub struct ModelHandle {
    cell: OnceCell<Arc<dyn ZeroShotClassifier>>,
    loader: Box<dyn ClassifierLoader>,
}

impl ModelHandle {
    pub fn new(loader: impl ClassifierLoader + 'static) -> Self {
        Self {
            cell: OnceCell::new(),
            loader: Box::new(loader),
        }
    }

    /// Returns the shared classifier, loading it if this is the first call.
    pub async fn get(&self) -> Result<Arc<dyn ZeroShotClassifier>, ClassifierError> {
        self.cell
            .get_or_try_init(|| async {
                let started = Instant::now();
                info!("Loading zero-shot classifier...");
                let classifier = self.loader.load().await.map_err(|e| {
                    warn!("Classifier load failed: {e}");
                    e
                })?;
                info!("Classifier ready in {}ms", started.elapsed().as_millis());
                Ok::<_, ClassifierError>(classifier)
            })
            .await
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
