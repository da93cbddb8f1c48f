use std::sync::Arc;

use crate::config::Config;
use crate::scoring::model::ModelHandle;
use crate::scoring::FitScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable fit scorer. Default: ZeroShotFitScorer over `model`.
    pub fit_scorer: Arc<dyn FitScorer>,
    /// Process-wide classifier, loaded on first scoring request.
    pub model: Arc<ModelHandle>,
}
