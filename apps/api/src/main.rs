mod analysis;
mod classifier_client;
mod config;
mod document;
mod errors;
mod heuristics;
mod models;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::classifier_client::HttpClassifierLoader;
use crate::config::Config;
use crate::routes::{build_router, cors_layer};
use crate::scoring::model::ModelHandle;
use crate::scoring::prompts::PromptLimits;
use crate::scoring::ZeroShotFitScorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Reviewer API v{}", env!("CARGO_PKG_VERSION"));

    // The classifier itself is loaded lazily on the first scoring request.
    let model = Arc::new(ModelHandle::new(HttpClassifierLoader {
        api_url: config.classifier_api_url.clone(),
        model: config.classifier_model.clone(),
        api_token: config.hf_api_token.clone(),
    }));
    info!("Classifier configured (model: {})", config.classifier_model);

    let fit_scorer = Arc::new(ZeroShotFitScorer::new(
        model.clone(),
        PromptLimits {
            max_resume_chars: config.max_resume_chars,
            max_job_description_chars: config.max_job_description_chars,
        },
        config.scoring_timeout,
    ));
    info!(
        "Fit scorer ready (timeout {:?}, resume ≤ {} chars, job description ≤ {} chars)",
        config.scoring_timeout, config.max_resume_chars, config.max_job_description_chars
    );

    let state = AppState {
        config: config.clone(),
        fit_scorer,
        model,
    };

    let cors = cors_layer(&config.cors_allowed_origins)?;
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
