//! HTTP presentation layer.
//!
//! Routes:
//!
//! - `GET /`: the page for the caller's session
//! - `POST /select/:model`: pick `nb` or `lr` for the session
//! - `POST /predict`: classify the `text` form field
//! - `GET /health`: artifact status as JSON

pub mod error;
pub mod handlers;
pub mod page;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::artifact::ArtifactStore;
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::service::{ClassificationService, Notice, SessionStore};

pub use error::WebError;
pub use handlers::SESSION_COOKIE;
pub use page::{PageView, escape_html, render};

/// Shared state of the web service.
#[derive(Debug)]
pub struct AppState {
    pub service: ClassificationService,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(service: ClassificationService, sessions: SessionStore) -> Self {
        Self { service, sessions }
    }

    /// Artifact load failures shown on every render.
    pub fn load_notices(&self) -> Vec<Notice> {
        self.service.store().notices()
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/select/:model", post(handlers::select))
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Load the artifacts and serve the page until the process is stopped.
pub async fn serve(config: &ServiceConfig) -> Result<()> {
    config.validate()?;
    let addr = config.bind_addr()?;

    let store = ArtifactStore::open(&config.artifact_dir);
    for notice in store.notices() {
        log::warn!("{notice}");
    }

    let state = Arc::new(AppState::new(
        ClassificationService::new(Arc::new(store)),
        SessionStore::new(config.session_ttl()),
    ));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
