pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// POST /generate              submit YAML, run the generator, archive output
/// GET  /download/{job_id}     stream a completed job's archive
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(handlers::generate::generate))
        .route(
            "/download/{job_id}",
            get(handlers::download::download_archive),
        )
}
