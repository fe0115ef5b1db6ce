use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use specforge_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for pipeline errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent `{ "error": ... }`
/// JSON bodies; no pipeline failure escapes as an unhandled fault.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A pipeline error from `specforge-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested archive does not exist. Unknown ids and jobs that
    /// never reached archival are deliberately indistinguishable.
    #[error("File not found")]
    NotFound,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(core) => classify_core_error(core),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),

            AppError::NotFound => (StatusCode::NOT_FOUND, "File not found".to_string()),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Map a pipeline error to an HTTP status and error detail.
///
/// - A non-zero generator exit carries the tool's stderr verbatim.
/// - A success exit without output gets the fixed contract-violation detail.
/// - An invalid job id maps to 404, same as a missing archive.
fn classify_core_error(err: CoreError) -> (StatusCode, String) {
    match err {
        CoreError::GeneratorFailed { exit_code, stderr } => {
            tracing::error!(?exit_code, "Generator exited non-zero");
            let detail = if stderr.is_empty() {
                format!("Generator exited with code {exit_code:?}")
            } else {
                stderr
            };
            (StatusCode::INTERNAL_SERVER_ERROR, detail)
        }
        CoreError::MissingOutput => (
            StatusCode::INTERNAL_SERVER_ERROR,
            CoreError::MissingOutput.to_string(),
        ),
        CoreError::InvalidJobId(_) => (StatusCode::NOT_FOUND, "File not found".to_string()),
        other => {
            tracing::error!(error = %other, "Generation pipeline error");
            (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
