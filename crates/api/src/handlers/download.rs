//! Handler for archive retrieval.
//!
//! A pure read path: the archive location is derived from the job id alone
//! (filesystem as source of truth, no job registry), so a restarted
//! process can still serve any previously archived job.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use tokio_util::io::ReaderStream;

use specforge_core::job::Job;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Client-facing filename for the downloaded archive.
pub const DOWNLOAD_FILE_NAME: &str = "generated.zip";

/// GET /download/{job_id}
///
/// Streams the job's archive as an attachment. Unknown ids, invalid ids,
/// and jobs that failed before archival all yield the same 404 — the
/// distinction is deliberately invisible to the caller.
pub async fn download_archive(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Response> {
    let job =
        Job::locate(&state.config.workspace_root, &job_id).map_err(|_| AppError::NotFound)?;

    let archive_path = job.archive_path();
    let metadata = match tokio::fs::metadata(&archive_path).await {
        Ok(meta) if meta.is_file() => meta,
        _ => return Err(AppError::NotFound),
    };

    let file = tokio::fs::File::open(&archive_path)
        .await
        .map_err(|_| AppError::NotFound)?;
    let stream = ReaderStream::new(file);

    tracing::debug!(job_id = %job.id(), bytes = metadata.len(), "Serving archive");

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_LENGTH, metadata.len().to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
        )
        .body(Body::from_stream(stream))
        .unwrap())
}
