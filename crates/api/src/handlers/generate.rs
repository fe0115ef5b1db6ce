//! Handler for the generation endpoint.
//!
//! Accepts a YAML specification (multipart file upload or JSON body),
//! isolates it in a fresh job workspace, runs the external generator
//! against it, and returns a structural preview plus a download link for
//! the archived output.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::{Deserialize, Serialize};

use specforge_core::error::CoreError;
use specforge_core::job::Job;
use specforge_core::preview::TreePreview;
use specforge_core::{archive, generator, preview};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field name carrying the uploaded YAML file.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Maximum accepted request body size (10 MiB). Input specs are small
/// text files; anything larger is rejected rather than buffered.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// JSON request body: `{ "yaml": "<spec text>" }`.
#[derive(Debug, Deserialize)]
struct GenerateBody {
    yaml: Option<String>,
}

/// Successful response for `POST /generate`.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub job_id: String,
    pub preview: TreePreview,
    pub download_url: String,
}

/// POST /generate
///
/// Pipeline: extract input → allocate job workspace → save input → invoke
/// generator → verify output → preview walk → archive → respond. Any
/// failure converts to a JSON error at the boundary; the job directory is
/// left on disk for inspection, never rolled back. Nothing is retried —
/// the generator is assumed idempotent-but-expensive, so a second
/// identical run is no more likely to succeed.
pub async fn generate(
    State(state): State<AppState>,
    req: Request,
) -> AppResult<Json<GenerateResponse>> {
    // Input extraction happens before any job side effects, so a request
    // with no input never touches the generator.
    let input = extract_input(&state, req).await?;

    let job = Job::create(&state.config.workspace_root).await?;
    job.write_input(&input).await?;

    let invocation = generator::invoke(&state.config.generator_bin, &job).await?;
    if !invocation.success() {
        return Err(AppError::Core(CoreError::GeneratorFailed {
            exit_code: invocation.exit_code,
            stderr: invocation.stderr,
        }));
    }
    generator::verify_output(&job)?;

    // Tree walk and zip writing are blocking filesystem work.
    let output_dir = job.output_dir();
    let archive_path = job.archive_path();
    let preview = tokio::task::spawn_blocking(move || {
        let preview = preview::scan_tree(&output_dir)?;
        archive::archive_tree(&output_dir, &archive_path)?;
        Ok::<_, CoreError>(preview)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Packaging task failed: {e}")))??;

    tracing::info!(
        job_id = %job.id(),
        total_files = preview.total_files,
        total_dirs = preview.total_dirs,
        "Generation complete"
    );

    Ok(Json(GenerateResponse {
        job_id: job.id().to_string(),
        download_url: format!("/download/{}", job.id()),
        preview,
    }))
}

/// Extract the YAML input from the request.
///
/// First matching rule wins: a multipart `file` field is saved verbatim;
/// otherwise a JSON body's `yaml` field is taken verbatim; otherwise the
/// request is rejected with 400.
async fn extract_input(state: &AppState, req: Request) -> Result<Vec<u8>, AppError> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if is_multipart {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            if field.name() == Some(UPLOAD_FIELD_NAME) {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                return Ok(bytes.to_vec());
            }
        }
        return Err(no_input());
    }

    let body = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if let Ok(parsed) = serde_json::from_slice::<GenerateBody>(&body) {
        if let Some(yaml) = parsed.yaml {
            return Ok(yaml.into_bytes());
        }
    }

    Err(no_input())
}

fn no_input() -> AppError {
    AppError::BadRequest("No file or yaml content provided".to_string())
}
