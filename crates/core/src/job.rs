//! Job workspace management.
//!
//! Every generation request gets a fresh directory under a shared workspace
//! root, named by a v4 UUID. All per-job artifacts live inside it at
//! well-known names, so a job is fully reconstructable from its directory
//! alone — there is no in-memory registry, and a restarted process can still
//! serve downloads for any previously archived job.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::CoreError;

/// File name the submitted YAML is saved under inside the job directory.
pub const INPUT_FILE_NAME: &str = "input.yaml";

/// Directory name the generator is expected to create inside its working
/// directory. Part of the external tool's contract.
pub const OUTPUT_DIR_NAME: &str = "generated";

/// File name of the archive written after a successful generation.
pub const ARCHIVE_FILE_NAME: &str = "generated.zip";

/// One generation request's isolated unit of work.
#[derive(Debug, Clone)]
pub struct Job {
    id: String,
    dir: PathBuf,
}

impl Job {
    /// Allocate a fresh job: generate a new id and create its directory
    /// under `workspace_root`.
    pub async fn create(workspace_root: &Path) -> Result<Self, CoreError> {
        let id = Uuid::new_v4().to_string();
        let dir = workspace_root.join(&id);
        tokio::fs::create_dir_all(&dir).await?;
        tracing::debug!(job_id = %id, dir = %dir.display(), "Job workspace created");
        Ok(Self { id, dir })
    }

    /// Locate an existing job by id without touching the filesystem.
    ///
    /// The id must parse as a UUID; this is what keeps a forged id like
    /// `../../etc` from escaping the workspace root. Whether the job ever
    /// existed is not checked here — the caller probes for artifacts.
    pub fn locate(workspace_root: &Path, id: &str) -> Result<Self, CoreError> {
        Uuid::parse_str(id).map_err(|_| CoreError::InvalidJobId(id.to_string()))?;
        Ok(Self {
            id: id.to_string(),
            dir: workspace_root.join(id),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The job's working directory. The generator runs with this as cwd.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the submitted YAML is saved to.
    pub fn input_path(&self) -> PathBuf {
        self.dir.join(INPUT_FILE_NAME)
    }

    /// Directory the generator writes its output tree into.
    pub fn output_dir(&self) -> PathBuf {
        self.dir.join(OUTPUT_DIR_NAME)
    }

    /// Fixed archive location; the download endpoint derives this from the
    /// job id alone.
    pub fn archive_path(&self) -> PathBuf {
        self.dir.join(ARCHIVE_FILE_NAME)
    }

    /// Write the submitted YAML verbatim as the job's input artifact.
    ///
    /// The content is not parsed or validated; malformed YAML is the
    /// generator's problem and surfaces as a generator failure.
    pub async fn write_input(&self, content: &[u8]) -> Result<(), CoreError> {
        tokio::fs::write(self.input_path(), content).await?;
        Ok(())
    }
}
