//! Domain error taxonomy for the generation pipeline.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Filesystem failure anywhere in the pipeline (workspace allocation,
    /// input write, tree walk).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The supplied job id is not a valid identifier. Job ids double as
    /// directory names, so anything that does not parse as a UUID is
    /// rejected before it can touch the filesystem.
    #[error("Invalid job id: {0}")]
    InvalidJobId(String),

    /// The generator binary could not be spawned (missing, not executable).
    #[error("Generator could not be started: {0}")]
    Spawn(std::io::Error),

    /// The generator ran and exited non-zero. `stderr` carries the tool's
    /// diagnostics verbatim; it becomes the error detail in the response.
    #[error("Generator exited with code {exit_code:?}: {stderr}")]
    GeneratorFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The generator exited zero but never created its output directory.
    /// A contract violation by the external tool, not bad input.
    #[error("generator reported success but produced no output")]
    MissingOutput,

    /// Archive creation failed.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}
