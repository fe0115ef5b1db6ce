//! External generator invocation.
//!
//! The generator is an opaque command-line tool invoked as
//! `<tool> generate -c <input-path>` with the job directory as its working
//! directory, so relative output paths land inside the job's workspace. Its
//! contract is to create a `generated/` subdirectory there; nothing else
//! about its behaviour is assumed.

use std::process::Stdio;

use crate::error::CoreError;
use crate::job::Job;

/// Structured result of one generator run.
///
/// Always populated, success or not, so failure detail (the captured
/// stderr) is available for the error response instead of being lost
/// inside an exception path.
#[derive(Debug)]
pub struct GeneratorInvocation {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    success: bool,
}

impl GeneratorInvocation {
    /// Whether the process exited with a zero status.
    pub fn success(&self) -> bool {
        self.success
    }
}

/// Run the generator against the job's input artifact.
///
/// Blocks (asynchronously) until the child exits; there is no timeout and
/// no cancellation propagation — a disconnected client does not kill the
/// child. Returns `Err` only when the process cannot be spawned at all;
/// a non-zero exit is reported through the returned invocation.
pub async fn invoke(program: &str, job: &Job) -> Result<GeneratorInvocation, CoreError> {
    tracing::info!(job_id = %job.id(), %program, "Invoking generator");

    let output = tokio::process::Command::new(program)
        .arg("generate")
        .arg("-c")
        .arg(job.input_path())
        .current_dir(job.dir())
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(CoreError::Spawn)?;

    let invocation = GeneratorInvocation {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    };

    tracing::debug!(
        job_id = %job.id(),
        exit_code = ?invocation.exit_code,
        success = invocation.success,
        "Generator finished"
    );

    Ok(invocation)
}

/// Check the generator's output contract after a successful exit.
///
/// The tool must have created `generated/` inside the job directory;
/// absence means it violated its contract even though it reported success.
pub fn verify_output(job: &Job) -> Result<(), CoreError> {
    if job.output_dir().is_dir() {
        Ok(())
    } else {
        Err(CoreError::MissingOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::Job;
    use std::path::Path;

    /// Write an executable shell script to use as a stand-in generator.
    fn write_fake_generator(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-generator.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn invoke_runs_in_job_directory_and_passes_input_path() {
        let root = tempfile::tempdir().unwrap();
        let job = Job::create(root.path()).await.unwrap();
        job.write_input(b"name: demo\n").await.unwrap();

        // Echoes its config argument and copies the input into the output
        // tree, proving both cwd and the -c argument are wired correctly.
        let program = write_fake_generator(
            root.path(),
            "mkdir -p generated\ncp \"$3\" generated/config-copy.yaml\necho \"config=$3\"",
        );

        let invocation = invoke(&program, &job).await.unwrap();

        assert!(invocation.success());
        assert_eq!(invocation.exit_code, Some(0));
        assert!(invocation.stdout.contains("input.yaml"));
        assert!(job.output_dir().join("config-copy.yaml").is_file());
        verify_output(&job).unwrap();
    }

    #[tokio::test]
    async fn non_zero_exit_captures_stderr() {
        let root = tempfile::tempdir().unwrap();
        let job = Job::create(root.path()).await.unwrap();
        job.write_input(b"bad: [yaml\n").await.unwrap();

        let program = write_fake_generator(
            root.path(),
            "echo 'unsupported directive: frobnicate' >&2\nexit 2",
        );

        let invocation = invoke(&program, &job).await.unwrap();

        assert!(!invocation.success());
        assert_eq!(invocation.exit_code, Some(2));
        assert!(invocation.stderr.contains("unsupported directive"));
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let root = tempfile::tempdir().unwrap();
        let job = Job::create(root.path()).await.unwrap();
        job.write_input(b"name: demo\n").await.unwrap();

        let err = invoke("/nonexistent/specgen-binary", &job).await.unwrap_err();
        assert!(matches!(err, CoreError::Spawn(_)));
    }

    #[tokio::test]
    async fn success_without_output_violates_the_contract() {
        let root = tempfile::tempdir().unwrap();
        let job = Job::create(root.path()).await.unwrap();
        job.write_input(b"name: demo\n").await.unwrap();

        let program = write_fake_generator(root.path(), "exit 0");

        let invocation = invoke(&program, &job).await.unwrap();
        assert!(invocation.success());

        let err = verify_output(&job).unwrap_err();
        assert!(matches!(err, CoreError::MissingOutput));
    }
}
