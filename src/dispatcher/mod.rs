//! Turns one decoded source submission into a compiler verdict.
//!
//! The dispatcher stages the source as a uniquely named scratch file, invokes
//! the external compiler against it as `<interpreter> <script> <artifact>`,
//! and reduces the process output to a single result line. The compiler is an
//! opaque tool: diagnostics first, authoritative result on the last complete
//! line of output.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;
use tokio::process::Command;
use uuid::Uuid;

use crate::config::{CompilerCommand, Config};
use crate::types::CompileResult;

/// Errors raised while staging or compiling one submission. Every variant is
/// terminal for its request; nothing is retried.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The scratch artifact could not be written; the compiler never ran.
    #[error("failed to write scratch artifact {path}: {source}")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler could not be spawned or exited non-zero. `output` is the
    /// merged captured text verbatim (for a spawn failure, the OS error).
    #[error("compiler invocation failed")]
    ProcessFailed { output: String },

    /// The compiler outlived the configured bound and was killed.
    #[error("compiler did not finish within {limit:?}")]
    Timeout { limit: Duration },
}

pub struct CompileDispatcher {
    compiler: CompilerCommand,
    scratch_dir: PathBuf,
    timeout: Duration,
}

impl CompileDispatcher {
    pub fn new(config: &Config) -> Self {
        CompileDispatcher {
            compiler: config.compiler.clone(),
            scratch_dir: config.scratch_dir.clone(),
            timeout: config.compile_timeout,
        }
    }

    /// Compile one decoded source text.
    ///
    /// Writes the source to a scratch file whose name carries a fresh UUID,
    /// so concurrent requests never collide, then runs the compiler and
    /// extracts the result line. The scratch file is removed on every exit
    /// path. Double quotes are stripped from the payload, an artifact of the
    /// transported-as-JSON-string convention of the original front end.
    pub async fn compile(&self, source: &str) -> Result<CompileResult, CompileError> {
        let artifact = self.scratch_dir.join(Uuid::new_v4().to_string());
        tokio::fs::write(&artifact, source)
            .await
            .map_err(|source| CompileError::ArtifactWrite {
                path: artifact.clone(),
                source,
            })?;
        debug!("staged submission at {}", artifact.display());

        let outcome = self.run_compiler(&artifact).await;
        remove_artifact(&artifact).await;

        let output = outcome?;
        let text = result_tail(&output).replace('"', "");
        Ok(CompileResult { text })
    }

    /// Run the compiler against a staged artifact and capture its merged
    /// output (stdout followed by stderr), bounded by the configured timeout.
    async fn run_compiler(&self, artifact: &Path) -> Result<String, CompileError> {
        let mut command = Command::new(&self.compiler.interpreter);
        command
            .arg(&self.compiler.script)
            .arg(artifact)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| CompileError::ProcessFailed {
            output: e.to_string(),
        })?;

        // kill_on_drop reaps the child when the abandoned wait is dropped, so
        // a timeout leaves no process handle or pipe behind.
        let waited = tokio::time::timeout(self.timeout, child.wait_with_output()).await;
        let output = match waited {
            Ok(done) => done.map_err(|e| CompileError::ProcessFailed {
                output: e.to_string(),
            })?,
            Err(_elapsed) => {
                return Err(CompileError::Timeout {
                    limit: self.timeout,
                })
            }
        };

        let mut merged = String::from_utf8_lossy(&output.stdout).into_owned();
        merged.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(merged)
        } else {
            Err(CompileError::ProcessFailed { output: merged })
        }
    }
}

/// Extract the authoritative result line from the compiler's merged output.
///
/// The compiler prints diagnostic lines first and the result on the final
/// complete line, so the payload is the text between the second-to-last and
/// last newline boundaries; anything after the last newline is ignored. With
/// a single newline that is the text before it. With no newline at all the
/// whole text is taken, so a newline-free output is a result, not an error,
/// and empty output yields an empty payload.
fn result_tail(output: &str) -> &str {
    match output.rfind('\n') {
        Some(last) => {
            let before = &output[..last];
            match before.rfind('\n') {
                Some(second_last) => &output[second_last + 1..last],
                None => before,
            }
        }
        None => output,
    }
}

/// Best-effort scratch cleanup; never changes the request outcome.
async fn remove_artifact(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("failed to remove scratch artifact {}: {}", path.display(), e);
    }
}
