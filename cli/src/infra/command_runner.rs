//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` runs external programs with tokio, reading stdout
//! and stderr concurrently with `wait()`, and kills the child on timeout or
//! when the future is dropped.

use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::application::ports::CommandRunner;
use crate::domain::error::CommandError;

/// Production `CommandRunner`.
///
/// With no timeout the runner waits as long as the child runs, which is what
/// a long `upload-stemcell` needs by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner {
    timeout: Option<Duration>,
    status_stdout_to_stderr: bool,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            status_stdout_to_stderr: false,
        }
    }

    /// Send the stdout of `run_status` children to our stderr, keeping our
    /// stdout for machine-readable output.
    #[must_use]
    pub fn with_status_stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.status_stdout_to_stderr = enabled;
        self
    }

    fn status_stdout(&self) -> Stdio {
        if self.status_stdout_to_stderr {
            Stdio::from(std::io::stderr())
        } else {
            Stdio::inherit()
        }
    }
}

async fn drain<H: AsyncRead + Unpin>(program: &str, stream: &str, handle: Option<H>) -> Vec<u8> {
    let mut buf = Vec::new();
    let Some(mut h) = handle else {
        return buf;
    };
    if let Err(e) = h.read_to_end(&mut buf).await {
        tracing::warn!(program, stream, error = %e, kept = buf.len(), "output truncated");
    }
    buf
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output, CommandError> {
        tracing::debug!(program, ?args, "running command");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Launch {
                program: program.to_string(),
                source,
            })?;

        let stdout_handle = child.stdout.take();
        let stderr_handle = child.stderr.take();

        // Read stdout/stderr CONCURRENTLY with wait() so a chatty child never
        // blocks on a full pipe.
        let collect = async {
            let (status, stdout, stderr) =
                tokio::join!(
                child.wait(),
                drain(program, "stdout", stdout_handle),
                drain(program, "stderr", stderr_handle)
            );
            let status = status.map_err(|source| CommandError::Wait {
                program: program.to_string(),
                source,
            })?;
            Ok(Output {
                status,
                stdout,
                stderr,
            })
        };

        let output = match self.timeout {
            None => collect.await,
            Some(timeout) => {
                let finished = tokio::time::timeout(timeout, collect).await;
                if let Ok(result) = finished {
                    result
                } else {
                    let _ = child.kill().await;
                    return Err(CommandError::TimedOut {
                        program: program.to_string(),
                        after: timeout,
                    });
                }
            }
        }?;

        tracing::debug!(program, status = %output.status, "command finished");
        Ok(output)
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus, CommandError> {
        tracing::debug!(program, ?args, "running command with inherited stdio");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdout(self.status_stdout())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Launch {
                program: program.to_string(),
                source,
            })?;

        child.wait().await.map_err(|source| CommandError::Wait {
            program: program.to_string(),
            source,
        })
    }
}
