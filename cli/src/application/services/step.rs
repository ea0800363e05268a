//! Running one gated director step.

use std::future::Future;
use std::process::Output;

use anyhow::{Context, Result};

use crate::domain::error::{CommandError, StepError};
use crate::domain::phase::{Session, Step};

/// Turn a finished invocation into success or a `StepError::Exit`.
///
/// # Errors
///
/// Returns `StepError::Exit` carrying stdout and stderr verbatim when the
/// process did not exit zero.
pub fn ensure_success(step: Step, output: &Output) -> Result<(), StepError> {
    if output.status.success() {
        return Ok(());
    }
    Err(StepError::Exit {
        step,
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Await `invocation`, check its exit status, then advance `session`.
///
/// Output of a failed invocation is never consulted beyond the error report.
///
/// # Errors
///
/// Returns an error if the process could not run, exited nonzero, or the
/// step is out of order for the session.
pub async fn run_step<F>(session: &mut Session, step: Step, invocation: F) -> Result<()>
where
    F: Future<Output = Result<Output, CommandError>>,
{
    let output = invocation.await.with_context(|| format!("running {step}"))?;
    ensure_success(step, &output)?;
    session.complete(step)?;
    tracing::info!(%step, phase = %session.phase(), "step succeeded");
    Ok(())
}
