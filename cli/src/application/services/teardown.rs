//! Application service: teardown of the smoke deployment.

use anyhow::Result;

use crate::application::ports::{Director, ProgressReporter};
use crate::application::services::step::run_step;
use crate::domain::phase::{Session, Step};

/// Delete the smoke deployment, then clean up the director.
///
/// Both invocations are always attempted. Each failure is reported as it
/// happens; the first one is returned.
///
/// # Errors
///
/// Returns the delete-deployment error if that step failed, otherwise the
/// clean-up error.
pub async fn run_teardown(
    director: &impl Director,
    reporter: &impl ProgressReporter,
    session: &mut Session,
) -> Result<()> {
    reporter.step("deleting deployment...");
    let deleted = run_step(session, Step::DeleteDeployment, director.delete_deployment()).await;
    match &deleted {
        Ok(()) => reporter.success("deployment deleted"),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "delete-deployment failed");
            reporter.warn(&format!("delete-deployment failed: {e:#}"));
        }
    }

    reporter.step("cleaning up director...");
    let cleaned = run_step(session, Step::CleanUp, director.clean_up()).await;
    match &cleaned {
        Ok(()) => reporter.success("director cleaned up"),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "clean-up failed");
            reporter.warn(&format!("clean-up failed: {e:#}"));
        }
    }

    deleted.and(cleaned)
}
