//! Application service: a whole smoke suite with guaranteed teardown.
//!
//! Setup and the external test command run inside a scope raced against an
//! interrupt. Whatever happens inside that scope, teardown runs afterwards.

use std::future::Future;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use crate::application::ports::{
    CommandRunner, Director, InputFiles, ManifestRenderer, ProgressReporter,
};
use crate::application::services::setup::{Ports, run_setup};
use crate::application::services::teardown::run_teardown;
use crate::domain::config::SmokeConfig;
use crate::domain::error::StepError;
use crate::domain::phase::{Phase, Session};

/// Result of one stage of the suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed { message: String },
    Skipped,
}

impl Outcome {
    fn of(result: &Result<()>) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(e) => Self::Failed {
                message: format!("{e:#}"),
            },
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// What the suite did, for human or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// Furthest phase reached before teardown began.
    pub reached: Phase,
    pub setup: Outcome,
    pub tests: Outcome,
    pub teardown: Outcome,
}

impl SuiteReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        !(self.setup.is_failed() || self.tests.is_failed() || self.teardown.is_failed())
    }
}

/// The report plus the first error encountered, if any.
pub struct SuiteOutcome {
    pub report: SuiteReport,
    pub error: Option<anyhow::Error>,
}

/// Run the external test command with inherited stdio.
async fn run_tests(runner: &impl CommandRunner, command: &[String]) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        return Ok(());
    };
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let status = runner
        .run_status(program, &args)
        .await
        .with_context(|| format!("running test command {program}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(StepError::Tests(status.code()).into())
    }
}

/// Setup, optional tests, then unconditional teardown.
///
/// `test_command` may be empty, in which case the tests stage is skipped.
/// If `interrupt` resolves before setup and tests finish, the in-flight step
/// is dropped (its child process is killed) and teardown starts.
pub async fn run_suite<D, F, M, R, C>(
    ports: &Ports<'_, D, F, M, R>,
    runner: &C,
    config: &SmokeConfig,
    test_command: &[String],
    interrupt: impl Future<Output = ()>,
) -> SuiteOutcome
where
    D: Director,
    F: InputFiles,
    M: ManifestRenderer,
    R: ProgressReporter,
    C: CommandRunner,
{
    let mut session = Session::new();

    let work = async {
        let setup = run_setup(ports, config, &mut session).await;
        let tests = match (&setup, test_command.is_empty()) {
            (Ok(()), false) => {
                ports.reporter.step("running tests...");
                Some(run_tests(runner, test_command).await)
            }
            _ => None,
        };
        (setup, tests)
    };

    let (setup, tests) = tokio::select! {
        done = work => done,
        () = interrupt => (Err(anyhow!("interrupted")), None),
    };

    // An interrupt during the tests leaves setup complete.
    let (setup, tests) = match (setup, tests) {
        (Err(e), None) if session.phase() == Phase::Deployed && !test_command.is_empty() => {
            (Ok(()), Some(Err(e)))
        }
        other => other,
    };

    if let Some(Ok(())) = &tests {
        ports.reporter.success("tests passed");
    }

    let reached = session.phase();
    let teardown = run_teardown(ports.director, ports.reporter, &mut session).await;

    let report = SuiteReport {
        reached,
        setup: Outcome::of(&setup),
        tests: tests.as_ref().map_or(Outcome::Skipped, Outcome::of),
        teardown: Outcome::of(&teardown),
    };
    let error = setup
        .err()
        .or_else(|| tests.and_then(Result::err))
        .or_else(|| teardown.err());

    SuiteOutcome { report, error }
}
