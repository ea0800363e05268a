//! `stemcell-smoke run`: full suite with guaranteed teardown.

use std::future::Future;

use anyhow::{Result, bail};
use clap::Args;
use tokio::sync::watch;

use crate::app::AppContext;
use crate::application::services::{SuiteOutcome, SuiteReport, run_suite};
use crate::output::json;

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    /// Test command to run once deployed, e.g. `-- ginkgo -r smoke`
    #[arg(last = true, value_name = "TEST_COMMAND")]
    pub test_command: Vec<String>,
}

/// Count Ctrl-C presses for the rest of the process.
///
/// If the handler cannot be installed the sender is dropped and waiters
/// never resolve.
fn count_ctrl_c() -> watch::Receiver<u32> {
    let (tx, rx) = watch::channel(0);
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            tx.send_modify(|n| *n += 1);
            match *tx.borrow() {
                1 => tracing::warn!("interrupted, tearing down (Ctrl-C again to abandon)"),
                _ => tracing::warn!("interrupted again, abandoning teardown"),
            }
        }
    });
    rx
}

/// Resolves once `count` presses have been seen.
async fn presses(mut rx: watch::Receiver<u32>, count: u32) {
    if rx.wait_for(|n| *n >= count).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Drive `work` to completion unless `abandon` resolves first.
///
/// Dropping `work` kills any child it is waiting on.
async fn unless<T>(work: impl Future<Output = T>, abandon: impl Future<Output = ()>) -> Option<T> {
    tokio::select! {
        out = work => Some(out),
        () = abandon => None,
    }
}

/// Run `stemcell-smoke run`.
///
/// The first Ctrl-C stops setup or tests and tears down; a second one
/// abandons teardown.
///
/// # Errors
///
/// Returns the first failure among setup, tests and teardown, after the
/// report has been printed.
pub async fn run(args: &RunArgs, app: &AppContext) -> Result<()> {
    let interrupts = count_ctrl_c();
    let finished = {
        let reporter = app.reporter();
        let ports = app.ports(&reporter);
        let suite = run_suite(
            &ports,
            app.director.runner(),
            &app.config,
            &args.test_command,
            presses(interrupts.clone(), 1),
        );
        unless(suite, presses(interrupts, 2)).await
    };
    let Some(SuiteOutcome { report, error }) = finished else {
        bail!("interrupted twice; teardown abandoned, deployment may still exist");
    };

    if app.is_json() {
        println!("{}", json::to_pretty(&report)?);
    } else {
        print_report(app, &report);
    }

    match error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn print_report(app: &AppContext, report: &SuiteReport) {
    let ctx = &app.output;
    ctx.header("Smoke suite");
    ctx.phase("Reached", report.reached);
    ctx.outcome("Setup", &report.setup);
    ctx.outcome("Tests", &report.tests);
    ctx.outcome("Teardown", &report.teardown);
    if report.passed() {
        ctx.success("smoke suite passed");
    } else {
        ctx.error("smoke suite failed");
    }
}
