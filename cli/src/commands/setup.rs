//! `stemcell-smoke setup`: run the setup half on its own.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::services::run_setup;
use crate::domain::phase::Session;

/// Run `stemcell-smoke setup`.
///
/// # Errors
///
/// Returns the first failing step's error, annotated with the phase reached.
pub async fn run(app: &AppContext) -> Result<()> {
    let mut session = Session::new();
    let result = {
        let reporter = app.reporter();
        run_setup(&app.ports(&reporter), &app.config, &mut session).await
    };
    let phase = session.phase();
    result.with_context(|| format!("setup stopped after phase '{phase}'"))?;

    if app.is_json() {
        println!("{}", serde_json::json!({ "phase": phase }));
    } else {
        app.output.success(&format!("smoke deployment is {phase}"));
    }
    Ok(())
}
