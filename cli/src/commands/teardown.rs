//! `stemcell-smoke teardown`: delete the smoke deployment and clean up.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::run_teardown;
use crate::domain::phase::Session;

/// Run `stemcell-smoke teardown`.
///
/// # Errors
///
/// Returns the first failure; the second step is attempted regardless.
pub async fn run(app: &AppContext) -> Result<()> {
    let mut session = Session::new();
    {
        let reporter = app.reporter();
        run_teardown(&app.director, &reporter, &mut session).await?;
    }

    if app.is_json() {
        println!("{}", serde_json::json!({ "phase": session.phase() }));
    } else {
        app.output.success("teardown complete");
    }
    Ok(())
}
