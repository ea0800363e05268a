//! Unit tests for the teardown service.

#![allow(clippy::expect_used)]

use stemcell_smoke::application::services::run_teardown;
use stemcell_smoke::domain::error::StepError;
use stemcell_smoke::domain::phase::{Phase, Session, Step};

use crate::mocks::{CollectingReporter, RecordingDirector};

#[tokio::test]
async fn test_teardown_deletes_then_cleans_up() {
    let director = RecordingDirector::new();
    let reporter = CollectingReporter::default();
    let mut session = Session::new();

    run_teardown(&director, &reporter, &mut session)
        .await
        .expect("teardown should succeed");

    assert_eq!(director.steps(), [Step::DeleteDeployment, Step::CleanUp]);
    assert_eq!(session.phase(), Phase::CleanedUp);
    assert!(reporter.warnings().is_empty());
}

#[tokio::test]
async fn test_teardown_cleans_up_even_when_delete_fails() {
    let director = RecordingDirector::failing(&[Step::DeleteDeployment]);
    let reporter = CollectingReporter::default();
    let mut session = Session::new();

    let err = run_teardown(&director, &reporter, &mut session)
        .await
        .expect_err("teardown should report the delete failure");

    assert_eq!(director.steps(), [Step::DeleteDeployment, Step::CleanUp]);
    assert!(matches!(
        err.downcast_ref::<StepError>(),
        Some(StepError::Exit {
            step: Step::DeleteDeployment,
            ..
        })
    ));
    assert_eq!(session.phase(), Phase::CleanedUp);
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("delete-deployment failed"), "{warnings:?}");
}

#[tokio::test]
async fn test_teardown_reports_clean_up_failure() {
    let director = RecordingDirector::failing(&[Step::CleanUp]);
    let reporter = CollectingReporter::default();
    let mut session = Session::new();

    let err = run_teardown(&director, &reporter, &mut session)
        .await
        .expect_err("clean-up failure should surface");

    assert!(matches!(
        err.downcast_ref::<StepError>(),
        Some(StepError::Exit {
            step: Step::CleanUp,
            ..
        })
    ));
    assert_eq!(session.phase(), Phase::Undeployed);
}

#[tokio::test]
async fn test_teardown_returns_first_error_when_both_fail() {
    let director = RecordingDirector::failing(&[Step::DeleteDeployment, Step::CleanUp]);
    let reporter = CollectingReporter::default();

    let err = run_teardown(&director, &reporter, &mut Session::new())
        .await
        .expect_err("both steps fail");

    assert!(err.to_string().starts_with("delete-deployment failed"), "{err}");
    assert_eq!(reporter.warnings().len(), 2);
}
