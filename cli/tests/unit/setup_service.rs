//! Unit tests for the setup service.

#![allow(clippy::expect_used)]

use stemcell_smoke::application::services::{Ports, run_setup};
use stemcell_smoke::domain::error::{CommandError, InputError, StepError};
use stemcell_smoke::domain::phase::{Phase, Session, Step};

use crate::helpers::{ASSETS, RELEASE_VERSION_FILE, config};
use crate::mocks::{
    CollectingReporter, MemFiles, MemRenderer, RENDERED_PATH, RecordingDirector,
    UnlaunchableDirector,
};

const SETUP_ORDER: [Step; 5] = [
    Step::Login,
    Step::UploadRelease,
    Step::UploadStemcell,
    Step::UpdateCloudConfig,
    Step::Deploy,
];

#[tokio::test]
async fn test_setup_runs_every_step_in_order() {
    let director = RecordingDirector::new();
    let files = MemFiles::standard();
    let renderer = MemRenderer::default();
    let reporter = CollectingReporter::default();
    let ports = Ports {
        director: &director,
        files: &files,
        renderer: &renderer,
        reporter: &reporter,
    };
    let mut session = Session::new();

    run_setup(&ports, &config(Some("vbox")), &mut session)
        .await
        .expect("setup should succeed");

    assert_eq!(director.steps(), SETUP_ORDER);
    assert_eq!(session.phase(), Phase::Deployed);
}

#[tokio::test]
async fn test_setup_passes_artifact_paths_and_rendered_manifest() {
    let director = RecordingDirector::new();
    let files = MemFiles::standard();
    let renderer = MemRenderer::default();
    let reporter = CollectingReporter::default();
    let ports = Ports {
        director: &director,
        files: &files,
        renderer: &renderer,
        reporter: &reporter,
    };

    run_setup(&ports, &config(Some("vbox")), &mut Session::new())
        .await
        .expect("setup should succeed");

    assert_eq!(
        director.args_of(Step::UploadRelease).expect("upload-release"),
        ["/smoke/syslog-release/release.tgz"]
    );
    assert_eq!(
        director.args_of(Step::UploadStemcell).expect("upload-stemcell"),
        ["/smoke/stemcell/stemcell.tgz"]
    );
    assert_eq!(
        director.args_of(Step::Deploy).expect("deploy"),
        [RENDERED_PATH]
    );
    assert_eq!(
        renderer.template_path.borrow().as_deref(),
        Some(std::path::Path::new(&format!("{ASSETS}/manifest.yml")))
    );
}

#[tokio::test]
async fn test_setup_substitutes_trimmed_versions() {
    let director = RecordingDirector::new();
    let files = MemFiles::standard();
    let renderer = MemRenderer::default();
    let reporter = CollectingReporter::default();
    let ports = Ports {
        director: &director,
        files: &files,
        renderer: &renderer,
        reporter: &reporter,
    };

    run_setup(&ports, &config(Some("vbox")), &mut Session::new())
        .await
        .expect("setup should succeed");

    let rendered = renderer.rendered.borrow().clone().expect("manifest rendered");
    assert!(rendered.contains("version: 11.3.2\n"), "{rendered}");
    assert!(rendered.contains("version: 1.406\n"), "{rendered}");
    assert!(!rendered.contains("{{"), "{rendered}");
}

#[tokio::test]
async fn test_setup_stops_at_first_failing_step() {
    for (index, failing) in SETUP_ORDER.iter().enumerate() {
        let director = RecordingDirector::failing(&[*failing]);
        let files = MemFiles::standard();
        let renderer = MemRenderer::default();
        let reporter = CollectingReporter::default();
        let ports = Ports {
            director: &director,
            files: &files,
            renderer: &renderer,
            reporter: &reporter,
        };
        let mut session = Session::new();

        let err = run_setup(&ports, &config(None), &mut session)
            .await
            .expect_err("setup should fail");

        assert_eq!(director.steps(), &SETUP_ORDER[..=index], "failing {failing}");
        let step_err = err
            .downcast_ref::<StepError>()
            .expect("error should be a StepError");
        assert!(matches!(step_err, StepError::Exit { step, .. } if step == failing));
        let expected_phase = if index == 0 {
            Phase::Unvalidated
        } else {
            SETUP_ORDER[index - 1].target()
        };
        assert_eq!(session.phase(), expected_phase);
    }
}

#[tokio::test]
async fn test_setup_failure_message_carries_director_output() {
    let director = RecordingDirector::failing(&[Step::Login]);
    let files = MemFiles::standard();
    let renderer = MemRenderer::default();
    let reporter = CollectingReporter::default();
    let ports = Ports {
        director: &director,
        files: &files,
        renderer: &renderer,
        reporter: &reporter,
    };

    let err = run_setup(&ports, &config(None), &mut Session::new())
        .await
        .expect_err("login should fail");
    let message = err.to_string();

    assert!(message.starts_with("login failed (exit 1)"), "{message}");
    assert!(message.contains("login stdout"), "{message}");
    assert!(message.contains("login stderr"), "{message}");
}

#[tokio::test]
async fn test_setup_launch_failure_is_a_command_error() {
    let director = UnlaunchableDirector::new();
    let files = MemFiles::standard();
    let renderer = MemRenderer::default();
    let reporter = CollectingReporter::default();
    let ports = Ports {
        director: &director,
        files: &files,
        renderer: &renderer,
        reporter: &reporter,
    };
    let mut session = Session::new();

    let err = run_setup(&ports, &config(None), &mut session)
        .await
        .expect_err("launch should fail");

    assert!(err.chain().any(|c| c.is::<CommandError>()), "{err:#}");
    assert_eq!(director.steps(), [Step::Login]);
    assert_eq!(session.phase(), Phase::Unvalidated);
}

#[tokio::test]
async fn test_setup_missing_version_file_stops_before_deploy() {
    let director = RecordingDirector::new();
    let files = MemFiles::standard().without(RELEASE_VERSION_FILE);
    let renderer = MemRenderer::default();
    let reporter = CollectingReporter::default();
    let ports = Ports {
        director: &director,
        files: &files,
        renderer: &renderer,
        reporter: &reporter,
    };
    let mut session = Session::new();

    let err = run_setup(&ports, &config(Some("vbox")), &mut session)
        .await
        .expect_err("missing version file should fail");

    assert!(err.chain().any(|c| c.is::<InputError>()), "{err:#}");
    assert!(!director.steps().contains(&Step::Deploy));
    assert_eq!(session.phase(), Phase::ConfigApplied);
}
