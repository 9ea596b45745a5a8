mod support;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use opinion_rater::{
    config::{self, AppSettings, ConfigError, DEFAULT_ENDPOINT},
    egui_app::controller::EguiController,
    form::{RequestState, SERVER_ERROR_MESSAGE},
    http_client::UreqTransport,
};
use support::{env::AppEnvGuard, graphql_server::CannedServer};
use tempfile::tempdir;

fn controller_for(endpoint: &str) -> EguiController {
    let settings = AppSettings {
        endpoint: endpoint.to_string(),
    };
    EguiController::with_transport(settings, Arc::new(UreqTransport)).expect("controller")
}

fn settle(controller: &mut EguiController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while controller.form.is_loading() {
        assert!(Instant::now() < deadline, "prediction did not finish");
        std::thread::sleep(Duration::from_millis(10));
        controller.tick();
    }
}

#[test]
fn controller_rates_review_against_live_endpoint() {
    let server = CannedServer::predicting(4.2, 0.87);
    let mut controller = controller_for(&server.url);
    controller.form.set_input("Świetny prowadzący, polecam.");

    controller.submit();
    assert!(controller.form.is_loading());
    settle(&mut controller);

    assert_eq!(controller.form.state(), RequestState::Succeeded);
    assert_eq!(controller.form.rating(), Some(4.2));
    assert_eq!(controller.form.confidence(), Some(0.87));
    assert_eq!(controller.form.error(), None);

    let request = server.next_request();
    assert_eq!(request["variables"]["text"], "Świetny prowadzący, polecam.");
    assert!(
        request["query"]
            .as_str()
            .is_some_and(|query| query.contains("predict"))
    );
}

#[test]
fn server_failure_surfaces_generic_error() {
    let server = CannedServer::start(vec![(
        "500 Internal Server Error",
        r#"{"errors":[{"message":"model crashed"}]}"#.to_string(),
    )]);
    let mut controller = controller_for(&server.url);
    controller.form.set_input("Nudne zajęcia");

    controller.submit();
    settle(&mut controller);

    assert_eq!(controller.form.state(), RequestState::Failed);
    assert_eq!(controller.form.error(), Some(SERVER_ERROR_MESSAGE));
    assert_eq!(controller.form.result(), None);
    assert_eq!(controller.form.input(), "Nudne zajęcia");
}

#[test]
fn graphql_errors_with_ok_status_are_failures() {
    let server = CannedServer::start(vec![(
        "200 OK",
        r#"{"data":null,"errors":[{"message":"text must not be empty"}]}"#.to_string(),
    )]);
    let mut controller = controller_for(&server.url);
    controller.form.set_input("x");

    controller.submit();
    settle(&mut controller);

    assert_eq!(controller.form.error(), Some(SERVER_ERROR_MESSAGE));
}

#[test]
fn env_override_replaces_stored_endpoint() {
    let dir = tempdir().unwrap();
    let mut env = AppEnvGuard::set_config_home(dir.path());

    let defaults = config::load_or_default().unwrap();
    assert_eq!(defaults.endpoint, DEFAULT_ENDPOINT);

    config::save(&AppSettings {
        endpoint: "http://stored.test:5000/graphql".into(),
    })
    .unwrap();
    assert_eq!(
        config::load_or_default().unwrap().endpoint,
        "http://stored.test:5000/graphql"
    );

    env.set_endpoint("http://override.test/graphql");
    assert_eq!(
        config::load_or_default().unwrap().endpoint,
        "http://override.test/graphql"
    );

    env.set_endpoint("not a url");
    assert!(matches!(
        config::load_or_default(),
        Err(ConfigError::InvalidEndpoint { .. })
    ));
}

#[test]
fn endpoint_edit_is_persisted_and_used() {
    let dir = tempdir().unwrap();
    let _env = AppEnvGuard::set_config_home(dir.path());
    let server = CannedServer::predicting(1.5, 0.4);

    let mut controller = EguiController::load().unwrap();
    assert_eq!(controller.endpoint().as_str(), DEFAULT_ENDPOINT);

    controller.open_endpoint_editor();
    controller.ui.endpoint.input = server.url.clone();
    controller.apply_endpoint_edit();
    assert!(!controller.ui.endpoint.open);
    assert_eq!(controller.endpoint().as_str(), server.url);

    let reloaded = config::load_or_default().unwrap();
    assert_eq!(reloaded.endpoint, server.url);

    controller.form.set_input("Średnio");
    controller.submit();
    settle(&mut controller);
    assert_eq!(controller.form.rating(), Some(1.5));
}

#[test]
fn class_label_rating_from_service_is_shown() {
    let server = CannedServer::start(vec![(
        "200 OK",
        r#"{"data":{"predict":{"rating":"5,0","confidence":0.91}},"errors":null}"#.to_string(),
    )]);
    let mut controller = controller_for(&server.url);
    controller.form.set_input("Polecam każdemu");

    controller.submit();
    settle(&mut controller);

    assert_eq!(controller.form.state(), RequestState::Succeeded);
    assert_eq!(controller.form.rating(), Some(5.0));
    assert_eq!(controller.form.confidence(), Some(0.91));
}
