use super::*;
use crate::form::{RequestState, SERVER_ERROR_MESSAGE};
use crate::http_client::TransportError;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Answers by review text: `slow` waits before replying, `broken` fails.
#[derive(Default)]
struct ReviewEcho {
    calls: AtomicUsize,
}

impl JsonTransport for ReviewEcho {
    fn post_json(&self, _url: &str, body: &Value) -> Result<Value, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = body["variables"]["text"].as_str().unwrap_or_default();
        match text {
            "broken" => Err(TransportError::Status {
                code: 500,
                body: "boom".into(),
            }),
            "slow" => {
                std::thread::sleep(Duration::from_millis(150));
                Ok(json!({ "data": { "predict": { "rating": 1.0, "confidence": 0.2 } } }))
            }
            _ => Ok(json!({ "data": { "predict": { "rating": 4.2, "confidence": 0.87 } } })),
        }
    }
}

fn controller_with(transport: Arc<ReviewEcho>) -> EguiController {
    EguiController::with_transport(AppSettings::default(), transport).unwrap()
}

fn wait_for_idle(controller: &mut EguiController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        controller.tick();
        if controller.predictions_in_flight() == 0 {
            return;
        }
        assert!(Instant::now() < deadline, "prediction threads did not finish");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn submit_applies_result_after_poll() {
    let transport = Arc::new(ReviewEcho::default());
    let mut controller = controller_with(transport.clone());
    controller.form.set_input("Bardzo dobre zajęcia");
    controller.submit();
    assert!(controller.form.is_loading());
    assert_eq!(controller.ui.status.tone, StatusTone::Busy);

    wait_for_idle(&mut controller);

    assert_eq!(controller.form.rating(), Some(4.2));
    assert_eq!(controller.form.confidence(), Some(0.87));
    assert!(!controller.form.is_loading());
    assert_eq!(controller.ui.status.tone, StatusTone::Info);
    assert_eq!(controller.ui.status.text, "Rating 4.20 (87% confidence)");
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn blank_submit_sends_nothing() {
    let transport = Arc::new(ReviewEcho::default());
    let mut controller = controller_with(transport.clone());
    controller.form.set_input("  ");
    controller.submit();
    assert_eq!(controller.predictions_in_flight(), 0);
    assert_eq!(controller.form.state(), RequestState::Idle);
    assert_eq!(controller.ui.status, StatusBarState::idle());
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn server_failure_sets_error_message() {
    let mut controller = controller_with(Arc::new(ReviewEcho::default()));
    controller.form.set_input("broken");
    controller.submit();
    wait_for_idle(&mut controller);

    assert_eq!(controller.form.error(), Some(SERVER_ERROR_MESSAGE));
    assert_eq!(controller.form.result(), None);
    assert!(!controller.form.is_loading());
    assert_eq!(controller.ui.status.tone, StatusTone::Error);

    controller.form.set_input("fine now");
    controller.submit();
    assert_eq!(controller.form.error(), None);
    wait_for_idle(&mut controller);
    assert_eq!(controller.form.rating(), Some(4.2));
}

#[test]
fn latest_submission_wins_over_slow_earlier_one() {
    let transport = Arc::new(ReviewEcho::default());
    let mut controller = controller_with(transport.clone());
    controller.form.set_input("slow");
    controller.submit();
    controller.form.set_input("quick");
    controller.submit();
    assert_eq!(controller.predictions_in_flight(), 2);

    wait_for_idle(&mut controller);

    assert_eq!(controller.form.rating(), Some(4.2));
    assert_eq!(controller.form.state(), RequestState::Succeeded);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn examples_replace_input_and_request_focus() {
    let mut controller = controller_with(Arc::new(ReviewEcho::default()));
    controller.ui.focus_input_requested = false;
    controller.form.set_input("draft");
    controller.load_example(ExampleReview::Positive);
    assert_eq!(controller.form.input(), ExampleReview::Positive.text());
    assert!(controller.ui.focus_input_requested);
    controller.clear_input();
    assert!(controller.form.input_is_blank());
}

#[test]
fn rejects_invalid_configured_endpoint() {
    let settings = AppSettings {
        endpoint: "localhost:5000".to_string(),
    };
    let result = EguiController::with_transport(settings, Arc::new(ReviewEcho::default()));
    assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
}

#[test]
fn invalid_endpoint_edit_keeps_current_endpoint() {
    let mut controller = controller_with(Arc::new(ReviewEcho::default()));
    controller.open_endpoint_editor();
    controller.ui.endpoint.input = "ftp://nowhere".to_string();
    controller.apply_endpoint_edit();
    assert!(controller.ui.endpoint.open);
    assert!(controller.ui.endpoint.last_error.is_some());
    assert_eq!(controller.endpoint().as_str(), config::DEFAULT_ENDPOINT);
}
