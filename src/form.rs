//! Prediction request lifecycle shared by the desktop form and the CLI.
//!
//! A submission moves the form from `Idle` (or a finished state) to
//! `Loading`, and exactly one matching resolution moves it to `Succeeded` or
//! `Failed`. Each accepted submission is tagged with a [`RequestId`]; when a
//! newer submission supersedes an in-flight one, the older resolution is
//! discarded instead of overwriting the newer state.

use tracing::{debug, info};

use crate::http_client::JsonTransport;
use crate::prediction::{PredictError, Prediction, PredictionClient};

/// Message shown for every transport, status or payload failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Where the form is in the request lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Tag attached to each accepted submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Work order for an accepted submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    pub id: RequestId,
    pub text: String,
}

/// View state of the review prediction form.
#[derive(Debug)]
pub struct PredictionForm {
    input: String,
    result: Option<Prediction>,
    error: Option<String>,
    state: RequestState,
    pending: Option<RequestId>,
    next_request_id: u64,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            input: String::new(),
            result: None,
            error: None,
            state: RequestState::Idle,
            pending: None,
            next_request_id: 1,
        }
    }
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Mutable access for text widgets.
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// True when a submit would be ignored.
    pub fn input_is_blank(&self) -> bool {
        self.input.trim().is_empty()
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == RequestState::Loading
    }

    pub fn result(&self) -> Option<Prediction> {
        self.result
    }

    pub fn rating(&self) -> Option<f64> {
        self.result.map(|prediction| prediction.rating)
    }

    pub fn confidence(&self) -> Option<f64> {
        self.result.map(|prediction| prediction.confidence)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Id of the submission whose resolution will be applied, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    /// Start a submission from the current input.
    ///
    /// Blank input is ignored without touching any state. Otherwise the
    /// previous result and error are cleared, the form enters `Loading`, and
    /// the returned ticket must be handed back to [`Self::resolve`].
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.input_is_blank() {
            return None;
        }
        let id = RequestId(self.next_request_id);
        self.next_request_id = self.next_request_id.wrapping_add(1).max(1);
        if let Some(previous) = self.pending.replace(id) {
            debug!(
                previous = previous.get(),
                current = id.get(),
                "Superseding in-flight prediction request"
            );
        }
        self.error = None;
        self.result = None;
        self.state = RequestState::Loading;
        Some(SubmitTicket {
            id,
            text: self.input.clone(),
        })
    }

    /// Apply the outcome of the request tagged `id`.
    ///
    /// Returns `false` and leaves state untouched when `id` is not the
    /// pending request.
    pub fn resolve(&mut self, id: RequestId, outcome: Result<Prediction, PredictError>) -> bool {
        if self.pending != Some(id) {
            debug!(request = id.get(), "Discarding stale prediction result");
            return false;
        }
        self.pending = None;
        match outcome {
            Ok(prediction) => {
                info!(
                    rating = prediction.rating,
                    confidence = prediction.confidence,
                    "Prediction received"
                );
                self.result = Some(prediction);
                self.error = None;
                self.state = RequestState::Succeeded;
            }
            Err(err) => {
                info!("Prediction failed: {err}");
                self.result = None;
                self.error = Some(SERVER_ERROR_MESSAGE.to_string());
                self.state = RequestState::Failed;
            }
        }
        true
    }

    /// Submit and wait for the answer on the current thread.
    ///
    /// Returns `false` when the input was blank and nothing was sent.
    pub fn submit_with<T: JsonTransport>(&mut self, client: &PredictionClient<T>) -> bool {
        let Some(ticket) = self.begin_submit() else {
            return false;
        };
        let outcome = client.predict(&ticket.text);
        self.resolve(ticket.id, outcome)
    }
}
