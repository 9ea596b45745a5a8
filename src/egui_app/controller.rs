//! Bridges the prediction form to the egui renderer and background requests.

mod background_jobs;
mod jobs;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::config::{self, AppSettings, ConfigError};
use crate::egui_app::state::{ExampleReview, StatusBarState, UiState};
use crate::egui_app::ui::style::StatusTone;
use crate::form::PredictionForm;
use crate::http_client::{JsonTransport, UreqTransport};
use crate::prediction::PredictionClient;

use jobs::ControllerJobs;

/// Transport handle shared with request threads.
pub type SharedTransport = Arc<dyn JsonTransport + Send + Sync>;
pub(crate) type SharedClient = Arc<PredictionClient<SharedTransport>>;

/// Maintains app state and bridges the prediction form to the egui UI.
pub struct EguiController {
    pub form: PredictionForm,
    pub ui: UiState,
    settings: AppSettings,
    transport: SharedTransport,
    client: SharedClient,
    jobs: ControllerJobs,
}

impl EguiController {
    /// Load persisted settings and talk to the configured endpoint over HTTP.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::load_or_default()?;
        Self::with_transport(settings, Arc::new(UreqTransport))
    }

    /// Build a controller around an explicit transport.
    pub fn with_transport(
        settings: AppSettings,
        transport: SharedTransport,
    ) -> Result<Self, ConfigError> {
        let endpoint = settings.endpoint_url()?;
        info!("Prediction endpoint: {endpoint}");
        let client = Arc::new(PredictionClient::new(endpoint, transport.clone()));
        let mut ui = UiState::default();
        ui.endpoint.input = settings.endpoint.clone();
        Ok(Self {
            form: PredictionForm::new(),
            ui,
            settings,
            transport,
            client,
            jobs: ControllerJobs::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        self.client.endpoint()
    }

    /// Send the current input for prediction on a background thread.
    pub fn submit(&mut self) {
        let Some(ticket) = self.form.begin_submit() else {
            return;
        };
        self.set_status("Predicting…", StatusTone::Busy);
        self.jobs.begin_prediction(self.client.clone(), ticket);
    }

    /// Replace the input with one of the built-in reviews.
    pub fn load_example(&mut self, example: ExampleReview) {
        self.form.set_input(example.text());
        self.ui.focus_input_requested = true;
    }

    pub fn clear_input(&mut self) {
        self.form.clear_input();
        self.ui.focus_input_requested = true;
    }

    /// Drain finished requests. Call once per frame.
    pub fn tick(&mut self) {
        self.poll_background_jobs();
    }

    /// Request threads still running, including superseded ones.
    pub fn predictions_in_flight(&self) -> usize {
        self.jobs.predictions_in_flight()
    }

    pub fn open_endpoint_editor(&mut self) {
        self.ui.endpoint.open = true;
        self.ui.endpoint.input = self.settings.endpoint.clone();
        self.ui.endpoint.last_error = None;
    }

    pub fn close_endpoint_editor(&mut self) {
        self.ui.endpoint.open = false;
        self.ui.endpoint.last_error = None;
    }

    /// Validate the edited endpoint, persist it, and route new requests to it.
    pub fn apply_endpoint_edit(&mut self) {
        let value = self.ui.endpoint.input.trim().to_string();
        let endpoint = match config::parse_endpoint(&value) {
            Ok(endpoint) => endpoint,
            Err(err) => {
                self.ui.endpoint.last_error = Some(err.to_string());
                return;
            }
        };
        self.settings.endpoint = value;
        self.client = Arc::new(PredictionClient::new(
            endpoint.clone(),
            self.transport.clone(),
        ));
        self.close_endpoint_editor();
        match config::save(&self.settings) {
            Ok(()) => self.set_status(format!("Endpoint set to {endpoint}"), StatusTone::Info),
            Err(err) => {
                warn!("Failed to save endpoint: {err}");
                self.set_status(
                    format!("Endpoint set to {endpoint} (not saved: {err})"),
                    StatusTone::Warning,
                );
            }
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::with_tone(text, tone);
    }
}
