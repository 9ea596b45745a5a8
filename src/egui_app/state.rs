//! Shared state types for the egui UI.

use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

/// Upper end of the rating scale used for colouring results.
pub const RATING_SCALE_MAX: f64 = 5.0;

/// Top-level UI model consumed by the egui renderer, next to the form itself.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub endpoint: EndpointEditorState,
    /// Whether the review box should grab keyboard focus next frame.
    pub focus_input_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            endpoint: EndpointEditorState::default(),
            focus_input_requested: true,
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
    pub tone: StatusTone,
}

impl StatusBarState {
    /// Default status shown before the first prediction.
    pub fn idle() -> Self {
        Self::with_tone("Paste a review and press Predict", StatusTone::Idle)
    }

    pub fn with_tone(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            badge_label: style::status_badge_label(tone).to_string(),
            badge_color: style::status_badge_color(tone),
            tone,
        }
    }
}

/// Inline editor for the GraphQL endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointEditorState {
    /// Whether the editor row is expanded.
    pub open: bool,
    /// Text being edited.
    pub input: String,
    /// Validation or save failure from the last attempt.
    pub last_error: Option<String>,
}

/// Built-in review samples the user can load into the text box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExampleReview {
    Negative,
    Positive,
}

impl ExampleReview {
    pub fn label(self) -> &'static str {
        match self {
            Self::Negative => "Negative example",
            Self::Positive => "Positive example",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Negative => {
                "Prowadzący nie potrafił jasno przekazać materiału, co utrudniało zrozumienie \
                 tematu. Zajęcia były chaotyczne i brakowało im struktury. Często odbiegał od \
                 tematu, co wprowadzało zamieszanie. Nie odpowiadał wyczerpująco na pytania \
                 studentów. Ogólnie prowadzenie zajęć pozostawiało wiele do życzenia."
            }
            Self::Positive => {
                "Prowadzący był doskonale przygotowany, przekazywał materiał w sposób jasny i \
                 zorganizowany. Zachęcał do aktywnego udziału i wyczerpująco odpowiadał na \
                 pytania. Zajęcia miały logiczną strukturę, co znacząco ułatwiało \
                 przyswajanie wiedzy."
            }
        }
    }
}
