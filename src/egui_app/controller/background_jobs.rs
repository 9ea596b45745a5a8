use super::jobs::JobMessage;
use super::*;
use crate::form::{RequestState, SERVER_ERROR_MESSAGE};

impl EguiController {
    pub(in crate::egui_app::controller) fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::PredictionFinished(message) => {
                    self.jobs.finish_prediction();
                    if !self.form.resolve(message.id, message.result) {
                        continue;
                    }
                    match (self.form.state(), self.form.result()) {
                        (RequestState::Succeeded, Some(prediction)) => self.set_status(
                            format!(
                                "Rating {:.2} ({:.0}% confidence)",
                                prediction.rating,
                                prediction.confidence * 100.0
                            ),
                            StatusTone::Info,
                        ),
                        _ => self.set_status(SERVER_ERROR_MESSAGE, StatusTone::Error),
                    }
                }
            }
        }
    }
}
