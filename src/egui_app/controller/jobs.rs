use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use tracing::warn;

use crate::form::{RequestId, SubmitTicket};
use crate::http_client::TransportError;
use crate::prediction::{PredictError, Prediction};

use super::SharedClient;

pub(crate) enum JobMessage {
    PredictionFinished(PredictionResult),
}

#[derive(Debug)]
pub(crate) struct PredictionResult {
    pub(crate) id: RequestId,
    pub(crate) result: Result<Prediction, PredictError>,
}

/// Background request threads and the channel they report through.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    predictions_in_flight: usize,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            predictions_in_flight: 0,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Number of request threads that have not reported back yet, stale ones included.
    pub(super) fn predictions_in_flight(&self) -> usize {
        self.predictions_in_flight
    }

    pub(super) fn begin_prediction(&mut self, client: SharedClient, ticket: SubmitTicket) {
        self.predictions_in_flight += 1;
        let id = ticket.id;
        let tx = self.message_tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("prediction-{}", id.get()))
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| client.predict(&ticket.text)))
                    .unwrap_or_else(|_| {
                        Err(PredictError::Transport(TransportError::Transport(
                            "prediction thread panicked".to_string(),
                        )))
                    });
                let _ = tx.send(JobMessage::PredictionFinished(PredictionResult { id, result }));
            });
        if let Err(err) = spawned {
            warn!("Failed to spawn prediction thread: {err}");
            // Resolve through the channel so loading still clears on the next poll.
            let _ = self
                .message_tx
                .send(JobMessage::PredictionFinished(PredictionResult {
                    id,
                    result: Err(PredictError::Transport(TransportError::Transport(
                        err.to_string(),
                    ))),
                }));
        }
    }

    pub(super) fn finish_prediction(&mut self) {
        self.predictions_in_flight = self.predictions_in_flight.saturating_sub(1);
    }
}
