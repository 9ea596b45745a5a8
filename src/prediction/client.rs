use tracing::{debug, warn};
use url::Url;

use super::graphql::{self, Prediction, ResponseError};
use crate::http_client::{JsonTransport, TransportError};

/// Why a prediction request produced no rating.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<ResponseError> for PredictError {
    fn from(error: ResponseError) -> Self {
        match error {
            ResponseError::GraphQl(messages) => Self::GraphQl(messages),
            ResponseError::Malformed(message) => Self::Malformed(message),
        }
    }
}

/// Issues GraphQL calls against one endpoint through an injected transport.
#[derive(Clone, Debug)]
pub struct PredictionClient<T> {
    endpoint: Url,
    transport: T,
}

impl<T: JsonTransport> PredictionClient<T> {
    pub fn new(endpoint: Url, transport: T) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Request a rating for `text`. One attempt, no retry.
    pub fn predict(&self, text: &str) -> Result<Prediction, PredictError> {
        debug!(
            chars = text.chars().count(),
            endpoint = %self.endpoint,
            "Sending prediction request"
        );
        let reply = self
            .transport
            .post_json(self.endpoint.as_str(), &graphql::predict_request(text))
            .inspect_err(|err| warn!("Prediction request failed: {err}"))?;
        let prediction = graphql::parse_predict_response(reply)
            .inspect_err(|err| warn!("Prediction response rejected: {err}"))?;
        debug!(
            rating = prediction.rating,
            confidence = prediction.confidence,
            "Received prediction"
        );
        Ok(prediction)
    }

    /// Ask the service's `hello` resolver whether it is up.
    pub fn check_health(&self) -> Result<String, PredictError> {
        let reply = self
            .transport
            .post_json(self.endpoint.as_str(), &graphql::health_request())?;
        Ok(graphql::parse_health_response(reply)?)
    }
}
