//! Review rating predictions from the remote GraphQL service.

mod client;

pub mod graphql;

pub use client::{PredictError, PredictionClient};
pub use graphql::Prediction;
