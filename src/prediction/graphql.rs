//! GraphQL request bodies and response parsing for the prediction service.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Query sent for every prediction.
pub const PREDICT_QUERY: &str =
    "query ($text: String!) { predict(text: $text) { rating confidence } }";
/// Health check answered by the service's `hello` resolver.
pub const HEALTH_QUERY: &str = "query { hello }";

/// Rating and confidence returned for a review.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Numeric sentiment score. The service may send the class label as a
    /// string such as `"5,0"`.
    #[serde(deserialize_with = "number_or_numeric_text")]
    pub rating: f64,
    /// Certainty attached to the rating.
    #[serde(deserialize_with = "number_or_numeric_text")]
    pub confidence: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireNumber {
    Number(f64),
    Text(String),
}

/// Accept a JSON number or a numeric string with either decimal separator.
fn number_or_numeric_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match WireNumber::deserialize(deserializer)? {
        WireNumber::Number(value) => Ok(value),
        WireNumber::Text(text) => parse_decimal(&text)
            .ok_or_else(|| de::Error::custom(format!("expected a number, found {text:?}"))),
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Body of a GraphQL POST.
#[derive(Clone, Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<V>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PredictVariables<'a> {
    pub text: &'a str,
}

/// Build the JSON body for a `predict` query.
pub fn predict_request(text: &str) -> Value {
    let request = GraphQlRequest {
        query: PREDICT_QUERY,
        variables: Some(PredictVariables { text }),
    };
    // Serializing borrowed strings into a Value cannot fail.
    serde_json::to_value(request).unwrap_or(Value::Null)
}

/// Build the JSON body for the `hello` health check.
pub fn health_request() -> Value {
    let request: GraphQlRequest<'_, ()> = GraphQlRequest {
        query: HEALTH_QUERY,
        variables: None,
    };
    serde_json::to_value(request).unwrap_or(Value::Null)
}

/// Ways a well-formed JSON reply can still fail to carry an answer.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ResponseError {
    /// The service reported resolver errors.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),
    /// Expected fields were missing or had the wrong type.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    /// Absent, `null` and `[]` all mean no errors.
    #[serde(default)]
    errors: Option<Vec<WireError>>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct PredictData {
    predict: Option<Prediction>,
}

#[derive(Debug, Deserialize)]
struct HelloData {
    hello: Option<String>,
}

/// Extract `data.predict.{rating, confidence}` from a reply.
pub fn parse_predict_response(value: Value) -> Result<Prediction, ResponseError> {
    let data: PredictData = unwrap_envelope(value)?;
    data.predict
        .ok_or_else(|| ResponseError::Malformed("data.predict is null".to_string()))
}

/// Extract `data.hello` from a reply.
pub fn parse_health_response(value: Value) -> Result<String, ResponseError> {
    let data: HelloData = unwrap_envelope(value)?;
    data.hello
        .ok_or_else(|| ResponseError::Malformed("data.hello is null".to_string()))
}

fn unwrap_envelope<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T, ResponseError> {
    let envelope: Envelope<T> = serde_json::from_value(value)
        .map_err(|err| ResponseError::Malformed(err.to_string()))?;
    let errors = envelope.errors.unwrap_or_default();
    if !errors.is_empty() {
        return Err(ResponseError::GraphQl(
            errors.into_iter().map(|err| err.message).collect(),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ResponseError::Malformed("missing data".to_string()))
}
