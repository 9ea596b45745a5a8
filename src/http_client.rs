//! Shared HTTP client configuration and the JSON transport seam.
//!
//! Requests make exactly one attempt and carry no timeout; a stalled server
//! keeps the request pending until the connection drops.

use std::io::{self, Read};
use std::sync::OnceLock;

use serde_json::Value;

/// Upper bound on response bodies accepted from the prediction service.
pub const MAX_RESPONSE_BYTES: usize = 256 * 1024;

/// Failure of a single JSON POST.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, DNS or I/O failure before a status was received.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    /// The body could not be read or was not JSON.
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

/// Capability to POST a JSON document and receive a JSON document back.
///
/// Injected into [`crate::prediction::PredictionClient`] so request logic can
/// be exercised without a network stack.
pub trait JsonTransport {
    /// POST `body` to `url` and return the parsed JSON response.
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError>;
}

impl<T: JsonTransport + ?Sized> JsonTransport for &T {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        (**self).post_json(url, body)
    }
}

impl<T: JsonTransport + ?Sized> JsonTransport for std::sync::Arc<T> {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        (**self).post_json(url, body)
    }
}

/// [`JsonTransport`] backed by the shared `ureq` agent.
#[derive(Clone, Copy, Debug, Default)]
pub struct UreqTransport;

impl JsonTransport for UreqTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        let request = agent()
            .post(url)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");
        let response = match request.send_json(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body =
                    read_body_limited(response, MAX_RESPONSE_BYTES).unwrap_or_else(|err| err);
                return Err(TransportError::Status { code, body });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(TransportError::Transport(err.to_string()));
            }
        };
        let text =
            read_body_limited(response, MAX_RESPONSE_BYTES).map_err(TransportError::InvalidBody)?;
        serde_json::from_str(text.trim())
            .map_err(|err| TransportError::InvalidBody(format!("{err}: {}", preview(&text))))
    }
}

/// Return a shared HTTP agent.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| ureq::AgentBuilder::new().build())
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    if let Some(length) = response
        .header("Content-Length")
        .and_then(|length| length.parse::<u64>().ok())
        && length > max_bytes as u64
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    let bytes = read_response_bytes(response, max_bytes).map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}

fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 120;
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_CHARS).collect();
    cut.push('…');
    cut
}
