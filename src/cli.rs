//! One-shot command-line client for the prediction service.
//!
//! Runs the same request lifecycle as the desktop form and prints the
//! outcome; logs go to stderr so stdout only carries results.

use std::io::{self, Read, Write};

use crate::config::{self, AppSettings, ConfigError};
use crate::form::{PredictionForm, RequestState, SERVER_ERROR_MESSAGE};
use crate::http_client::JsonTransport;
use crate::prediction::PredictionClient;

pub const USAGE: &str =
    "Usage: opinion-rater-cli [--endpoint <url>] [--health] [--text <review>] [--help]\n\
     Reads the review from stdin when --text is not given.";

/// What the invocation asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Rate `text`, or stdin when absent.
    Predict { text: Option<String> },
    /// Ask the service's `hello` resolver whether it is up.
    Health,
    Help,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    pub endpoint: Option<String>,
    pub command: CliCommand,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}\n{usage}", usage = USAGE)]
    Usage(String),
    #[error("Review text is empty; nothing was sent")]
    BlankInput,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Server(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code: 1 for service failures, 2 for caller mistakes.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Server(_) | Self::Io(_) => 1,
            Self::Usage(_) | Self::BlankInput | Self::Config(_) => 2,
        }
    }
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliOptions, CliError> {
    let mut endpoint = None;
    let mut text = None;
    let mut health = false;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--endpoint" => {
                endpoint = Some(
                    args.next()
                        .ok_or_else(|| CliError::Usage("--endpoint needs a value".into()))?,
                );
            }
            "--text" => {
                text = Some(
                    args.next()
                        .ok_or_else(|| CliError::Usage("--text needs a value".into()))?,
                );
            }
            "--health" => health = true,
            "--help" | "-h" => {
                return Ok(CliOptions {
                    endpoint,
                    command: CliCommand::Help,
                });
            }
            other => return Err(CliError::Usage(format!("Unknown argument: {other}"))),
        }
    }
    let command = match (health, text) {
        (true, Some(_)) => {
            return Err(CliError::Usage(
                "--health cannot be combined with --text".into(),
            ));
        }
        (true, None) => CliCommand::Health,
        (false, text) => CliCommand::Predict { text },
    };
    Ok(CliOptions { endpoint, command })
}

/// Execute `options` against `transport`, writing results to `out`.
pub fn run<T: JsonTransport>(
    options: CliOptions,
    settings: AppSettings,
    transport: T,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if options.command == CliCommand::Help {
        writeln!(out, "{USAGE}")?;
        return Ok(());
    }
    let endpoint = match options.endpoint.as_deref() {
        Some(value) => config::parse_endpoint(value)?,
        None => settings.endpoint_url()?,
    };
    let client = PredictionClient::new(endpoint, transport);

    match options.command {
        CliCommand::Health => match client.check_health() {
            Ok(greeting) => {
                tracing::info!("Service answered hello: {greeting}");
                writeln!(out, "SERVING")?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Health check failed: {err}");
                writeln!(out, "NOT_SERVING")?;
                Err(CliError::Server(SERVER_ERROR_MESSAGE.to_string()))
            }
        },
        CliCommand::Predict { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    stdin.read_to_string(&mut buf)?;
                    buf
                }
            };
            let mut form = PredictionForm::new();
            form.set_input(text);
            if !form.submit_with(&client) {
                return Err(CliError::BlankInput);
            }
            match (form.state(), form.result()) {
                (RequestState::Succeeded, Some(prediction)) => {
                    writeln!(out, "Rating: {:.2}", prediction.rating)?;
                    writeln!(out, "Confidence: {:.4}", prediction.confidence)?;
                    Ok(())
                }
                _ => Err(CliError::Server(
                    form.error().unwrap_or(SERVER_ERROR_MESSAGE).to_string(),
                )),
            }
        }
        CliCommand::Help => Ok(()),
    }
}
