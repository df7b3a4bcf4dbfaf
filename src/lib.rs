//! Probe for the pipe-delimited story format returned by Gemini.
//!
//! One `generateContent` request is sent with a fixed prompt, and the text of
//! the first candidate is broken down into its `Titre: ... | Situation: ... |
//! Choix: a|b|c` segments. The probe reports what it finds; it never enforces
//! the format.

use std::io::Write;

#[cfg(all(feature = "reqwest", feature = "ureq"))]
compile_error!("Features 'reqwest' and 'ureq' are mutually exclusive.");

#[cfg(not(any(feature = "reqwest", feature = "ureq")))]
compile_error!("One of the features 'reqwest' and 'ureq' must be enabled.");

pub mod analysis;
pub mod client;
pub mod config;
pub mod logging;
pub mod report;
pub mod request;
pub mod response;

pub use analysis::{analyze, Analysis, Deviation, Segment, Story};
pub use client::{Client, RawResponse, Transport};
pub use config::Endpoint;
pub use report::Report;
pub use request::{GenerateContent, GenerationConfig, STORY_START_PROMPT};
pub use response::GenerateContentResponse;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("The configuration contains errors: {0}")]
    BadConfigurationError(String),

    #[error("Failed to serialize request: {0}")]
    SerializationError(serde_json::Error),

    #[error("Failed to deserialize response: {0}")]
    DeserializationError(serde_json::Error),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed response: {0}")]
    MalformedResponseError(String),

    #[error("Failed to write report: {0}")]
    OutputError(#[from] std::io::Error),
}

/// Sends `prompt` once through `transport` and reports the outcome.
///
/// Transport failures and non-200 responses are reported and end the run
/// normally. A 200 response whose body lacks
/// `candidates[0].content.parts[0].text` is returned as an error.
///
/// # Arguments
///
/// * `transport`: Where the request goes, usually a [`Client`].
/// * `prompt`: The prompt to send.
/// * `report`: Where the diagnostics are written.
pub fn run<T, W>(transport: &T, prompt: &str, report: &mut Report<W>) -> Result<(), Error>
where
    T: Transport,
    W: Write,
{
    report.banner(prompt)?;

    let request = GenerateContent::new(prompt);

    let response = match transport.send(&request) {
        Ok(response) => response,
        Err(Error::NetworkError(message)) => {
            tracing::warn!(%message, "request failed");
            return report.transport_failure(&message);
        }
        Err(e) => return Err(e),
    };

    if !response.is_ok() {
        tracing::warn!(status = response.status, "API returned an error");
        return report.api_error(response.status, &response.body);
    }

    let decoded = GenerateContentResponse::from_json(&response.body)?;
    let text = decoded.first_text()?;
    report.response_text(text)?;

    let analysis = analyze(text);
    report.analysis(&analysis)?;

    let deviations = Story::from_analysis(&analysis).deviations();
    tracing::info!(deviations = deviations.len(), "response analyzed");
    report.verdict(&deviations)?;

    Ok(())
}
