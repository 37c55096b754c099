// Error types for paddock

use snafu::Snafu;
use std::io;

/// Failures while talking to the results API. The `Display` output is what
/// ends up on screen when the schedule cannot be loaded.
#[derive(Debug, Snafu)]
pub enum FetchError {
    #[snafu(display("Could not reach {url}: {source}"))]
    Network { url: String, source: reqwest::Error },
    #[snafu(display("{url} answered with HTTP {status}"))]
    UnexpectedStatus { url: String, status: u16 },
    #[snafu(display("Unexpected response from {url}: {source}"))]
    Parse {
        url: String,
        source: serde_json::Error,
    },
    #[snafu(display("Invalid {field} in response: {value:?}"))]
    InvalidField { field: String, value: String },
    #[snafu(display("No race found for round {round}"))]
    MissingRace { round: u32 },
}

#[derive(Debug, Snafu)]
pub enum PaddockError {
    // Errors surfaced by the command line
    #[snafu(display("Schedule unavailable: {message}"))]
    ScheduleUnavailable { message: String },
    #[snafu(display("No results available for round {round}"))]
    ResultsUnavailable { round: u32 },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Runtime and UI errors
    #[snafu(display("Could not start the async runtime"))]
    RuntimeError { source: io::Error },
    #[snafu(display("GUI error: {description}"))]
    GuiError { description: String },
    #[snafu(display("Unhandled action type: {kind}"))]
    UnhandledAction { kind: String },
    #[snafu(display("Invalid payload for {kind}: {source}"))]
    InvalidActionPayload {
        kind: String,
        source: serde_json::Error,
    },
}
