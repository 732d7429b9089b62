// Error types for lapchart

use reqwest::StatusCode;
use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum LapchartError {
    // User input validation errors
    #[snafu(display("Please fill in all fields (Year, Race, and Driver)."))]
    MissingFields,
    #[snafu(display("Driver code must be 3 characters (e.g., VER, HAM)."))]
    InvalidDriverCode { driver: String },

    // Errors talking to the lap-timing service
    #[snafu(display("Invalid service URL {url}"))]
    InvalidServiceUrl { url: String },
    #[snafu(display("Could not create HTTP client"))]
    HttpClientError { source: reqwest::Error },
    #[snafu(display("Server error: {status}"))]
    HttpStatus { status: StatusCode },
    #[snafu(display("{source}"))]
    Request { source: reqwest::Error },
    #[snafu(display("Invalid response from lap service: {source}"))]
    InvalidResponse { source: reqwest::Error },
    #[snafu(display(
        "No lap data found for the specified parameters. Please check your inputs."
    ))]
    NoLapData,
    #[snafu(display("Lap loader stopped before returning a result"))]
    LoaderDisconnected,
    #[snafu(display("Error serializing lap summary"))]
    ReportSerializeError { source: serde_json::Error },

    // UI errors
    #[snafu(display("Could not start the lap chart window: {reason}"))]
    WindowError { reason: String },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error accessing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
}

impl LapchartError {
    /// Text for the error banner. Input and empty-data errors are shown as is,
    /// transport and server errors point the user at the service origin.
    pub fn banner_message(&self, origin: &str) -> String {
        match self {
            LapchartError::MissingFields
            | LapchartError::InvalidDriverCode { .. }
            | LapchartError::NoLapData => self.to_string(),
            _ => format!(
                "Failed to load data: {}. Make sure the backend server is running on {}",
                self, origin
            ),
        }
    }
}
