pub mod client;
pub mod session;
pub mod transport;

pub use client::MuseClient;
pub use session::MuseSession;
pub use transport::GeminiTransport;

use thiserror::Error;

/// Failures of the Muse assistant, split into the two tiers the app cares
/// about: configuration errors surface at startup and disable the feature,
/// runtime errors become a single error message in the transcript.
#[derive(Debug, Error)]
pub enum MuseError {
    #[error("GEMINI_API_KEY is not set; the Muse assistant is unavailable")]
    MissingApiKey,
    #[error("network error: {0}")]
    Network(String),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}
