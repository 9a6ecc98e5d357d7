pub mod gateway;
pub mod gemini;
pub mod parser;
pub mod processor;
pub mod prompt;
pub mod status;
pub mod types;

pub use gateway::*;
pub use gemini::*;
pub use parser::*;
pub use processor::*;
pub use prompt::*;
pub use status::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("model {model} not available (status 404): {body}")]
    ModelNotFound { model: String, body: String },

    #[error("extraction provider returned error (status {status}): {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("all extraction attempts exhausted; last error: {0}")]
    AttemptsExhausted(String),
}
