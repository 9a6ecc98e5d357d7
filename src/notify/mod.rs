pub mod cycle;
pub mod mailer;
pub mod scanner;

pub use cycle::*;
pub use mailer::*;
pub use scanner::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("email provider returned error (status {status}): {body}")]
    Provider { status: u16, body: String },

    #[error("response decoding error: {0}")]
    Decode(String),
}
