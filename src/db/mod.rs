pub mod policies;
pub mod storage;

pub use policies::*;
pub use storage::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("datastore returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("response decoding error: {0}")]
    Decode(String),
}
