pub mod endpoints;
pub mod router;
pub mod server;
pub mod types;

pub use router::*;
pub use types::*;
