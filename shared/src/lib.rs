pub mod error;
pub mod models;

pub use error::{ErrorCode, ErrorResponse};
pub use models::*;
