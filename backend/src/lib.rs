pub mod cache;
pub mod catchers;
pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod server;
pub mod stats;
pub mod store;
pub mod utils;
pub use shared::{models::*, error::*};
