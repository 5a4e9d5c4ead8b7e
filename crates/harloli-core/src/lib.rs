pub mod config;
pub mod error;
pub mod graph;
pub mod har;
pub mod session;

pub use error::{Error, Result};
