mod normalize;
mod raw;
mod types;

pub use normalize::{normalize, read_har_file};
pub use types::*;
