use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read HAR file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid HAR file: {0}")]
    Format(String),

    #[error("Dependency matrix was computed for generation {actual}, current generation is {expected}")]
    StaleMatrix { expected: u64, actual: u64 },

    #[error("Dependency analysis failed: {0}")]
    Analysis(String),

    #[error("Script generation failed: {0}")]
    Generation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
