use thiserror::Error;

/// Main error type for gedtree
#[derive(Error, Debug)]
pub enum GedtreeError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record line that does not have the shape the builder needs
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// Query on an individual id that is not in the store
    #[error("Individual not found: {0}")]
    UnknownIndividual(String),

    /// Traversal went deeper than the configured generation limit
    #[error("Generation limit of {0} exceeded (cyclic ancestry?)")]
    GenerationLimit(usize),
}

impl GedtreeError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        GedtreeError::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}

/// Convenient Result type using GedtreeError
pub type Result<T> = std::result::Result<T, GedtreeError>;
