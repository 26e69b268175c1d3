use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("Unknown literal '#{0}'.")]
    UnknownLiteral(String),

    #[error("Literal '#{name}' expects {expected}.")]
    LiteralArg { name: String, expected: String },

    #[error("Top-level configuration must be a map.")]
    ConfigShape,
}

impl Error {
    /// Builds the error for a literal applied to an argument it cannot use.
    pub fn literal_arg(name: &str, expected: &str) -> Self {
        Error::LiteralArg { name: name.to_string(), expected: expected.to_string() }
    }
}

/// Convenience type alias for Results with the crate error type.
pub type Result<T> = std::result::Result<T, Error>;
