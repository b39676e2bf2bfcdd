use thiserror::Error;

/// Result type for code generation
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument was outside its accepted range.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A descriptor carries a value with no textual C# form.
    #[error("unsupported {what} '{value}'")]
    UnsupportedKind { what: &'static str, value: String },

    /// A body emitter was used before any options were given to it.
    #[error("body emitter '{emitter}' has no options; set them explicitly or enable option injection")]
    MissingOptions { emitter: String },
}

impl Error {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(what: &'static str, value: impl Into<String>) -> Self {
        Error::UnsupportedKind {
            what,
            value: value.into(),
        }
    }
}
