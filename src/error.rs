//! Error types for building autolink extensions.

/// Configuration errors raised while constructing extensions.
///
/// Body text never produces an error: input that does not fit a recognizer
/// simply fails to match and is rendered as ordinary text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutolinkError {
    /// Repository context is present but not shaped like `owner/repo`.
    #[error("repository must be in format \"username/repository\", got {0:?}")]
    InvalidRepositoryFormat(String),

    /// Extension name is not in the registry.
    #[error("unknown autolink extension: {0}")]
    UnknownExtension(String),
}
