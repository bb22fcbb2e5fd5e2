use thiserror::Error;

/// Model validation error.
#[allow(missing_docs)]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Push has no head commit (branch deletion?)")]
    MissingHeadCommit,

    #[error("Missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("Invalid commit id '{id}'")]
    InvalidCommitId { id: String },

    #[error("Value of '{field}' cannot start with '-': {value}")]
    UnsafeArgument { field: &'static str, value: String },

    #[error("Unsafe changed path '{path}'")]
    UnsafePath { path: String },

    #[error("Cannot derive a working copy name from clone URL '{url}'")]
    InvalidCloneUrl { url: String },
}
