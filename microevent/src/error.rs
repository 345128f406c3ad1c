use std::{fmt, sync::Arc};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error raised by an event handler: {0}")]
    External(Arc<str>),

    #[error("{} handler(s) failed while emitting '{topic}'", .errors.len())]
    Isolated { topic: Arc<str>, errors: Vec<Error> },

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
}

impl Error {
    /// Wraps any displayable failure raised inside a handler.
    pub fn external(reason: impl fmt::Display) -> Self {
        Error::External(reason.to_string().into())
    }

    /// Errors collected by a [`FailurePolicy::Isolate`](crate::FailurePolicy::Isolate) pass.
    /// Empty for every other variant.
    pub fn isolated_errors(&self) -> &[Error] {
        match self {
            Error::Isolated { errors, .. } => errors,
            _ => &[],
        }
    }
}
