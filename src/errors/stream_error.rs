use crate::prelude::*;

pub type StreamResult<T = ()> = Result<T, StreamError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamError {
    /// the requested mutation is not supported. the message names what to adjust instead
    UnsupportedOperation(&'static str),

    /// nested object generation was aborted by the caller.
    /// this is a cooperative early-exit, anything emitted before the abort stays in place
    Cancelled,
}

impl Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedOperation(msg) => write!(f, "unsupported operation: {msg}"),
            Self::Cancelled => write!(f, "nested object generation cancelled"),
        }
    }
}

impl std::error::Error for StreamError {}
