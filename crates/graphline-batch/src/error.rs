use graphline_core::{Identity, InvalidInput};
use thiserror::Error;

/// Errors raised before a request enters the batch.
///
/// Per-request failures never surface here; they are carried by
/// [`FetchFailure`](crate::FetchFailure).
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("identity `{0}` is already pending in this batch")]
    DuplicateIdentity(Identity),

    #[error("failed to start the I/O runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BatchError>;
