use alloy::{
    providers::PendingTransactionError,
    transports::{RpcError, TransportErrorKind},
};

/// Errors surfaced by the transaction execution collaborator.
///
/// They are not interpreted by the composer, only forwarded.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The batch has no calls.
    #[error("refusing to submit an empty batch")]
    EmptyBatch,
    /// RPC error.
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// Other errors.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl From<PendingTransactionError> for SubmissionError {
    fn from(value: PendingTransactionError) -> Self {
        match value {
            PendingTransactionError::TransportError(err) => Self::Rpc(err),
            err => Self::Other(Box::new(err)),
        }
    }
}
