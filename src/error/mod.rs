//! Batch error types.

mod encode;
pub use encode::EncodeError;

mod submit;
pub use submit::SubmissionError;

mod upload;
pub use upload::UploadError;

use thiserror::Error;

/// The overarching error type returned while composing and submitting a batch.
///
/// Every variant is fatal to the batch: no partial [`BatchRequest`](crate::types::BatchRequest)
/// is ever produced, callers retry the whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The metadata of an item could not be resolved.
    #[error("failed to resolve metadata of item {index}")]
    Resolution {
        /// Index of the failing item.
        index: usize,
        /// The upload error.
        #[source]
        source: UploadError,
    },
    /// An item could not be encoded for the target function.
    #[error("failed to encode item {index}")]
    Encoding {
        /// Index of the failing item.
        index: usize,
        /// The encoding error, naming the offending field.
        #[source]
        source: EncodeError,
    },
    /// The submission collaborator failed.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl BatchError {
    /// Returns the index of the item that caused the error, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Resolution { index, .. } | Self::Encoding { index, .. } => Some(*index),
            Self::Submission(_) => None,
        }
    }
}
