use reqwest::StatusCode;

/// Errors returned by an [`Uploader`](crate::resolve::Uploader).
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The metadata could not be serialized.
    #[error("failed to serialize metadata")]
    Serialize(#[from] serde_json::Error),
    /// The request failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The storage service rejected the upload.
    #[error("upload rejected with status {status}: {body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Response body.
        body: String,
    },
    /// The storage service returned no content identifier.
    #[error("upload response is missing a content identifier")]
    MissingCid,
}
