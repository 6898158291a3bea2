use thiserror::Error;

/// What went wrong at the service boundary.
///
/// Both variants are handled identically by the reconciler: one ERROR log
/// entry, one error notice, and the previous view-model state is retained.
/// The next periodic poll is the de facto retry; nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The request failed outright or came back with a non-success status.
    #[error("request failed: {0}")]
    Transport(String),
    /// The response body was missing, malformed, or not the expected shape.
    #[error("malformed response: {0}")]
    Shape(String),
}
