//! Artifact storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the artifact's parent directory
    #[display("Failed to create directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write the temporary artifact file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to move the temporary file over the artifact
    #[display("Failed to replace file: {}", _0)]
    Rename(String),
    /// Artifact path has no usable parent or file name
    #[display("Invalid artifact path: {}", _0)]
    InvalidPath(String),
    /// Artifact could not be serialized
    #[display("Failed to serialize artifact: {}", _0)]
    Serialize(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use routeplan_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::InvalidPath("/".to_string()));
/// assert!(format!("{}", err).contains("Invalid artifact path"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
