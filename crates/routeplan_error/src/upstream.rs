//! Errors raised by the external usage command.

/// Ways the usage command can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// The command could not be started at all
    #[display("Failed to run '{}': {}", program, reason)]
    Spawn {
        /// Program that was invoked
        program: String,
        /// OS-level reason
        reason: String,
    },
    /// The command ran and exited unsuccessfully
    #[display("{}", message)]
    NonZeroExit {
        /// Exit status, if the process was not killed by a signal
        status: Option<i32>,
        /// Trimmed stderr, or a generic message when stderr was empty
        message: String,
    },
}

/// Usage command error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upstream Error: {} at line {} in {}", kind, line, file)]
pub struct UpstreamError {
    /// The error kind
    pub kind: UpstreamErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new UpstreamError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &UpstreamErrorKind {
        &self.kind
    }
}
