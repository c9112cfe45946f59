//! Usage snapshot decoding errors.

/// Ways a usage snapshot can fail to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum JsonErrorKind {
    /// Stdout is not JSON
    #[display("Snapshot is not valid JSON ({}) at line {}, column {}", reason, line, column)]
    Syntax {
        /// 1-based line in the snapshot text
        line: usize,
        /// 1-based column in the snapshot text
        column: usize,
        /// Error category reported by the parser
        reason: String,
    },
    /// The document root is not an object
    #[display("Snapshot root is {}, expected an object", found)]
    RootNotObject {
        /// JSON type found at the root
        found: String,
    },
    /// Stdout is not UTF-8
    #[display("Snapshot is not valid UTF-8 after byte {}", valid_up_to)]
    Encoding {
        /// Length of the longest valid UTF-8 prefix
        valid_up_to: usize,
    },
}

/// Snapshot decoding error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", kind, line, file)]
pub struct JsonError {
    /// The error kind
    pub kind: JsonErrorKind,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use routeplan_error::{JsonError, JsonErrorKind};
    ///
    /// let err = JsonError::new(JsonErrorKind::RootNotObject { found: "array".to_string() });
    /// assert!(err.to_string().contains("root is array"));
    /// ```
    #[track_caller]
    pub fn new(kind: JsonErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &JsonErrorKind {
        &self.kind
    }
}
