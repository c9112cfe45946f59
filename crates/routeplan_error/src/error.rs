//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, StorageError, UpstreamError};

/// Every fatal condition a routing run can hit.
///
/// # Examples
///
/// ```
/// use routeplan_error::{RouteplanError, UpstreamError, UpstreamErrorKind};
///
/// let upstream = UpstreamError::new(UpstreamErrorKind::NonZeroExit {
///     status: Some(2),
///     message: "not logged in".to_string(),
/// });
/// let err: RouteplanError = upstream.into();
/// assert!(format!("{}", err).contains("not logged in"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RouteplanErrorKind {
    /// Configuration could not be loaded or holds invalid values
    #[from(ConfigError)]
    Config(ConfigError),
    /// Usage snapshot is not valid JSON or has the wrong shape
    #[from(JsonError)]
    Json(JsonError),
    /// External usage command failed
    #[from(UpstreamError)]
    Upstream(UpstreamError),
    /// Routing artifact could not be written
    #[from(StorageError)]
    Storage(StorageError),
}

/// Routeplan error with kind discrimination.
///
/// # Examples
///
/// ```
/// use routeplan_error::{ConfigError, RouteplanErrorKind, RouteplanResult};
///
/// fn might_fail() -> RouteplanResult<()> {
///     Err(ConfigError::new("openai_tier must be an integer"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), RouteplanErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Routeplan Error: {}", _0)]
pub struct RouteplanError(Box<RouteplanErrorKind>);

impl RouteplanError {
    /// Create a new error from a kind.
    pub fn new(kind: RouteplanErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RouteplanErrorKind {
        &self.0
    }
}

impl<T> From<T> for RouteplanError
where
    T: Into<RouteplanErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for routeplan operations.
pub type RouteplanResult<T> = std::result::Result<T, RouteplanError>;
