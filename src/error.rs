use thiserror::Error;

/// Top-level error type for the planroute router.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to layout lookups and mutation.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("{kind} not found in layout")]
    NotFound { kind: &'static str },

    #[error("door position {0} is out of range [0, 1]")]
    DoorPositionOutOfRange(f64),
}

/// Errors related to routing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid routing parameter `{parameter}` = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("malformed routing configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`RouteError`].
pub type Result<T> = std::result::Result<T, RouteError>;
