use thiserror::Error;

/// Errors surfaced by the globe core.
///
/// Only configuration and location problems are returned from `GlobeView::mount`;
/// renderer problems are downgraded to an "unavailable" view or logged per frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GlobeError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid location `{name}`: {reason}")]
    InvalidLocation { name: String, reason: String },

    #[error("duplicate location name `{0}`")]
    DuplicateLocation(String),

    #[error("renderer unavailable: {0}")]
    RendererUnavailable(String),

    #[error("render failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, GlobeError>;
