//! Crate-wide error types.

use thiserror::Error;

pub type SpeedclipResult<T> = Result<T, SpeedclipError>;

#[derive(Debug, Error)]
pub enum SpeedclipError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("profile {profile}: {source}")]
    Profile {
        profile: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("profile {profile}: invalid weight {value} at index {index}")]
    InvalidWeight {
        profile: String,
        index: usize,
        value: f64,
    },

    #[error("profile {profile}: unsupported profile type {kind:?} (only \"sampled\" can be clipped)")]
    UnsupportedProfile { profile: String, kind: String },

    #[error("profile {profile}: 'samples' and 'weights' have different lengths: {samples}, {weights}")]
    MisalignedArrays {
        profile: String,
        samples: usize,
        weights: usize,
    },

    #[error("profile {profile}: end {end} < start {start}")]
    InvalidWindow {
        profile: String,
        start: crate::TimeOffset,
        end: crate::TimeOffset,
    },

    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}
