//! Speedscope value units and their time scale.

use serde::Deserialize;

use std::time::Duration;

use crate::TimeOffset;

/// The `unit` field of a speedscope profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Bytes,
    None,
    /// Any string speedscope does not define. Kept so it can be reported.
    #[serde(untagged)]
    Other(String),
}

impl ValueUnit {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Nanoseconds => "nanoseconds",
            Self::Microseconds => "microseconds",
            Self::Milliseconds => "milliseconds",
            Self::Seconds => "seconds",
            Self::Bytes => "bytes",
            Self::None => "none",
            Self::Other(other) => other,
        }
    }

    pub fn is_time(&self) -> bool {
        matches!(
            self,
            Self::Nanoseconds | Self::Microseconds | Self::Milliseconds | Self::Seconds
        )
    }

    /// Absolute time covered by one unit. Non-time units count as one second each.
    pub fn scale(&self) -> Duration {
        match self {
            Self::Nanoseconds => Duration::from_nanos(1),
            Self::Microseconds => Duration::from_micros(1),
            Self::Milliseconds => Duration::from_millis(1),
            Self::Seconds | Self::Bytes | Self::None | Self::Other(_) => Duration::from_secs(1),
        }
    }

    pub fn to_native(&self, offset: TimeOffset) -> f64 {
        offset.as_nanos() as f64 / self.scale_nanos()
    }

    pub fn to_offset(&self, native: f64) -> TimeOffset {
        let nanos = (native * self.scale_nanos()).round();
        // `as` saturates out-of-range floats.
        TimeOffset::from_nanos(nanos as i64)
    }

    fn scale_nanos(&self) -> f64 {
        self.scale().as_nanos() as f64
    }
}

impl std::fmt::Display for ValueUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
