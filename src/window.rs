//! Resolving a requested crop window against one profile's timeline.

use serde::Serialize;

use crate::{SpeedclipError, SpeedclipResult, TimeOffset};

/// The window as requested on the command line, before any profile is seen.
///
/// A zero `end` means "no end bound". Negative values count back from the end
/// of each profile and clamp at its start, so an `end` that reaches back to
/// the start is unbounded too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: TimeOffset,
    pub end: TimeOffset,
}

/// Upper edge of a resolved window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Open,
    At(TimeOffset),
}

/// Window offsets measured from the profile's `startValue`. `start` is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub start: TimeOffset,
    pub end: Bound,
}

impl Window {
    pub fn new(start: TimeOffset, end: TimeOffset) -> Self {
        Self { start, end }
    }

    /// Ties the window to a profile lasting `total`.
    pub fn resolve(&self, total: TimeOffset, profile: &str) -> SpeedclipResult<ResolvedWindow> {
        let start = from_end(self.start, total);
        let end = from_end(self.end, total);
        if end.is_zero() {
            return Ok(ResolvedWindow {
                start,
                end: Bound::Open,
            });
        }

        if end < start {
            return Err(SpeedclipError::InvalidWindow {
                profile: profile.to_string(),
                start,
                end,
            });
        }
        let end = if end >= total {
            Bound::Open
        } else {
            Bound::At(end)
        };
        Ok(ResolvedWindow { start, end })
    }
}

/// Negative offsets count back from `total`, clamped at the profile start.
fn from_end(requested: TimeOffset, total: TimeOffset) -> TimeOffset {
    if requested.is_negative() {
        total.saturating_add(requested).max(TimeOffset::ZERO)
    } else {
        requested
    }
}
