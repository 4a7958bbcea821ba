//! Locating the retained sample range and rewriting a profile to it.

use crate::{Bound, ProfileCrop, ResolvedWindow, SampledProfile, TimeOffset, ValueUnit};

/// Half-open sample range `[start_index, end_index)` plus the new boundaries,
/// in the profile's unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRange {
    pub start_index: usize,
    pub end_index: usize,
    pub start_value: f64,
    pub end_value: f64,
}

impl CropRange {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }
}

/// Finds the samples inside `window` with one forward scan.
///
/// Weights are accumulated as absolute time, so the same timeline crops the
/// same way whatever its unit. The first sample whose cumulative time passes
/// `window.start` opens the range. The first sample whose cumulative time
/// passes a bounded `window.end` is the last one kept. Boundaries are
/// `start_value` plus the cumulative time at those samples; an untrimmed side
/// keeps its original boundary.
pub fn crop_weights(
    weights: &[f64],
    unit: &ValueUnit,
    window: ResolvedWindow,
    start_value: f64,
    end_value: f64,
) -> CropRange {
    let mut range = CropRange {
        start_index: weights.len(),
        end_index: weights.len(),
        start_value: end_value,
        end_value,
    };
    let mut reached = window.start <= TimeOffset::ZERO;
    if reached {
        range.start_index = 0;
        range.start_value = start_value;
    }

    let mut elapsed = TimeOffset::ZERO;
    for (i, &weight) in weights.iter().enumerate() {
        elapsed = elapsed.saturating_add(unit.to_offset(weight));
        if !reached && elapsed > window.start {
            reached = true;
            range.start_index = i;
            range.start_value = start_value + unit.to_native(elapsed);
        }
        match window.end {
            Bound::At(end) if elapsed > end => {
                range.end_index = i + 1;
                range.end_value = start_value + unit.to_native(elapsed);
                break;
            }
            Bound::Open if reached => break,
            _ => {}
        }
    }
    range
}

/// Same result as [`crop_weights`], found by bisecting prefix sums.
///
/// Cumulative time never decreases, so both edges are partition points.
pub fn crop_weights_bisect(
    weights: &[f64],
    unit: &ValueUnit,
    window: ResolvedWindow,
    start_value: f64,
    end_value: f64,
) -> CropRange {
    let prefix: Vec<TimeOffset> = weights
        .iter()
        .scan(TimeOffset::ZERO, |elapsed, &weight| {
            *elapsed = elapsed.saturating_add(unit.to_offset(weight));
            Some(*elapsed)
        })
        .collect();
    let boundary = |elapsed: TimeOffset| start_value + unit.to_native(elapsed);

    let (start_index, new_start) = if window.start <= TimeOffset::ZERO {
        (0, start_value)
    } else {
        let i = prefix.partition_point(|&elapsed| elapsed <= window.start);
        match prefix.get(i) {
            Some(&elapsed) => (i, boundary(elapsed)),
            None => (prefix.len(), end_value),
        }
    };

    let (end_index, new_end) = match window.end {
        Bound::Open => (prefix.len(), end_value),
        Bound::At(end) => {
            let i = prefix.partition_point(|&elapsed| elapsed <= end);
            match prefix.get(i) {
                Some(&elapsed) => (i + 1, boundary(elapsed)),
                None => (prefix.len(), end_value),
            }
        }
    };

    CropRange {
        start_index,
        end_index,
        start_value: new_start,
        end_value: new_end,
    }
}

/// Rewrites `profile` to `range` and records what was kept.
pub fn apply_crop(profile: &mut SampledProfile, range: &CropRange) -> ProfileCrop {
    let original_count = profile.weights.len();

    profile.samples.truncate(range.end_index);
    profile.samples.drain(..range.start_index);
    profile.weights.truncate(range.end_index);
    profile.weights.drain(..range.start_index);
    profile.start_value = range.start_value;
    profile.end_value = range.end_value;

    tracing::info!(
        profile = %profile.label(),
        kept = range.len(),
        total = original_count,
        start_index = range.start_index,
        end_index = range.end_index,
        "cropped profile"
    );

    ProfileCrop {
        profile: profile.label().to_string(),
        unit: profile.unit.to_string(),
        original_count,
        kept_count: range.len(),
        start_index: range.start_index,
        end_index: range.end_index,
        start_value: profile.start_value,
        end_value: profile.end_value,
    }
}
