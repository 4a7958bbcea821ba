//! Clipping whole speedscope documents.

use crate::{
    ClipReport, CropRange, DocumentPath, SampledProfile, SpeedclipResult, SpeedscopeFile, Window,
    apply_crop, crop_weights,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipOptions {
    pub window: Window,
    pub pretty: bool,
}

/// Works out which samples of `profile` fall inside `window`.
pub fn plan_crop(profile: &SampledProfile, window: &Window) -> SpeedclipResult<CropRange> {
    if !profile.unit.is_time() {
        tracing::warn!(
            profile = %profile.label(),
            unit = %profile.unit,
            "unit is not a time unit; treating one unit as one second"
        );
    }
    let resolved = window.resolve(profile.total_duration(), profile.label())?;
    tracing::debug!(
        profile = %profile.label(),
        start = %resolved.start,
        end = ?resolved.end,
        "resolved window"
    );
    Ok(crop_weights(
        &profile.weights,
        &profile.unit,
        resolved,
        profile.start_value,
        profile.end_value,
    ))
}

/// Crops every profile in `doc` to `window`.
///
/// All profiles are planned before any is modified, so on error `doc` is
/// left as it was.
pub fn clip_document(doc: &mut SpeedscopeFile, window: &Window) -> SpeedclipResult<ClipReport> {
    let plans = doc
        .profiles
        .iter()
        .map(|profile| plan_crop(profile, window))
        .collect::<SpeedclipResult<Vec<_>>>()?;

    let mut report = ClipReport::new(*window);
    for (profile, range) in doc.profiles.iter_mut().zip(&plans) {
        report.profiles.push(apply_crop(profile, range));
    }
    Ok(report)
}

/// Reads `input`, clips it, and writes `output`. Nothing is written on error.
pub fn clip_file(
    input: &DocumentPath,
    output: &DocumentPath,
    options: &ClipOptions,
) -> SpeedclipResult<ClipReport> {
    tracing::debug!(%input, %output, start = %options.window.start, end = %options.window.end, "clipping");
    let mut doc = SpeedscopeFile::from_slice(&input.read()?)?;
    let report = clip_document(&mut doc, &options.window)?;
    output.write(&doc.into_bytes(options.pretty)?)?;
    Ok(report)
}
