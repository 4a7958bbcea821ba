//! Per-profile crop results, for `--report` and for library callers.

use serde::Serialize;

use crate::Window;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileCrop {
    pub profile: String,
    pub unit: String,
    #[serde(rename = "originalCount")]
    pub original_count: usize,
    #[serde(rename = "keptCount")]
    pub kept_count: usize,
    #[serde(rename = "startIndex")]
    pub start_index: usize,
    #[serde(rename = "endIndex")]
    pub end_index: usize,
    #[serde(rename = "startValue")]
    pub start_value: f64,
    #[serde(rename = "endValue")]
    pub end_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipReport {
    pub window: Window,
    pub profiles: Vec<ProfileCrop>,
}

impl ClipReport {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            profiles: Vec::new(),
        }
    }

    pub fn kept_samples(&self) -> usize {
        self.profiles.iter().map(|p| p.kept_count).sum()
    }

    pub fn original_samples(&self) -> usize {
        self.profiles.iter().map(|p| p.original_count).sum()
    }
}
