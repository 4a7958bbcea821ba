//! Speedclip core library: crop speedscope sampled profiles to a time window.

mod clip;
mod config;
mod crop;
mod duration;
mod error;
mod fsutil;
mod report;
mod speedscope;
mod units;
mod window;

pub use clip::*;
pub use config::*;
pub use crop::*;
pub use duration::*;
pub use error::*;
pub use fsutil::*;
pub use report::*;
pub use speedscope::*;
pub use units::*;
pub use window::*;
