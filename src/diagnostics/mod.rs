//! Run diagnostics attached to study reports.

pub mod timing;

pub use self::timing::{StageTiming, TimingBreakdown};
