//! Heuristic detection of hand weights from wrist and shoulder keypoints.

pub mod cli;
pub mod config;
pub mod detector;
pub mod frame;
pub mod history;
pub mod logging;
pub mod processor;
pub mod progress;
pub mod source;
pub mod stats;


pub use config::DetectorConfig;
pub use detector::{ArmSignals, DetectError, WeightsDetector, WeightsReport};
pub use frame::{Joint, JointFrame, Side};
pub use history::JointHistory;
