//! Weights heuristic over a short wrist/shoulder history.
//!
//! Holding weights damps micro-movements, turns the arm into something
//! closer to a rigid lever and smooths frame-to-frame motion. The detector
//! scores those three effects per arm and adds a vertical sanity band that
//! rejects degenerate tracking.

use crate::config::DetectorConfig;
use crate::frame::{JointFrame, Side};
use crate::stats;
use ndarray::{Array3, s};
use std::fmt;
use tracing::{debug, warn};

/// Why a history could not be scored
#[derive(Debug, Clone, PartialEq)]
pub enum DetectError {
    /// Not enough frames yet; a normal state while the buffer fills
    InsufficientHistory { frames: usize, required: usize },
    /// Wrong shape, non-finite coordinates or a non-finite statistic
    MalformedInput(String),
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectError::InsufficientHistory { frames, required } => {
                write!(f, "insufficient history: {} frames, need {}", frames, required)
            }
            DetectError::MalformedInput(reason) => write!(f, "malformed input: {}", reason),
        }
    }
}

impl std::error::Error for DetectError {}

/// Statistics for one arm over the history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmSignals {
    /// var(x) + var(y) of the wrist
    pub position_variance: f64,
    /// Variance of the wrist-to-shoulder distance
    pub distance_variance: f64,
    /// Variance of the wrist speed between consecutive frames
    pub velocity_variance: f64,
    /// Wrist stayed inside the vertical band around its shoulder on every frame
    pub within_vertical_range: bool,
}

impl ArmSignals {
    fn is_finite(&self) -> bool {
        self.position_variance.is_finite()
            && self.distance_variance.is_finite()
            && self.velocity_variance.is_finite()
    }
}

/// Full breakdown of a scored history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightsReport {
    pub frames: usize,
    pub left: ArmSignals,
    pub right: ArmSignals,
    pub position_reasonable: bool,
}

impl WeightsReport {
    pub fn position_stable(&self, config: &DetectorConfig) -> bool {
        self.left.position_variance < config.max_position_variance
            && self.right.position_variance < config.max_position_variance
    }

    pub fn distance_stable(&self, config: &DetectorConfig) -> bool {
        self.left.distance_variance < config.max_distance_variance
            && self.right.distance_variance < config.max_distance_variance
    }

    pub fn motion_smooth(&self, config: &DetectorConfig) -> bool {
        self.left.velocity_variance < config.max_velocity_variance
            && self.right.velocity_variance < config.max_velocity_variance
    }

    /// All signals must agree for a positive detection
    pub fn is_weighted(&self, config: &DetectorConfig) -> bool {
        self.position_stable(config)
            && self.distance_stable(config)
            && self.motion_smooth(config)
            && self.position_reasonable
    }
}

/// Stateless weights detector.
///
/// Holds only its thresholds, so one instance can be shared freely between
/// threads scoring independent histories.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightsDetector {
    config: DetectorConfig,
}

impl WeightsDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns true when the history looks like the subject holds weights.
    ///
    /// Never fails: short histories are a silent `false`, malformed ones are
    /// logged and also `false`.
    pub fn detect(&self, history: &[JointFrame]) -> bool {
        match self.analyze(history) {
            Ok(report) => {
                let weighted = report.is_weighted(&self.config);
                debug!(frames = report.frames, weighted, ?report, "weights detection");
                weighted
            }
            Err(DetectError::InsufficientHistory { .. }) => false,
            Err(e) => {
                warn!("Weights detection error: {}", e);
                false
            }
        }
    }

    /// Untyped entry point for callers holding raw `[T][4][2]` rows.
    ///
    /// `None` stands for a missing history.
    pub fn detect_rows(&self, history: Option<&[Vec<Vec<f64>>]>) -> bool {
        let Some(rows) = history else {
            return false;
        };
        if rows.len() < self.config.min_frames {
            return false;
        }

        let mut frames = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match JointFrame::from_rows(row) {
                Ok(frame) => frames.push(frame),
                Err(e) => {
                    warn!("Weights detection error: frame {}: {}", i, e);
                    return false;
                }
            }
        }
        self.detect(&frames)
    }

    /// Computes every signal for the history without applying the thresholds
    pub fn analyze(&self, history: &[JointFrame]) -> Result<WeightsReport, DetectError> {
        let frames = history.len();
        if frames < self.config.min_frames {
            return Err(DetectError::InsufficientHistory {
                frames,
                required: self.config.min_frames,
            });
        }
        if let Some(i) = history.iter().position(|f| !f.is_finite()) {
            return Err(DetectError::MalformedInput(format!(
                "frame {} has a non-finite coordinate",
                i
            )));
        }

        let w = stats::to_array(history);
        let left = self.arm_signals(&w, Side::Left);
        let right = self.arm_signals(&w, Side::Right);

        // finite input can still overflow into inf/NaN
        if !left.is_finite() || !right.is_finite() {
            return Err(DetectError::MalformedInput(String::from(
                "statistics are not finite",
            )));
        }

        Ok(WeightsReport {
            frames,
            left,
            right,
            position_reasonable: left.within_vertical_range && right.within_vertical_range,
        })
    }

    fn arm_signals(&self, w: &Array3<f64>, side: Side) -> ArmSignals {
        let wrist = w.slice(s![.., side.wrist().index(), ..]);
        let shoulder = w.slice(s![.., side.shoulder().index(), ..]);

        ArmSignals {
            position_variance: stats::position_variance(&wrist),
            distance_variance: stats::variance(&stats::distances(&wrist, &shoulder).view()),
            velocity_variance: stats::variance(&stats::step_magnitudes(&wrist).view()),
            within_vertical_range: stats::within_vertical_band(
                &wrist.column(1),
                &shoulder.column(1),
                self.config.max_above_shoulder,
                self.config.max_below_shoulder,
            ),
        }
    }
}
