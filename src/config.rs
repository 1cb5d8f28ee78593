use anyhow::{Result, bail};
use crate::cli::Args;

/// Fewest frames a history must hold before it is scored
pub const DEFAULT_MIN_FRAMES: usize = 20;
/// Upper bound on the summed x/y variance of a wrist
pub const DEFAULT_MAX_POSITION_VARIANCE: f64 = 0.01;
/// Upper bound on the variance of the wrist-to-shoulder distance
pub const DEFAULT_MAX_DISTANCE_VARIANCE: f64 = 0.015;
/// Upper bound on the variance of the per-frame wrist speed
pub const DEFAULT_MAX_VELOCITY_VARIANCE: f64 = 0.008;
/// How far above its shoulder a wrist may sit (normalized y)
pub const DEFAULT_MAX_ABOVE_SHOULDER: f64 = 0.3;
/// How far below its shoulder a wrist may sit (normalized y)
pub const DEFAULT_MAX_BELOW_SHOULDER: f64 = 0.4;

/// Tuned thresholds for the weights heuristic.
///
/// The defaults are empirical and must stay as they are for existing
/// callers to get the same answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    pub min_frames: usize,
    pub max_position_variance: f64,
    pub max_distance_variance: f64,
    pub max_velocity_variance: f64,
    pub max_above_shoulder: f64,
    pub max_below_shoulder: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_frames: DEFAULT_MIN_FRAMES,
            max_position_variance: DEFAULT_MAX_POSITION_VARIANCE,
            max_distance_variance: DEFAULT_MAX_DISTANCE_VARIANCE,
            max_velocity_variance: DEFAULT_MAX_VELOCITY_VARIANCE,
            max_above_shoulder: DEFAULT_MAX_ABOVE_SHOULDER,
            max_below_shoulder: DEFAULT_MAX_BELOW_SHOULDER,
        }
    }
}

impl DetectorConfig {
    /// Checks that the thresholds describe something the detector can score
    pub fn validate(&self) -> Result<()> {
        // velocity needs at least one step between two frames
        if self.min_frames < 2 {
            bail!("min_frames must be at least 2, got {}", self.min_frames);
        }
        let thresholds = [
            ("position variance", self.max_position_variance),
            ("distance variance", self.max_distance_variance),
            ("velocity variance", self.max_velocity_variance),
            ("max above shoulder", self.max_above_shoulder),
            ("max below shoulder", self.max_below_shoulder),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                bail!("{} threshold must be a non-negative number, got {}", name, value);
            }
        }
        Ok(())
    }
}

/// Builds a detector configuration from command line arguments
pub fn build_config(args: &Args) -> Result<DetectorConfig> {
    let defaults = DetectorConfig::default();
    let config = DetectorConfig {
        min_frames: args.min_frames.unwrap_or(defaults.min_frames),
        max_position_variance: args
            .position_variance
            .unwrap_or(defaults.max_position_variance),
        max_distance_variance: args
            .distance_variance
            .unwrap_or(defaults.max_distance_variance),
        max_velocity_variance: args
            .velocity_variance
            .unwrap_or(defaults.max_velocity_variance),
        max_above_shoulder: args
            .max_above_shoulder
            .unwrap_or(defaults.max_above_shoulder),
        max_below_shoulder: args
            .max_below_shoulder
            .unwrap_or(defaults.max_below_shoulder),
    };
    config.validate()?;

    if args.window < config.min_frames {
        bail!(
            "window ({}) must hold at least min_frames ({}) frames",
            args.window,
            config.min_frames
        );
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            source: String::from("track.csv"),
            window: 30,
            min_frames: None,
            position_variance: None,
            distance_variance: None,
            velocity_variance: None,
            max_above_shoulder: None,
            max_below_shoulder: None,
            output_dir: None,
            headless: true,
            report: false,
        }
    }

    #[test]
    fn test_defaults_match_tuned_constants() {
        let config = DetectorConfig::default();
        assert_eq!(config.min_frames, 20);
        assert_eq!(config.max_position_variance, 0.01);
        assert_eq!(config.max_distance_variance, 0.015);
        assert_eq!(config.max_velocity_variance, 0.008);
        assert_eq!(config.max_above_shoulder, 0.3);
        assert_eq!(config.max_below_shoulder, 0.4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_build_config_without_overrides() {
        let config = build_config(&args()).unwrap();
        assert_eq!(config, DetectorConfig::default());
    }

    #[test]
    fn test_build_config_with_overrides() {
        let mut args = args();
        args.min_frames = Some(10);
        args.velocity_variance = Some(0.02);
        let config = build_config(&args).unwrap();
        assert_eq!(config.min_frames, 10);
        assert_eq!(config.max_velocity_variance, 0.02);
        assert_eq!(config.max_position_variance, 0.01);
    }

    #[test]
    fn test_build_config_rejects_small_window() {
        let mut args = args();
        args.window = 10;
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let mut config = DetectorConfig::default();
        config.min_frames = 1;
        assert!(config.validate().is_err());

        let mut config = DetectorConfig::default();
        config.max_distance_variance = -0.1;
        assert!(config.validate().is_err());

        let mut config = DetectorConfig::default();
        config.max_below_shoulder = f64::NAN;
        assert!(config.validate().is_err());
    }
}
