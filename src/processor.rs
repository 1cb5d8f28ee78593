use crate::detector::{WeightsDetector, WeightsReport};
use crate::frame::JointFrame;
use crate::history::JointHistory;
use crate::progress::TrackProgressTracker;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Outcome of scoring the window that ends at one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub frame_index: usize,
    pub history_len: usize,
    pub weights: bool,
}

/// Streams frames through a rolling window and scores every window
pub struct StreamProcessor {
    detector: WeightsDetector,
    history: JointHistory,
    detections: Vec<Detection>,
}

impl StreamProcessor {
    /// Creates a processor scoring windows of up to `window` frames
    pub fn new(detector: WeightsDetector, window: usize) -> Self {
        Self {
            detector,
            history: JointHistory::with_capacity(window),
            detections: Vec::new(),
        }
    }

    /// Pushes one frame and scores the resulting window
    pub fn process_frame(&mut self, frame: JointFrame) -> Detection {
        self.history.push(frame);
        let weights = self.history.detect_with(&self.detector);
        let detection = Detection {
            frame_index: self.detections.len(),
            history_len: self.history.len(),
            weights,
        };
        debug!(
            frame = detection.frame_index,
            history_len = detection.history_len,
            weights,
            "scored window"
        );
        self.detections.push(detection);
        detection
    }

    /// Scores a whole track, ticking the progress tracker per frame
    pub fn process_track(
        &mut self,
        frames: &[JointFrame],
        progress: &mut TrackProgressTracker,
    ) -> &[Detection] {
        for frame in frames {
            let detection = self.process_frame(*frame);
            progress.update_frame(detection.weights);
        }
        progress.finish();
        &self.detections
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    /// Number of frames scored positive so far
    pub fn positive_count(&self) -> usize {
        self.detections.iter().filter(|d| d.weights).count()
    }

    /// Per-signal breakdown of the current window, if it can be scored
    pub fn current_report(&mut self) -> Option<WeightsReport> {
        self.detector.analyze(self.history.frames()).ok()
    }

    /// Writes the detections as `frame,history_len,weights` CSV
    pub fn write_detections(&self, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
        fs::write(output_path, format_detections(&self.detections))
            .with_context(|| format!("Failed to write detections to {}", output_path.display()))
    }
}

/// Renders detections as CSV with a header row
pub fn format_detections(detections: &[Detection]) -> String {
    let rows: String = detections
        .iter()
        .map(|d| format!("{},{},{}\n", d.frame_index, d.history_len, d.weights as u8))
        .collect();
    format!("frame,history_len,weights\n{}", rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_frame() -> JointFrame {
        JointFrame::new([0.40, 0.55], [0.60, 0.55], [0.42, 0.35], [0.58, 0.35])
    }

    #[test]
    fn test_process_frame_turns_positive_at_min_frames() {
        let mut processor = StreamProcessor::new(WeightsDetector::default(), 30);
        for i in 0..19 {
            let d = processor.process_frame(still_frame());
            assert_eq!(d.frame_index, i);
            assert!(!d.weights);
        }
        let d = processor.process_frame(still_frame());
        assert_eq!(d.history_len, 20);
        assert!(d.weights);
    }

    #[test]
    fn test_window_is_capped() {
        let mut processor = StreamProcessor::new(WeightsDetector::default(), 25);
        let frames = vec![still_frame(); 40];
        let mut progress = TrackProgressTracker::new(40, "test", true);
        let detections = processor.process_track(&frames, &mut progress);
        assert_eq!(detections.len(), 40);
        assert_eq!(detections[39].history_len, 25);
        assert_eq!(processor.positive_count(), 21);
        assert_eq!(progress.positive_frames(), 21);
    }

    #[test]
    fn test_bad_frame_leaves_window_negative_until_evicted() {
        let mut processor = StreamProcessor::new(WeightsDetector::default(), 20);
        let mut bad = still_frame();
        bad.points[0][1] = f64::NAN;
        processor.process_frame(bad);
        for _ in 0..19 {
            assert!(!processor.process_frame(still_frame()).weights);
        }
        assert!(processor.current_report().is_none());
        // the NaN frame falls out of the window here
        assert!(processor.process_frame(still_frame()).weights);
        assert!(processor.current_report().is_some());
    }

    #[test]
    fn test_format_detections() {
        let detections = [
            Detection { frame_index: 0, history_len: 1, weights: false },
            Detection { frame_index: 1, history_len: 2, weights: true },
        ];
        assert_eq!(
            format_detections(&detections),
            "frame,history_len,weights\n0,1,0\n1,2,1\n"
        );
        assert_eq!(format_detections(&[]), "frame,history_len,weights\n");
    }

    #[test]
    fn test_write_detections_creates_directory() {
        let dir = std::env::temp_dir().join(format!("weights_detect_test_{}", std::process::id()));
        let path = dir.join("nested").join("detections.csv");
        let mut processor = StreamProcessor::new(WeightsDetector::default(), 20);
        processor.process_frame(still_frame());
        processor.write_detections(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("frame,history_len,weights\n0,1,0"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
