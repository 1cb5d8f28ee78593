use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Progress tracker for scoring a keypoint track frame by frame
pub struct TrackProgressTracker {
    progress_bar: ProgressBar,
    start_time: Instant,
    total_frames: u64,
    processed_frames: u64,
    positive_frames: u64,
}

impl TrackProgressTracker {
    /// Creates a new progress tracker; a hidden one draws nothing
    pub fn new(total_frames: u64, operation_name: &str, hidden: bool) -> Self {
        let progress_bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total_frames)
        };

        // Fall back to the default bar if the template is rejected
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        progress_bar.set_style(style);
        progress_bar.set_message(format!("Scoring {}", operation_name));

        Self {
            progress_bar,
            start_time: Instant::now(),
            total_frames,
            processed_frames: 0,
            positive_frames: 0,
        }
    }

    /// Updates the progress by one scored frame
    pub fn update_frame(&mut self, weights: bool) {
        self.processed_frames += 1;
        if weights {
            self.positive_frames += 1;
        }
        self.progress_bar.inc(1);

        let msg = self.get_progress_message();
        self.progress_bar.set_message(msg);
    }

    fn get_progress_message(&self) -> String {
        if self.processed_frames == 0 {
            return "Starting...".to_string();
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let speed = if elapsed > 0.0 {
            format!("{:.0} fps", self.processed_frames as f64 / elapsed)
        } else {
            "Calculating...".to_string()
        };

        format!(
            "Weights: {} | Speed: {}",
            format_ratio(self.positive_frames, self.processed_frames),
            speed
        )
    }

    /// Finishes the progress bar
    pub fn finish(&self) {
        let message = format!(
            "Completed! Frames: {}/{} | Weights: {} | Processing: {:.2}s",
            self.processed_frames,
            self.total_frames,
            format_ratio(self.positive_frames, self.processed_frames),
            self.start_time.elapsed().as_secs_f64()
        );
        self.progress_bar.finish_with_message(message);
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn processed_frames(&self) -> u64 {
        self.processed_frames
    }

    pub fn positive_frames(&self) -> u64 {
        self.positive_frames
    }
}

/// Formats `part` of `total` as a percentage, e.g. `12/40 (30.0%)`
pub fn format_ratio(part: u64, total: u64) -> String {
    if total == 0 {
        return format!("{}/{} (0.0%)", part, total);
    }
    format!(
        "{}/{} ({:.1}%)",
        part,
        total,
        part as f64 * 100.0 / total as f64
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(0, 0), "0/0 (0.0%)");
        assert_eq!(format_ratio(12, 40), "12/40 (30.0%)");
        assert_eq!(format_ratio(1, 3), "1/3 (33.3%)");
        assert_eq!(format_ratio(5, 5), "5/5 (100.0%)");
    }

    #[test]
    fn test_progress_tracker_counts() {
        let mut tracker = TrackProgressTracker::new(3, "test track", true);
        assert_eq!(tracker.total_frames(), 3);
        assert_eq!(tracker.processed_frames(), 0);
        tracker.update_frame(true);
        tracker.update_frame(false);
        tracker.update_frame(true);
        assert_eq!(tracker.processed_frames(), 3);
        assert_eq!(tracker.positive_frames(), 2);
        tracker.finish();
    }
}
