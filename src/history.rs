use crate::detector::WeightsDetector;
use crate::frame::JointFrame;
use std::collections::VecDeque;

/// Bounded rolling window of joint frames, oldest first
pub struct JointHistory {
    frames: VecDeque<JointFrame>,
    capacity: usize,
}

impl JointHistory {
    /// Create an empty history holding at most `capacity` frames
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a frame, evicting the oldest one when full
    pub fn push(&mut self, frame: JointFrame) {
        if self.capacity == 0 {
            return;
        }
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    /// Remove and return the oldest frame
    pub fn pop_front(&mut self) -> Option<JointFrame> {
        self.frames.pop_front()
    }

    /// Get a reference to the oldest frame without removing it
    pub fn peek_front(&self) -> Option<&JointFrame> {
        self.frames.front()
    }

    pub fn peek_back(&self) -> Option<&JointFrame> {
        self.frames.back()
    }

    /// Frames in chronological order as one contiguous slice
    pub fn frames(&mut self) -> &[JointFrame] {
        self.frames.make_contiguous()
    }

    /// Run the detector over the current window
    pub fn detect_with(&mut self, detector: &WeightsDetector) -> bool {
        detector.detect(self.frames())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of frames in the history
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() == self.capacity
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
