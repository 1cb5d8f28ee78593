use anyhow::{Result, bail};

/// Number of tracked joints per frame
pub const JOINT_COUNT: usize = 4;

/// Number of coordinates per joint (x, y)
pub const COORD_COUNT: usize = 2;

/// The four tracked keypoints, in the order they are stored in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    LeftWrist,
    RightWrist,
    LeftShoulder,
    RightShoulder,
}

impl Joint {
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftShoulder,
        Joint::RightShoulder,
    ];

    /// Slot of this joint inside a `JointFrame`
    pub fn index(self) -> usize {
        match self {
            Joint::LeftWrist => 0,
            Joint::RightWrist => 1,
            Joint::LeftShoulder => 2,
            Joint::RightShoulder => 3,
        }
    }
}

/// Body side, pairing a wrist with the shoulder above it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn wrist(self) -> Joint {
        match self {
            Side::Left => Joint::LeftWrist,
            Side::Right => Joint::RightWrist,
        }
    }

    pub fn shoulder(self) -> Joint {
        match self {
            Side::Left => Joint::LeftShoulder,
            Side::Right => Joint::RightShoulder,
        }
    }
}

/// One frame of tracked keypoints in normalized image coordinates.
///
/// y grows downwards, so a larger y means lower on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointFrame {
    pub points: [[f64; COORD_COUNT]; JOINT_COUNT],
}

impl JointFrame {
    pub fn new(
        left_wrist: [f64; 2],
        right_wrist: [f64; 2],
        left_shoulder: [f64; 2],
        right_shoulder: [f64; 2],
    ) -> Self {
        Self {
            points: [left_wrist, right_wrist, left_shoulder, right_shoulder],
        }
    }

    /// Builds a frame from untyped rows, rejecting anything that is not 4x2
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.len() != JOINT_COUNT {
            bail!("expected {} joints per frame, got {}", JOINT_COUNT, rows.len());
        }
        let mut points = [[0.0; COORD_COUNT]; JOINT_COUNT];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != COORD_COUNT {
                bail!(
                    "joint {} has {} coordinates, expected {}",
                    i,
                    row.len(),
                    COORD_COUNT
                );
            }
            points[i] = [row[0], row[1]];
        }
        Ok(Self { points })
    }

    /// Builds a frame from a flat `[lw_x, lw_y, rw_x, rw_y, ls_x, ls_y, rs_x, rs_y]` slice
    pub fn from_flat(values: &[f64]) -> Result<Self> {
        if values.len() != JOINT_COUNT * COORD_COUNT {
            bail!(
                "expected {} values per frame, got {}",
                JOINT_COUNT * COORD_COUNT,
                values.len()
            );
        }
        let mut points = [[0.0; COORD_COUNT]; JOINT_COUNT];
        for (point, pair) in points.iter_mut().zip(values.chunks_exact(COORD_COUNT)) {
            *point = [pair[0], pair[1]];
        }
        Ok(Self { points })
    }

    pub fn joint(&self, joint: Joint) -> [f64; 2] {
        self.points[joint.index()]
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().flatten().all(|v| v.is_finite())
    }
}
