use crate::frame::{COORD_COUNT, JOINT_COUNT, JointFrame};
use ndarray::{Array1, Array3, ArrayView1, ArrayView2, Axis, Zip, s};

/// Stacks frames into a `[T, 4, 2]` array
pub fn to_array(frames: &[JointFrame]) -> Array3<f64> {
    Array3::from_shape_fn((frames.len(), JOINT_COUNT, COORD_COUNT), |(t, j, c)| {
        frames[t].points[j][c]
    })
}

/// Sum of the per-axis population variances of a `[T, 2]` series
/// (the trace of its covariance matrix)
pub fn position_variance(series: &ArrayView2<f64>) -> f64 {
    series.var_axis(Axis(0), 0.0).sum()
}

/// Euclidean length of every row of a `[T, 2]` array
pub fn row_norms(rows: &ArrayView2<f64>) -> Array1<f64> {
    rows.map_axis(Axis(1), |row| row.dot(&row).sqrt())
}

/// Per-frame distance between two `[T, 2]` series
pub fn distances(a: &ArrayView2<f64>, b: &ArrayView2<f64>) -> Array1<f64> {
    let diff = a - b;
    row_norms(&diff.view())
}

/// Length of each step between consecutive rows, T-1 values
pub fn step_magnitudes(series: &ArrayView2<f64>) -> Array1<f64> {
    let steps = &series.slice(s![1.., ..]) - &series.slice(s![..-1, ..]);
    row_norms(&steps.view())
}

/// Population variance of a 1-D series
pub fn variance(values: &ArrayView1<f64>) -> f64 {
    values.var(0.0)
}

/// True when every wrist y lies strictly inside
/// `(shoulder_y - max_above, shoulder_y + max_below)`
pub fn within_vertical_band(
    wrist_y: &ArrayView1<f64>,
    shoulder_y: &ArrayView1<f64>,
    max_above: f64,
    max_below: f64,
) -> bool {
    Zip::from(wrist_y)
        .and(shoulder_y)
        .all(|&w, &s| w > s - max_above && w < s + max_below)
}
