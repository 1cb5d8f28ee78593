use anyhow::{Context, Result, bail};
use crate::frame::{COORD_COUNT, JOINT_COUNT, JointFrame};
use std::fs;
use std::path::Path;

/// Reads a keypoint track from a CSV file
pub fn read_track(path: &Path) -> Result<Vec<JointFrame>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read track file {}", path.display()))?;
    parse_track(&content).with_context(|| format!("Failed to parse track file {}", path.display()))
}

/// Parses a CSV track, one frame per line:
/// `lw_x,lw_y,rw_x,rw_y,ls_x,ls_y,rs_x,rs_y`
///
/// Blank lines and `#` comments are skipped, and a non-numeric first
/// record is taken as a header.
pub fn parse_track(content: &str) -> Result<Vec<JointFrame>> {
    let mut frames = Vec::new();
    let mut seen_record = false;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_number = i + 1;

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if !seen_record && is_header(&fields) {
            seen_record = true;
            continue;
        }
        seen_record = true;

        frames.push(parse_record(&fields).with_context(|| format!("line {}", line_number))?);
    }

    Ok(frames)
}

fn is_header(fields: &[&str]) -> bool {
    fields.iter().any(|f| f.parse::<f64>().is_err())
        && fields.iter().all(|f| f.chars().any(|c| c.is_ascii_alphabetic()))
}

fn parse_record(fields: &[&str]) -> Result<JointFrame> {
    if fields.len() != JOINT_COUNT * COORD_COUNT {
        bail!(
            "expected {} columns, got {}",
            JOINT_COUNT * COORD_COUNT,
            fields.len()
        );
    }
    let values = fields
        .iter()
        .map(|f| {
            f.parse::<f64>()
                .with_context(|| format!("invalid coordinate {:?}", f))
        })
        .collect::<Result<Vec<f64>>>()?;
    JointFrame::from_flat(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Joint;

    #[test]
    fn test_parse_track_with_header_and_comments() {
        let content = "\
lw_x,lw_y,rw_x,rw_y,ls_x,ls_y,rs_x,rs_y
# warmup
0.40,0.55,0.60,0.55,0.42,0.35,0.58,0.35

0.41, 0.56, 0.61, 0.56, 0.42, 0.35, 0.58, 0.35
";
        let frames = parse_track(content).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].joint(Joint::LeftWrist), [0.41, 0.56]);
        assert_eq!(frames[1].joint(Joint::RightShoulder), [0.58, 0.35]);
    }

    #[test]
    fn test_parse_track_without_header() {
        let content = "0.40,0.55,0.60,0.55,0.42,0.35,0.58,0.35\n";
        assert_eq!(parse_track(content).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_track_reports_line_number() {
        let content = "\
0.40,0.55,0.60,0.55,0.42,0.35,0.58,0.35
0.40,0.55,0.60,0.55
";
        let err = parse_track(content).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_parse_track_rejects_text_after_first_record() {
        let content = "\
0.40,0.55,0.60,0.55,0.42,0.35,0.58,0.35
0.40,abc,0.60,0.55,0.42,0.35,0.58,0.35
";
        assert!(parse_track(content).is_err());
    }

    #[test]
    fn test_parse_track_keeps_non_finite_values() {
        // NaN parses; rejecting it is up to the detector
        let content = "NaN,0.55,0.60,0.55,0.42,0.35,0.58,0.35\n";
        let frames = parse_track(content).unwrap();
        assert_eq!(frames.len(), 1);
        assert!(!frames[0].is_finite());
    }

    #[test]
    fn test_read_track_missing_file() {
        assert!(read_track(Path::new("/nonexistent/track.csv")).is_err());
    }
}
