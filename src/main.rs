use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use weights_detect::cli::Args;
use weights_detect::detector::{WeightsDetector, WeightsReport};
use weights_detect::processor::StreamProcessor;
use weights_detect::progress::{TrackProgressTracker, format_ratio};
use weights_detect::{config, logging, source};

/// Creates a timestamped output directory and returns its path
fn create_output_dir() -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let output_dir = PathBuf::from(format!("./runs/{}", timestamp));
    fs::create_dir_all(&output_dir)?;
    Ok(output_dir)
}

fn print_report(report: &WeightsReport, detector: &WeightsDetector) {
    let config = detector.config();
    println!("Final window: {} frames", report.frames);
    for (name, arm) in [("left", &report.left), ("right", &report.right)] {
        println!(
            "  {:<5} position var {:.5} | distance var {:.5} | velocity var {:.5} | in range {}",
            name,
            arm.position_variance,
            arm.distance_variance,
            arm.velocity_variance,
            arm.within_vertical_range
        );
    }
    println!(
        "  position stable {} | distance stable {} | motion smooth {} | position reasonable {}",
        report.position_stable(config),
        report.distance_stable(config),
        report.motion_smooth(config),
        report.position_reasonable
    );
    println!("  weights detected: {}", report.is_weighted(config));
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    logging::init_logging()?;

    let detector_config = config::build_config(&args)?;
    let detector = WeightsDetector::new(detector_config);

    let frames = source::read_track(Path::new(&args.source))?;
    info!("Loaded {} frames from {}", frames.len(), args.source);

    let output_dir = match &args.output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            PathBuf::from(dir)
        }
        None => create_output_dir()?,
    };
    info!("Created output directory: {}", output_dir.display());

    let mut processor = StreamProcessor::new(detector, args.window);
    let mut progress = TrackProgressTracker::new(frames.len() as u64, &args.source, args.headless);
    processor.process_track(&frames, &mut progress);

    let detections_path = output_dir.join("detections.csv");
    processor.write_detections(&detections_path)?;
    info!("Detections saved to: {}", detections_path.display());

    println!(
        "Weights detected in {} frames",
        format_ratio(processor.positive_count() as u64, frames.len() as u64)
    );

    if args.report {
        match processor.current_report() {
            Some(report) => print_report(&report, &detector),
            None => println!("Final window could not be scored"),
        }
    }

    Ok(())
}
