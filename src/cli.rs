use argh::FromArgs;

/// Weights detection over a recorded wrist/shoulder keypoint track
#[derive(FromArgs, Debug)]
pub struct Args {
    /// source: CSV track with columns lw_x,lw_y,rw_x,rw_y,ls_x,ls_y,rs_x,rs_y
    #[argh(option, default = "String::from(\"./tracks/track.csv\")")]
    pub source: String,

    /// rolling window size in frames
    #[argh(option, default = "30")]
    pub window: usize,

    /// minimum frames before a window is scored (default: 20)
    #[argh(option)]
    pub min_frames: Option<usize>,

    /// maximum summed x/y wrist position variance (default: 0.01)
    #[argh(option)]
    pub position_variance: Option<f64>,

    /// maximum wrist-to-shoulder distance variance (default: 0.015)
    #[argh(option)]
    pub distance_variance: Option<f64>,

    /// maximum wrist speed variance (default: 0.008)
    #[argh(option)]
    pub velocity_variance: Option<f64>,

    /// how far above the shoulder a wrist may go (default: 0.3)
    #[argh(option)]
    pub max_above_shoulder: Option<f64>,

    /// how far below the shoulder a wrist may go (default: 0.4)
    #[argh(option)]
    pub max_below_shoulder: Option<f64>,

    /// output directory (default: ./runs/<timestamp>)
    #[argh(option)]
    pub output_dir: Option<String>,

    /// use headless mode (no progress bar)
    #[argh(switch)]
    pub headless: bool,

    /// print the per-signal breakdown for the final window
    #[argh(switch)]
    pub report: bool,
}
