//! Command-line argument definitions for the lumascan binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lumascan_core::TimecodeFormat;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Lumascan: video quality report analyzer",
    long_about = "Reads per-frame video-quality reports produced by an external \
                  signal-analysis tool and reports black-frame runs, black-border \
                  runs and orphan scenes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scans an analyzer report file for defect events
    Scan(ScanArgs),
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Analyzer report file (.xml or .qctools.xml)
    #[arg(required = true, value_name = "REPORT")]
    pub report: PathBuf,

    /// Optional: JSON file with detection settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Timecode format for the event table
    #[arg(long, value_enum, default_value = "smpte", value_name = "FORMAT")]
    pub timecode_format: TimecodeArg,

    /// Total frame count observed from a live analyzer run; overrides the
    /// count declared in the report
    #[arg(long, value_name = "N")]
    pub total_frames: Option<i64>,

    // --- Detection overrides (applied on top of defaults or --config) ---
    /// Luma ceiling for black-frame detection (0-255)
    #[arg(long, value_name = "LUMA")]
    pub black_threshold: Option<f64>,

    /// Border thickness floor as a percentage of the frame dimension
    #[arg(long, value_name = "PCT")]
    pub border_percent: Option<f64>,

    /// Luma-delta floor for scene-cut detection (0-255)
    #[arg(long, value_name = "LUMA")]
    pub scene_threshold: Option<f64>,

    /// Maximum length, in frames, of a scene reported as an orphan
    #[arg(long, value_name = "FRAMES")]
    pub orphan_max: Option<i64>,

    /// The source uses fades/dissolves; use the transition-aware cut detector
    #[arg(long)]
    pub transitions: bool,

    /// Disable black-frame detection
    #[arg(long)]
    pub no_black: bool,

    /// Disable black-border detection
    #[arg(long)]
    pub no_borders: bool,

    /// Disable orphan-scene detection
    #[arg(long)]
    pub no_orphans: bool,
}

/// CLI surface for the core timecode formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimecodeArg {
    /// hh:mm:ss:ff
    Smpte,
    /// hh:mm:ss.mmm
    Precise,
    /// Plain frame number
    Frames,
    /// Seconds as a decimal
    Seconds,
    /// Minutes as a decimal
    Minutes,
}

impl TimecodeArg {
    pub fn to_format(self) -> TimecodeFormat {
        match self {
            TimecodeArg::Smpte => TimecodeFormat::SmpteFrames,
            TimecodeArg::Precise => TimecodeFormat::Precise,
            TimecodeArg::Frames => TimecodeFormat::FrameNumber,
            TimecodeArg::Seconds => TimecodeFormat::Seconds,
            TimecodeArg::Minutes => TimecodeFormat::Minutes,
        }
    }
}
