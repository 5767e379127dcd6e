// lumascan-cli/src/main.rs
//
// Command-line interface for the lumascan report analyzer. Parses arguments,
// sets up logging, assembles the detection configuration, runs the core scan
// with a progress bar, and renders the resulting defect events.

use std::fs::File;
use std::io::BufReader;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lumascan_core::{
    DetectionConfig, ScanMonitor, ScanObserver, ScanOptions, ScanOutcome, scan_report,
};
use owo_colors::OwoColorize;

mod cli;
mod logging;
mod output;

use cli::{Cli, Commands, ScanArgs};

fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan(args) => run_scan(args),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

/// Feeds reader byte positions into an indicatif bar.
struct ProgressBarObserver(ProgressBar);

impl ScanObserver for ProgressBarObserver {
    fn on_read_position(&self, bytes: u64) {
        self.0.set_position(bytes);
    }
}

fn run_scan(args: ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&args)?;

    output::print_heading("Lumascan Scan");
    output::print_info("Started", logging::run_timestamp());
    output::print_info("Report", args.report.display());
    log::info!("scanning report {}", args.report.display());

    let file = File::open(&args.report)
        .map_err(|e| format!("Failed to open report '{}': {}", args.report.display(), e))?;
    let report_size = file.metadata()?.len();

    let bar = ProgressBar::new(report_size);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {bytes}/{total_bytes} ({eta})")
            .expect("static progress template is valid"),
    );
    let observer = ProgressBarObserver(bar.clone());
    let monitor = ScanMonitor::new(lumascan_core::CancelFlag::new(), &observer);

    let options = ScanOptions {
        observed_total_frames: args.total_frames,
    };
    let outcome = scan_report(BufReader::new(file), &config, &options, &monitor);
    bar.finish_and_clear();
    let ScanOutcome { geometry, events } = outcome?;

    output::print_info(
        "Media",
        format!(
            "{}x{} @ {:.3} fps",
            geometry.width, geometry.height, geometry.fps
        ),
    );
    output::print_events(&events, &geometry, args.timecode_format.to_format());
    output::print_summary(&events);
    output::print_info("Finished", logging::run_timestamp());

    Ok(())
}

/// Detection settings: defaults, then an optional config file, then
/// individual flag overrides.
fn build_config(args: &ScanArgs) -> Result<DetectionConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open config '{}': {}", path.display(), e))?;
            serde_json::from_reader(BufReader::new(file))
                .map_err(|e| format!("Failed to parse config '{}': {}", path.display(), e))?
        }
        None => DetectionConfig::default(),
    };

    if let Some(v) = args.black_threshold {
        config.black_threshold = v;
    }
    if let Some(v) = args.border_percent {
        config.border_percent = v;
    }
    if let Some(v) = args.scene_threshold {
        config.scene_threshold = v;
    }
    if let Some(v) = args.orphan_max {
        config.orphan_max_frames = v;
    }
    if args.transitions {
        config.transition_aware = true;
    }
    if args.no_black {
        config.detect_black = false;
    }
    if args.no_borders {
        config.detect_borders = false;
    }
    if args.no_orphans {
        config.detect_orphans = false;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scan_args(extra: &[&str]) -> ScanArgs {
        let mut argv = vec!["lumascan", "scan", "report.xml"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Scan(args) => args,
        }
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(&scan_args(&[])).unwrap();
        assert!(config.detect_black);
        assert_eq!(config.black_threshold, 17.0);
        assert!(!config.transition_aware);
    }

    #[test]
    fn test_build_config_applies_overrides() {
        let config = build_config(&scan_args(&[
            "--black-threshold",
            "25",
            "--no-orphans",
            "--transitions",
        ]))
        .unwrap();
        assert_eq!(config.black_threshold, 25.0);
        assert!(!config.detect_orphans);
        assert!(config.transition_aware);
    }

    #[test]
    fn test_build_config_rejects_invalid_override() {
        assert!(build_config(&scan_args(&["--black-threshold", "999"])).is_err());
    }

    #[test]
    fn test_missing_report_path_fails_parse() {
        assert!(Cli::try_parse_from(["lumascan", "scan"]).is_err());
        let args = scan_args(&[]);
        assert_eq!(args.report, PathBuf::from("report.xml"));
    }
}
