//! Core library for analyzing per-frame video-quality reports.
//!
//! This crate reads the XML report produced by an external signal-analysis
//! tool and reduces thousands of per-frame measurements to a short list of
//! reviewable defect events: runs of near-black frames, runs of frames with
//! black borders, and anomalously short ("orphan") scenes.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use lumascan_core::{DetectionConfig, ScanMonitor, ScanOptions, scan_report};
//!
//! let file = File::open("movie.qctools.xml").unwrap();
//! let config = DetectionConfig::default();
//! let outcome = scan_report(
//!     BufReader::new(file),
//!     &config,
//!     &ScanOptions::default(),
//!     &ScanMonitor::default(),
//! ).unwrap();
//!
//! for event in &outcome.events {
//!     println!("{} @ frame {}: {}", event.category, event.start_frame, event.details);
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod scan;
pub mod timecode;

// Re-exports for public API
pub use analysis::{DefectCategory, DefectEvent, DefectTag};
pub use config::DetectionConfig;
pub use error::{CoreError, CoreResult};
pub use progress::{CancelFlag, NullScanObserver, ScanMonitor, ScanObserver};
pub use report::{FrameSample, MediaGeometry, Report, read_report};
pub use scan::{ScanOptions, ScanOutcome, scan_report};
pub use timecode::{TimecodeFormat, format_timecode};
