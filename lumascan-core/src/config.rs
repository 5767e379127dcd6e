//! Detection configuration for the lumascan-core library.
//!
//! This module provides the configuration surface consumed by the
//! classification and aggregation passes: one on/off toggle and one numeric
//! threshold per defect family.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// Default constants

/// Default luma ceiling below which a frame counts as black.
/// YAVG is an 8-bit luma mean, so the useful range is 0-255.
pub const DEFAULT_BLACK_THRESHOLD: f64 = 17.0;

/// Default minimum border thickness, as a percentage of the frame dimension,
/// before a side counts as a black border. Zero or below means "any non-zero
/// border".
pub const DEFAULT_BORDER_PERCENT: f64 = 0.2;

/// Default luma-delta floor for scene-cut detection.
pub const DEFAULT_SCENE_THRESHOLD: f64 = 30.0;

/// Default maximum length, in frames, of a scene reported as an orphan.
pub const DEFAULT_ORPHAN_MAX_FRAMES: i64 = 5;

/// Detection configuration supplied once per scan.
///
/// All fields have defaults matching the analyzer's stock settings, so a
/// plain `DetectionConfig::default()` reproduces the out-of-the-box
/// behavior. Deserializable so a consumer can persist and reload it.
///
/// # Examples
///
/// ```
/// use lumascan_core::DetectionConfig;
///
/// let config = DetectionConfig {
///     black_threshold: 20.0,
///     detect_orphans: false,
///     ..DetectionConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Whether to tag and group near-black frames
    pub detect_black: bool,

    /// Luma ceiling (0-255): frames with `yavg` below this are black
    pub black_threshold: f64,

    /// Whether to tag and group frames with black borders
    pub detect_borders: bool,

    /// Border thickness floor as a percentage (0-100) of the frame dimension.
    /// At or below zero, any side thicker than 0 px counts.
    pub border_percent: f64,

    /// Whether to detect scene cuts and report orphan (too-short) scenes
    pub detect_orphans: bool,

    /// Maximum duration, in frames, of a scene flagged as an orphan
    pub orphan_max_frames: i64,

    /// Luma-delta floor (0-255) for scene-cut detection
    pub scene_threshold: f64,

    /// Use the transition-aware cut detector (local-maximum rule) instead of
    /// the hard-cut detector. Declare this when the source uses fades or
    /// dissolves between scenes.
    pub transition_aware: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            detect_black: true,
            black_threshold: DEFAULT_BLACK_THRESHOLD,
            detect_borders: true,
            border_percent: DEFAULT_BORDER_PERCENT,
            detect_orphans: true,
            orphan_max_frames: DEFAULT_ORPHAN_MAX_FRAMES,
            scene_threshold: DEFAULT_SCENE_THRESHOLD,
            transition_aware: false,
        }
    }
}

impl DetectionConfig {
    /// Validates threshold ranges. Called by `scan_report` before any work.
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=255.0).contains(&self.black_threshold) {
            return Err(CoreError::InvalidConfig(format!(
                "black_threshold must be within 0-255, got {}",
                self.black_threshold
            )));
        }
        if self.border_percent > 100.0 {
            return Err(CoreError::InvalidConfig(format!(
                "border_percent must not exceed 100, got {}",
                self.border_percent
            )));
        }
        if !(0.0..=255.0).contains(&self.scene_threshold) {
            return Err(CoreError::InvalidConfig(format!(
                "scene_threshold must be within 0-255, got {}",
                self.scene_threshold
            )));
        }
        if self.orphan_max_frames < 1 {
            return Err(CoreError::InvalidConfig(format!(
                "orphan_max_frames must be at least 1, got {}",
                self.orphan_max_frames
            )));
        }
        Ok(())
    }
}
