//! End-to-end scan: read a report, classify frames, aggregate defects.

use std::io::BufRead;

use crate::analysis::classify::classify_frames;
use crate::analysis::grouping::{group_black_runs, group_border_runs};
use crate::analysis::orphan::find_orphan_scenes;
use crate::analysis::{DefectEvent, EventCounter};
use crate::config::DetectionConfig;
use crate::error::CoreResult;
use crate::progress::ScanMonitor;
use crate::report::{MediaGeometry, read_report};

/// Per-scan inputs beyond the document and detection config.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Total frame count observed out-of-band (for instance from the
    /// analyzer's live progress output). When present and positive it
    /// supersedes the count declared in the report's stream metadata: a
    /// live run's count is more authoritative than stale metadata in a
    /// pre-existing report.
    pub observed_total_frames: Option<i64>,
}

/// What one scan hands back to the caller: plain data, no callbacks.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub geometry: MediaGeometry,
    /// Events emitted family by family (black runs, border runs, orphan
    /// scenes), not sorted across families. Sort by `start_frame` before
    /// display.
    pub events: Vec<DefectEvent>,
}

/// Runs the full pipeline over one report document.
///
/// Fails fast on configuration, parse, media-completeness and cancellation
/// errors; on any error no events are produced.
pub fn scan_report<R: BufRead>(
    source: R,
    config: &DetectionConfig,
    options: &ScanOptions,
    monitor: &ScanMonitor,
) -> CoreResult<ScanOutcome> {
    config.validate()?;

    let report = read_report(source, monitor)?;
    let total_frames = resolve_total_frames(
        options.observed_total_frames,
        report.geometry.declared_frames,
        report.samples.len(),
    );

    let tags = classify_frames(&report.samples, &report.geometry, config);
    log::debug!("classification tagged {} of {} frames", tags.len(), report.samples.len());

    let mut ids = EventCounter::new();
    let mut events = Vec::new();
    if config.detect_black {
        events.extend(group_black_runs(&report.samples, &tags, &mut ids));
    }
    if config.detect_borders {
        events.extend(group_border_runs(
            &report.samples,
            &tags,
            &report.geometry,
            &mut ids,
        ));
    }
    if config.detect_orphans {
        events.extend(find_orphan_scenes(
            &report.samples,
            &tags,
            total_frames,
            config,
            &mut ids,
        ));
    }
    log::info!("scan complete: {} defect event(s)", events.len());

    Ok(ScanOutcome {
        geometry: report.geometry,
        events,
    })
}

/// Picks the authoritative total frame count: the live observed value wins,
/// then the declared metadata, then the number of samples actually read.
fn resolve_total_frames(observed: Option<i64>, declared: Option<i64>, sample_count: usize) -> i64 {
    observed
        .filter(|&n| n > 0)
        .or(declared.filter(|&n| n > 0))
        .unwrap_or(sample_count as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_total_frames_precedence() {
        assert_eq!(resolve_total_frames(Some(120), Some(100), 90), 120);
        assert_eq!(resolve_total_frames(None, Some(100), 90), 100);
        assert_eq!(resolve_total_frames(None, None, 90), 90);
        // Non-positive values never win.
        assert_eq!(resolve_total_frames(Some(0), Some(100), 90), 100);
        assert_eq!(resolve_total_frames(Some(0), Some(0), 90), 90);
    }
}
