//! Run grouping for black-frame and border defects.
//!
//! Both passes share one shape: scan the sample sequence in order, extend an
//! active run while the current frame carries the family's tag, close the
//! run into one event at the first untagged frame, and flush a trailing run
//! at end of sequence. The run state is an explicit two-state machine so the
//! final flush is an ordinary transition rather than a post-loop special
//! case.

use crate::analysis::{DefectCategory, DefectEvent, DefectTag, EventCounter, TagMap, has_tag};
use crate::report::{CropMeasurement, FrameSample, MediaGeometry};

enum RunState<A> {
    NoActiveRun,
    ActiveRun(A),
}

/// Groups consecutive `IsBlack` frames into one event per run.
///
/// A run of length 1 still produces an event. Details carry the mean YAVG
/// over the run and the inclusive frame range.
pub fn group_black_runs(
    samples: &[FrameSample],
    tags: &TagMap,
    ids: &mut EventCounter,
) -> Vec<DefectEvent> {
    let mut events = Vec::new();
    let mut state = RunState::NoActiveRun;

    for sample in samples {
        let tagged = has_tag(tags, sample.frame, DefectTag::IsBlack);
        state = match (state, tagged) {
            (RunState::NoActiveRun, true) => RunState::ActiveRun(BlackRun::open(sample)),
            (RunState::NoActiveRun, false) => RunState::NoActiveRun,
            (RunState::ActiveRun(mut run), true) => {
                run.extend(sample);
                RunState::ActiveRun(run)
            }
            (RunState::ActiveRun(run), false) => {
                events.push(run.close(ids));
                RunState::NoActiveRun
            }
        };
    }
    if let RunState::ActiveRun(run) = state {
        events.push(run.close(ids));
    }
    events
}

struct BlackRun {
    start: i64,
    end: i64,
    count: u64,
    yavg_sum: f64,
}

impl BlackRun {
    fn open(sample: &FrameSample) -> Self {
        Self {
            start: sample.frame,
            end: sample.frame,
            count: 1,
            yavg_sum: sample.yavg,
        }
    }

    fn extend(&mut self, sample: &FrameSample) {
        self.end = sample.frame;
        self.count += 1;
        self.yavg_sum += sample.yavg;
    }

    fn close(self, ids: &mut EventCounter) -> DefectEvent {
        let mean = self.yavg_sum / self.count as f64;
        DefectEvent {
            id: ids.next_id(),
            start_frame: self.start,
            duration: self.count.to_string(),
            category: DefectCategory::BlackFrame,
            details: format!(
                "Dark run (mean YAVG {:.2}), frames {}-{}",
                mean, self.start, self.end
            ),
        }
    }
}

/// Groups consecutive `HasBorder` frames, tracking per-side extremes.
pub fn group_border_runs(
    samples: &[FrameSample],
    tags: &TagMap,
    geometry: &MediaGeometry,
    ids: &mut EventCounter,
) -> Vec<DefectEvent> {
    let mut events = Vec::new();
    let mut state = RunState::NoActiveRun;

    for sample in samples {
        let tagged = has_tag(tags, sample.frame, DefectTag::HasBorder);
        // Tagged frames always carry a measurement; classification never
        // tags a frame whose crop box is undefined.
        let measurement = if tagged {
            sample.crop_measurement(geometry)
        } else {
            None
        };
        state = match (state, measurement) {
            (RunState::NoActiveRun, Some(m)) => RunState::ActiveRun(BorderRun::open(sample, m)),
            (RunState::NoActiveRun, None) => RunState::NoActiveRun,
            (RunState::ActiveRun(mut run), Some(m)) => {
                run.extend(m);
                RunState::ActiveRun(run)
            }
            (RunState::ActiveRun(run), None) => {
                events.push(run.close(geometry, ids));
                RunState::NoActiveRun
            }
        };
    }
    if let RunState::ActiveRun(run) = state {
        events.push(run.close(geometry, ids));
    }
    events
}

struct BorderRun {
    start: i64,
    count: u64,
    min: CropMeasurement,
    max: CropMeasurement,
}

impl BorderRun {
    fn open(sample: &FrameSample, m: CropMeasurement) -> Self {
        Self {
            start: sample.frame,
            count: 1,
            min: m,
            max: m,
        }
    }

    fn extend(&mut self, m: CropMeasurement) {
        self.count += 1;
        self.min.top = self.min.top.min(m.top);
        self.max.top = self.max.top.max(m.top);
        self.min.bottom = self.min.bottom.min(m.bottom);
        self.max.bottom = self.max.bottom.max(m.bottom);
        self.min.left = self.min.left.min(m.left);
        self.max.left = self.max.left.max(m.left);
        self.min.right = self.min.right.min(m.right);
        self.max.right = self.max.right.max(m.right);
    }

    fn close(self, geometry: &MediaGeometry, ids: &mut EventCounter) -> DefectEvent {
        DefectEvent {
            id: ids.next_id(),
            start_frame: self.start,
            duration: self.count.to_string(),
            category: DefectCategory::BlackBorder,
            details: format_border_details(&self.min, &self.max, geometry),
        }
    }
}

/// Renders the per-side border summary for one run.
///
/// Only sides that reached a non-zero thickness are listed. Each side shows
/// its pixel range (collapsed to a single value when constant) and the
/// percentage of the matching dimension to one decimal; a min/max pair
/// within 0.1 percentage points collapses to a single percentage.
fn format_border_details(
    min: &CropMeasurement,
    max: &CropMeasurement,
    geometry: &MediaGeometry,
) -> String {
    let width = geometry.width;
    let height = geometry.height;
    let mut parts = Vec::new();
    let mut side = |name: &str, min_px: i32, max_px: i32, total: u32| {
        if total == 0 || max_px < 0 || (min_px == 0 && max_px == 0) {
            return;
        }
        let px = if min_px == max_px {
            format!("{min_px}px")
        } else {
            format!("{min_px}>{max_px}px")
        };
        let min_pct = f64::from(min_px) / f64::from(total) * 100.0;
        let max_pct = f64::from(max_px) / f64::from(total) * 100.0;
        let pct = if (min_pct - max_pct).abs() < 0.1 {
            format!("({min_pct:.1}%)")
        } else {
            format!("({min_pct:.1}>{max_pct:.1}%)")
        };
        parts.push(format!("{name}: {px} {pct}"));
    };
    side("Top", min.top, max.top, height);
    side("Bottom", min.bottom, max.bottom, height);
    side("Left", min.left, max.left, width);
    side("Right", min.right, max.right, width);
    parts.join(", ")
}
