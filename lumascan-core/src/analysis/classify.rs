//! Per-frame defect tagging.
//!
//! Pure function over the ordered sample sequence: no I/O, no input
//! mutation, deterministic. Each enabled defect family is evaluated
//! independently; neighbors are addressed by sequence position, not frame
//! number, so gaps in the numbering do not disturb the scene-cut rules.

use crate::DetectionConfig;
use crate::analysis::{DefectTag, TagMap, has_tag};
use crate::report::{FrameSample, MediaGeometry};

/// Tags every frame with zero or more defect markers.
///
/// Frames with no tag are absent from the result, not present with an
/// empty set.
#[must_use]
pub fn classify_frames(
    samples: &[FrameSample],
    geometry: &MediaGeometry,
    config: &DetectionConfig,
) -> TagMap {
    let mut tags = TagMap::new();

    for (i, sample) in samples.iter().enumerate() {
        if config.detect_black && sample.yavg < config.black_threshold {
            tags.entry(sample.frame).or_default().insert(DefectTag::IsBlack);
        }

        // A fully black frame has no meaningful crop box; skipping it here
        // keeps the two families mutually exclusive.
        if config.detect_borders && !has_tag(&tags, sample.frame, DefectTag::IsBlack) {
            if let Some(measurement) = sample.crop_measurement(geometry) {
                if measurement.exceeds(config.border_percent, geometry.width, geometry.height) {
                    tags.entry(sample.frame)
                        .or_default()
                        .insert(DefectTag::HasBorder);
                }
            }
        }

        if config.detect_orphans && i > 0 && is_scene_cut(samples, i, config) {
            tags.entry(sample.frame)
                .or_default()
                .insert(DefectTag::IsSceneCut);
        }
    }

    tags
}

/// Scene-cut test for the frame at sequence position `i` (i > 0).
///
/// Two mutually exclusive detectors:
/// - transition-aware: the luma delta is a strict local maximum above the
///   floor, which tolerates fades and dissolves;
/// - hard-cut (default): a sharp rise from a quiet frame, or the second of
///   two elevated frames that ends a short transition.
fn is_scene_cut(samples: &[FrameSample], i: usize, config: &DetectionConfig) -> bool {
    let threshold = config.scene_threshold;
    let ydif = samples[i].ydif;
    let prev = samples[i - 1].ydif;

    if config.transition_aware {
        let Some(next) = samples.get(i + 1) else {
            return false;
        };
        ydif > threshold && ydif > prev && ydif > next.ydif
    } else {
        let sharp_rise = ydif > threshold && prev < threshold / 2.0;
        let transition_end = samples.get(i + 1).is_some_and(|next| {
            ydif > threshold && prev > threshold && next.ydif < threshold / 2.0
        });
        sharp_rise || transition_end
    }
}
