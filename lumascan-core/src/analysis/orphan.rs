//! Orphan-scene detection.
//!
//! A scene is the interval between two detected cuts. Scenes shorter than
//! the configured frame threshold are flagged as likely splice artifacts,
//! with two exemptions: the first scene of the program (boundary pair
//! starting at frame 0) and scenes consisting entirely of black frames,
//! which are dark leaders rather than editing mistakes.

use std::collections::BTreeSet;

use crate::DetectionConfig;
use crate::analysis::{DefectCategory, DefectEvent, DefectTag, EventCounter, TagMap, has_tag};
use crate::report::FrameSample;

/// Emits one event per orphan scene.
///
/// Boundaries are the ordered, deduplicated cut frames, with frame 0
/// prepended and `total_frames` appended as the terminal boundary.
pub fn find_orphan_scenes(
    samples: &[FrameSample],
    tags: &TagMap,
    total_frames: i64,
    config: &DetectionConfig,
    ids: &mut EventCounter,
) -> Vec<DefectEvent> {
    let mut boundaries: BTreeSet<i64> = BTreeSet::new();
    boundaries.insert(0);
    for sample in samples {
        if has_tag(tags, sample.frame, DefectTag::IsSceneCut) {
            boundaries.insert(sample.frame);
        }
    }
    if total_frames > 0 {
        boundaries.insert(total_frames);
    }

    let mut events = Vec::new();
    let ordered: Vec<i64> = boundaries.into_iter().collect();
    for pair in ordered.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        // The first scene is never flagged, however short.
        if start == 0 {
            continue;
        }
        let duration = end - start;
        if duration <= 0 || duration > config.orphan_max_frames {
            continue;
        }
        if all_black(tags, start, end) {
            continue;
        }
        events.push(DefectEvent {
            id: ids.next_id(),
            start_frame: start,
            duration: duration.to_string(),
            category: DefectCategory::OrphanScene,
            details: format!("Unusually short scene, frames {}-{}", start, end - 1),
        });
    }
    events
}

/// An all-black short "scene" is a fade leader, not a splice artifact.
fn all_black(tags: &TagMap, start: i64, end: i64) -> bool {
    (start..end).all(|frame| has_tag(tags, frame, DefectTag::IsBlack))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples_with_cuts(count: i64, cuts: &[i64]) -> (Vec<FrameSample>, TagMap) {
        let samples = (0..count)
            .map(|frame| FrameSample {
                frame,
                yavg: 200.0,
                ydif: 0.0,
                crop: None,
            })
            .collect();
        let mut tags = TagMap::new();
        for &cut in cuts {
            tags.entry(cut).or_default().insert(DefectTag::IsSceneCut);
        }
        (samples, tags)
    }

    #[test]
    fn test_short_scene_is_flagged() {
        let (samples, tags) = samples_with_cuts(20, &[10, 13]);
        let config = DetectionConfig::default();
        let events = find_orphan_scenes(&samples, &tags, 20, &config, &mut EventCounter::new());
        // Scenes: (0,10) exempt, (10,13) len 3 <= 5, (13,20) len 7 > 5.
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_frame, 10);
        assert_eq!(events[0].duration, "3");
        assert_eq!(events[0].category, DefectCategory::OrphanScene);
        assert!(events[0].details.contains("frames 10-12"));
    }

    #[test]
    fn test_first_scene_always_exempt() {
        // A cut at frame 2 makes the first scene only 2 frames long, but
        // scenes starting at 0 are never reported.
        let (samples, tags) = samples_with_cuts(50, &[2]);
        let config = DetectionConfig::default();
        let events = find_orphan_scenes(&samples, &tags, 50, &config, &mut EventCounter::new());
        assert!(events.is_empty());
    }

    #[test]
    fn test_duplicate_boundaries_collapse() {
        // Cut frames {2, 2, 50} with total 50: boundaries become [0, 2, 50].
        // (2,50) is too long at threshold 5, (0,2) is exempt.
        let (samples, mut tags) = samples_with_cuts(50, &[2]);
        tags.entry(2).or_default().insert(DefectTag::IsSceneCut);
        let config = DetectionConfig::default();
        let events = find_orphan_scenes(&samples, &tags, 50, &config, &mut EventCounter::new());
        assert!(events.is_empty());
    }

    #[test]
    fn test_all_black_scene_skipped() {
        let (samples, mut tags) = samples_with_cuts(20, &[10, 13]);
        for frame in 10..13 {
            tags.entry(frame).or_default().insert(DefectTag::IsBlack);
        }
        let config = DetectionConfig::default();
        let events = find_orphan_scenes(&samples, &tags, 20, &config, &mut EventCounter::new());
        assert!(events.is_empty());
    }

    #[test]
    fn test_partially_black_scene_still_flagged() {
        let (samples, mut tags) = samples_with_cuts(20, &[10, 13]);
        tags.entry(10).or_default().insert(DefectTag::IsBlack);
        tags.entry(11).or_default().insert(DefectTag::IsBlack);
        let config = DetectionConfig::default();
        let events = find_orphan_scenes(&samples, &tags, 20, &config, &mut EventCounter::new());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_terminal_boundary_closes_last_scene() {
        // Cut at 18 with total 20: the tail scene (18,20) is 2 frames.
        let (samples, tags) = samples_with_cuts(20, &[18]);
        let config = DetectionConfig::default();
        let events = find_orphan_scenes(&samples, &tags, 20, &config, &mut EventCounter::new());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_frame, 18);
        assert_eq!(events[0].duration, "2");
    }

    #[test]
    fn test_zero_total_frames_leaves_tail_open() {
        let (samples, tags) = samples_with_cuts(20, &[18]);
        let config = DetectionConfig::default();
        let events = find_orphan_scenes(&samples, &tags, 0, &config, &mut EventCounter::new());
        // Without a terminal boundary there is no (18, end) pair.
        assert!(events.is_empty());
    }
}
