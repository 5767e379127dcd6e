//! Defect detection over an ordered frame-sample sequence.
//!
//! Two passes: classification tags individual frames
//! ([`classify::classify_frames`]), then three independent reducers merge
//! tagged frames into human-reviewable events (black-frame runs, border
//! runs, orphan scenes).

pub mod classify;
pub mod grouping;
pub mod orphan;

use std::collections::{HashMap, HashSet};
use std::fmt;

/// Per-frame defect markers produced by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectTag {
    IsBlack,
    HasBorder,
    IsSceneCut,
}

/// Sparse tag storage: only frames with at least one tag appear.
pub type TagMap = HashMap<i64, HashSet<DefectTag>>;

/// Checks a frame for one tag without materializing an entry.
#[must_use]
pub fn has_tag(tags: &TagMap, frame: i64, tag: DefectTag) -> bool {
    tags.get(&frame).is_some_and(|set| set.contains(&tag))
}

/// Defect family of a reported event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefectCategory {
    BlackFrame,
    BlackBorder,
    OrphanScene,
}

impl fmt::Display for DefectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefectCategory::BlackFrame => write!(f, "Black frame"),
            DefectCategory::BlackBorder => write!(f, "Black border"),
            DefectCategory::OrphanScene => write!(f, "Orphan scene"),
        }
    }
}

/// One reported anomaly: a grouped run of frames or a short scene.
#[derive(Debug, Clone, PartialEq)]
pub struct DefectEvent {
    /// Identifier unique within one scan, assigned in emission order.
    /// Maps a presentation row back to this event; not stable across runs.
    pub id: u32,
    /// First frame of the run or scene
    pub start_frame: i64,
    /// Length in frames, rendered as text for display
    pub duration: String,
    pub category: DefectCategory,
    /// Free-text summary of what was measured
    pub details: String,
}

/// Event-id source owned by one aggregation run.
///
/// Constructing a fresh counter is the "reset": ids always start at zero
/// for a new scan and no state outlives the run.
#[derive(Debug, Default)]
pub struct EventCounter(u32);

impl EventCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_id(&mut self) -> u32 {
        let id = self.0;
        self.0 += 1;
        id
    }
}
