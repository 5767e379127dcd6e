//! Data extracted from one analyzer report: media geometry and per-frame
//! signal samples.

/// Media geometry read from the report's first video stream declaration.
///
/// A successfully parsed report always carries a positive frame rate and
/// non-zero dimensions; anything less fails the read (see
/// [`crate::report::read_report`]). Timecode and border-ratio math rely on
/// that invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaGeometry {
    /// Frame rate, reduced from the declared rational pair
    pub fps: f64,
    /// Picture width in pixels
    pub width: u32,
    /// Picture height in pixels
    pub height: u32,
    /// Frame count declared in stream metadata, when present.
    /// May be superseded by a count observed live by the caller.
    pub declared_frames: Option<i64>,
}

/// Active-picture bounding box reported by the crop detector for one frame.
///
/// Coordinates are inclusive pixel positions of the non-border picture area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Signal measurements for one analyzed frame, in report file order.
///
/// Frame numbers may have gaps; order in the sample sequence is the order
/// the frames appeared in the document. Samples are created once by the
/// reader and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSample {
    /// Frame number (index into the stream, not the sample sequence)
    pub frame: i64,
    /// Average luma; 255.0 ("not dark") when the report omits it
    pub yavg: f64,
    /// Luma delta from the previous frame; 0.0 when omitted
    pub ydif: f64,
    /// Crop-detect bounding box; `None` when any coordinate is missing
    pub crop: Option<CropBox>,
}

impl FrameSample {
    /// Derives the border thickness on each frame edge from the crop box.
    ///
    /// Returns `None` when the frame carries no crop measurement.
    #[must_use]
    pub fn crop_measurement(&self, geometry: &MediaGeometry) -> Option<CropMeasurement> {
        let b = self.crop?;
        let width = geometry.width as i32;
        let height = geometry.height as i32;
        Some(CropMeasurement {
            top: b.y1,
            bottom: height - (b.y2 + 1),
            left: b.x1,
            right: width - (b.x2 + 1),
        })
    }
}

/// Inferred border thickness, in pixels, on each of the four frame edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropMeasurement {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl CropMeasurement {
    /// Whether any side crosses the configured border threshold.
    ///
    /// A threshold at or below zero means any strictly positive side counts;
    /// otherwise a side counts when its share of the matching dimension
    /// (height for top/bottom, width for left/right) exceeds
    /// `threshold_percent / 100`.
    #[must_use]
    pub fn exceeds(&self, threshold_percent: f64, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if threshold_percent <= 0.0 {
            return self.top > 0 || self.bottom > 0 || self.left > 0 || self.right > 0;
        }
        let ratio = threshold_percent / 100.0;
        let h = f64::from(height);
        let w = f64::from(width);
        f64::from(self.top) / h > ratio
            || f64::from(self.bottom) / h > ratio
            || f64::from(self.left) / w > ratio
            || f64::from(self.right) / w > ratio
    }
}
