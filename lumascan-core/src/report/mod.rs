//! Streaming reader for analyzer report documents.
//!
//! A report is an XML tree of stream-metadata elements and per-frame
//! elements carrying `tag` key/value pairs. The reader makes one forward
//! pass with `quick_xml`, yielding the media geometry and the ordered frame
//! samples without holding the document in memory. Frame elements may appear
//! before or after the stream declarations; the first video stream wins and
//! audio streams are ignored.

mod sample;

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{CoreError, CoreResult};
use crate::progress::ScanMonitor;

pub use sample::{CropBox, CropMeasurement, FrameSample, MediaGeometry};

/// Per-frame measurement keys recognized in `tag` elements. Matching is
/// case-sensitive; anything else is ignored.
const KEY_YAVG: &str = "lavfi.signalstats.YAVG";
const KEY_YDIF: &str = "lavfi.signalstats.YDIF";
const KEY_CROP_X1: &str = "lavfi.cropdetect.x1";
const KEY_CROP_Y1: &str = "lavfi.cropdetect.y1";
const KEY_CROP_X2: &str = "lavfi.cropdetect.x2";
const KEY_CROP_Y2: &str = "lavfi.cropdetect.y2";

/// How many frame elements to read between progress reports.
const PROGRESS_FRAME_INTERVAL: u64 = 256;

/// Everything extracted from one report document.
#[derive(Debug, Clone)]
pub struct Report {
    pub geometry: MediaGeometry,
    /// Frame samples in document order
    pub samples: Vec<FrameSample>,
}

/// Reads a full report from `source`.
///
/// Fails with [`CoreError::Malformed`] on XML syntax errors (with the byte
/// offset quick-xml reports), [`CoreError::IncompleteMedia`] when the
/// document yields no positive frame rate, no valid dimensions, or no
/// frames at all, and [`CoreError::Cancelled`] when the monitor's stop flag
/// is tripped between element reads. A frame with an incomplete crop box is
/// not an error; that frame simply carries no crop measurement.
pub fn read_report<R: BufRead>(source: R, monitor: &ScanMonitor) -> CoreResult<Report> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    let mut geometry = GeometryBuilder::default();
    let mut samples: Vec<FrameSample> = Vec::new();
    let mut open_frame: Option<PendingFrame> = None;
    let mut frames_since_report: u64 = 0;

    loop {
        monitor.check_cancelled()?;
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            CoreError::malformed_at(e.to_string(), reader.buffer_position() as u64)
        })?;
        match event {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"stream" => geometry.observe_stream(e),
                b"frame" => open_frame = Some(PendingFrame::open(e)),
                b"tag" => {
                    if let Some(frame) = open_frame.as_mut() {
                        frame.apply_tag(e);
                    }
                }
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"stream" => geometry.observe_stream(e),
                // A childless frame still yields a sample, with defaults.
                b"frame" => samples.push(PendingFrame::open(e).finish()),
                b"tag" => {
                    if let Some(frame) = open_frame.as_mut() {
                        frame.apply_tag(e);
                    }
                }
                _ => {}
            },
            Event::End(ref e) => {
                if e.local_name().as_ref() == b"frame" {
                    if let Some(frame) = open_frame.take() {
                        samples.push(frame.finish());
                        frames_since_report += 1;
                        if frames_since_report >= PROGRESS_FRAME_INTERVAL {
                            monitor.report_position(reader.buffer_position() as u64);
                            frames_since_report = 0;
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    monitor.report_position(reader.buffer_position() as u64);

    let geometry = geometry.finish()?;
    if samples.is_empty() {
        return Err(CoreError::IncompleteMedia(
            "report contains no frame data".to_string(),
        ));
    }
    log::debug!(
        "report read: {} frames, {}x{} @ {:.3} fps",
        samples.len(),
        geometry.width,
        geometry.height,
        geometry.fps
    );
    Ok(Report { geometry, samples })
}

/// Geometry accumulated while scanning stream declarations.
#[derive(Debug, Default)]
struct GeometryBuilder {
    fps: Option<f64>,
    width: u32,
    height: u32,
    declared_frames: Option<i64>,
    found_video: bool,
}

impl GeometryBuilder {
    fn observe_stream(&mut self, e: &BytesStart) {
        if self.found_video {
            return;
        }
        if attr_str(e, b"codec_type").as_deref() != Some("video") {
            return;
        }
        if let Some(rate) = attr_str(e, b"r_frame_rate") {
            let parts: Vec<&str> = rate.split('/').collect();
            if parts.len() == 2 {
                let num: f64 = parts[0].trim().parse().unwrap_or(0.0);
                let den: f64 = parts[1].trim().parse().unwrap_or(0.0);
                if den != 0.0 {
                    self.fps = Some(num / den);
                }
            }
        }
        self.width = attr_parse(e, b"width").unwrap_or(0);
        self.height = attr_parse(e, b"height").unwrap_or(0);
        self.declared_frames = attr_parse(e, b"nb_frames");
        self.found_video = true;
    }

    /// Validates the collected geometry. A frame rate that never resolved to
    /// a positive value is fatal; substituting a default here would silently
    /// corrupt every downstream timecode.
    fn finish(self) -> CoreResult<MediaGeometry> {
        let fps = self.fps.unwrap_or(0.0);
        if fps <= 0.0 {
            return Err(CoreError::IncompleteMedia(
                "could not determine a positive frame rate from the report".to_string(),
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::IncompleteMedia(format!(
                "no valid video stream declaration found (dimensions {}x{})",
                self.width, self.height
            )));
        }
        Ok(MediaGeometry {
            fps,
            width: self.width,
            height: self.height,
            declared_frames: self.declared_frames,
        })
    }
}

/// A frame element currently being read; crop coordinates stay separate
/// until the element closes so a partially reported box degrades to "no
/// measurement" rather than a half-filled one.
#[derive(Debug)]
struct PendingFrame {
    frame: i64,
    yavg: f64,
    ydif: f64,
    x1: Option<i32>,
    y1: Option<i32>,
    x2: Option<i32>,
    y2: Option<i32>,
}

impl PendingFrame {
    fn open(e: &BytesStart) -> Self {
        Self {
            frame: attr_parse(e, b"pkt_pts").unwrap_or(0),
            yavg: 255.0,
            ydif: 0.0,
            x1: None,
            y1: None,
            x2: None,
            y2: None,
        }
    }

    fn apply_tag(&mut self, e: &BytesStart) {
        let Some(key) = attr_str(e, b"key") else {
            return;
        };
        let value = attr_str(e, b"value").unwrap_or_default();
        match key.as_str() {
            KEY_YAVG => {
                if let Ok(v) = value.trim().parse() {
                    self.yavg = v;
                }
            }
            KEY_YDIF => {
                if let Ok(v) = value.trim().parse() {
                    self.ydif = v;
                }
            }
            // Crop coordinates arrive as decimals; truncate like the
            // analyzer's own display does.
            KEY_CROP_X1 => self.x1 = parse_coord(&value),
            KEY_CROP_Y1 => self.y1 = parse_coord(&value),
            KEY_CROP_X2 => self.x2 = parse_coord(&value),
            KEY_CROP_Y2 => self.y2 = parse_coord(&value),
            _ => {}
        }
    }

    fn finish(self) -> FrameSample {
        let crop = match (self.x1, self.y1, self.x2, self.y2) {
            (Some(x1), Some(y1), Some(x2), Some(y2)) => Some(CropBox { x1, y1, x2, y2 }),
            _ => None,
        };
        FrameSample {
            frame: self.frame,
            yavg: self.yavg,
            ydif: self.ydif,
            crop,
        }
    }
}

fn parse_coord(value: &str) -> Option<i32> {
    value.trim().parse::<f64>().ok().map(|v| v as i32)
}

fn attr_str(e: &BytesStart, name: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name {
            return attr.unescape_value().ok().map(|v| v.into_owned());
        }
    }
    None
}

fn attr_parse<T: std::str::FromStr>(e: &BytesStart, name: &[u8]) -> Option<T> {
    attr_str(e, name).and_then(|v| v.trim().parse().ok())
}
