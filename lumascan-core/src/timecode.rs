//! Timecode rendering for defect events.
//!
//! Pure functions of (frame number, frame rate); the presentation layer
//! picks a format per display. Invalid inputs (negative frame, non-positive
//! rate) render as the zero timecode rather than failing, since by the time
//! a frame number reaches display the scan itself has already validated the
//! geometry.

/// Display formats for a frame position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimecodeFormat {
    /// `hh:mm:ss:ff`, where ff is the frame within its second
    /// (frame number modulo the rounded frame rate)
    SmpteFrames,
    /// `hh:mm:ss.mmm`
    Precise,
    /// Plain frame number
    FrameNumber,
    /// Seconds as a decimal
    Seconds,
    /// Minutes as a decimal
    Minutes,
}

/// Renders `frame` at `fps` in the requested format.
#[must_use]
pub fn format_timecode(frame: i64, fps: f64, format: TimecodeFormat) -> String {
    match format {
        TimecodeFormat::SmpteFrames => smpte(frame, fps),
        TimecodeFormat::Precise => precise(frame, fps),
        TimecodeFormat::FrameNumber => frame.to_string(),
        TimecodeFormat::Seconds => {
            if fps <= 0.0 || frame < 0 {
                "0.000".to_string()
            } else {
                format!("{:.3}", frame as f64 / fps)
            }
        }
        TimecodeFormat::Minutes => {
            if fps <= 0.0 || frame < 0 {
                "0.000".to_string()
            } else {
                format!("{:.3}", frame as f64 / fps / 60.0)
            }
        }
    }
}

fn smpte(frame: i64, fps: f64) -> String {
    let nominal = fps.round() as i64;
    if fps <= 0.0 || frame < 0 || nominal <= 0 {
        return "00:00:00:00".to_string();
    }
    let total_seconds = (frame as f64 / fps) as i64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let frame_of_second = frame % nominal;
    format!("{hours:02}:{minutes:02}:{seconds:02}:{frame_of_second:02}")
}

fn precise(frame: i64, fps: f64) -> String {
    if fps <= 0.0 || frame < 0 {
        return "00:00:00.000".to_string();
    }
    let total_ms = (frame as f64 / fps * 1000.0).round() as i64;
    let ms = total_ms % 1000;
    let total_seconds = total_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smpte_format() {
        assert_eq!(format_timecode(0, 25.0, TimecodeFormat::SmpteFrames), "00:00:00:00");
        assert_eq!(format_timecode(30, 25.0, TimecodeFormat::SmpteFrames), "00:00:01:05");
        assert_eq!(
            format_timecode(25 * 3600 + 25, 25.0, TimecodeFormat::SmpteFrames),
            "01:00:01:00"
        );
        // 29.97: nominal rate rounds to 30.
        assert_eq!(format_timecode(30, 29.97, TimecodeFormat::SmpteFrames), "00:00:01:00");
        assert_eq!(format_timecode(31, 29.97, TimecodeFormat::SmpteFrames), "00:00:01:01");
    }

    #[test]
    fn test_smpte_invalid_inputs_render_zero() {
        assert_eq!(format_timecode(-1, 25.0, TimecodeFormat::SmpteFrames), "00:00:00:00");
        assert_eq!(format_timecode(10, 0.0, TimecodeFormat::SmpteFrames), "00:00:00:00");
        assert_eq!(format_timecode(10, -25.0, TimecodeFormat::SmpteFrames), "00:00:00:00");
    }

    #[test]
    fn test_precise_format() {
        assert_eq!(format_timecode(30, 25.0, TimecodeFormat::Precise), "00:00:01.200");
        assert_eq!(format_timecode(0, 25.0, TimecodeFormat::Precise), "00:00:00.000");
        assert_eq!(format_timecode(1, 29.97, TimecodeFormat::Precise), "00:00:00.033");
        assert_eq!(format_timecode(10, 0.0, TimecodeFormat::Precise), "00:00:00.000");
    }

    #[test]
    fn test_plain_and_decimal_formats() {
        assert_eq!(format_timecode(1234, 25.0, TimecodeFormat::FrameNumber), "1234");
        assert_eq!(format_timecode(50, 25.0, TimecodeFormat::Seconds), "2.000");
        assert_eq!(format_timecode(1500, 25.0, TimecodeFormat::Minutes), "1.000");
        assert_eq!(format_timecode(75, 25.0, TimecodeFormat::Minutes), "0.050");
    }
}
