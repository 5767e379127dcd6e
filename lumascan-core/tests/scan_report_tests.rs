use std::fs::File;
use std::io::{BufReader, Write};

use lumascan_core::*;
use tempfile::tempdir;

// --- Test Helper Functions ---

/// Builds a report document from (frame, yavg, ydif, optional crop box)
/// rows over a 1000x500 stream at 25 fps.
fn report_xml(nb_frames: Option<i64>, rows: &[(i64, f64, f64, Option<(i32, i32, i32, i32)>)]) -> String {
    let nb_attr = nb_frames
        .map(|n| format!(r#" nb_frames="{n}""#))
        .unwrap_or_default();
    let mut xml = format!(
        r#"<report><streams><stream index="0" codec_type="video" width="1000" height="500" r_frame_rate="25/1"{nb_attr}/></streams><frames>"#
    );
    for &(frame, yavg, ydif, crop) in rows {
        xml.push_str(&format!(r#"<frame media_type="video" pkt_pts="{frame}">"#));
        xml.push_str(&format!(
            r#"<tag key="lavfi.signalstats.YAVG" value="{yavg}"/>"#
        ));
        xml.push_str(&format!(
            r#"<tag key="lavfi.signalstats.YDIF" value="{ydif}"/>"#
        ));
        if let Some((x1, y1, x2, y2)) = crop {
            xml.push_str(&format!(r#"<tag key="lavfi.cropdetect.x1" value="{x1}"/>"#));
            xml.push_str(&format!(r#"<tag key="lavfi.cropdetect.y1" value="{y1}"/>"#));
            xml.push_str(&format!(r#"<tag key="lavfi.cropdetect.x2" value="{x2}"/>"#));
            xml.push_str(&format!(r#"<tag key="lavfi.cropdetect.y2" value="{y2}"/>"#));
        }
        xml.push_str("</frame>");
    }
    xml.push_str("</frames></report>");
    xml
}

fn scan(xml: &str, config: &DetectionConfig) -> CoreResult<ScanOutcome> {
    scan_report(
        xml.as_bytes(),
        config,
        &ScanOptions::default(),
        &ScanMonitor::default(),
    )
}

#[test]
fn test_black_run_scenario() {
    // yavg = [5, 5, 5, 200, 200] at threshold 17: one black-frame event,
    // start 0, count 3, mean 5.00.
    let rows: Vec<_> = [5.0, 5.0, 5.0, 200.0, 200.0]
        .iter()
        .enumerate()
        .map(|(i, &yavg)| (i as i64, yavg, 0.0, None))
        .collect();
    let xml = report_xml(Some(5), &rows);
    let config = DetectionConfig {
        detect_borders: false,
        detect_orphans: false,
        ..DetectionConfig::default()
    };
    let outcome = scan(&xml, &config).unwrap();
    assert_eq!(outcome.events.len(), 1);
    let event = &outcome.events[0];
    assert_eq!(event.category, DefectCategory::BlackFrame);
    assert_eq!(event.start_frame, 0);
    assert_eq!(event.duration, "3");
    assert!(event.details.contains("5.00"));
}

#[test]
fn test_black_frames_suppress_border_events() {
    // A dark letterboxed frame is reported black, never bordered.
    let rows = vec![(0, 2.0, 0.0, Some((0, 100, 999, 399)))];
    let xml = report_xml(Some(1), &rows);
    let outcome = scan(&xml, &DetectionConfig::default()).unwrap();
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(outcome.events[0].category, DefectCategory::BlackFrame);
}

#[test]
fn test_border_run_event() {
    // 100 px top and bottom borders (20% of 500 px) over three frames.
    let rows: Vec<_> = (0..4)
        .map(|f| {
            let crop = if f < 3 { Some((0, 100, 999, 399)) } else { None };
            (f, 200.0, 0.0, crop)
        })
        .collect();
    let xml = report_xml(Some(4), &rows);
    let config = DetectionConfig {
        detect_orphans: false,
        ..DetectionConfig::default()
    };
    let outcome = scan(&xml, &config).unwrap();
    assert_eq!(outcome.events.len(), 1);
    let event = &outcome.events[0];
    assert_eq!(event.category, DefectCategory::BlackBorder);
    assert_eq!(event.start_frame, 0);
    assert_eq!(event.duration, "3");
    assert_eq!(event.details, "Top: 100px (20.0%), Bottom: 100px (20.0%)");
}

#[test]
fn test_orphan_scene_event() {
    // Cuts at frames 10 and 13 leave a 3-frame scene in a 20-frame program.
    let rows: Vec<_> = (0..20)
        .map(|f| {
            let ydif = if f == 10 || f == 13 { 60.0 } else { 0.0 };
            (f, 200.0, ydif, None)
        })
        .collect();
    let xml = report_xml(Some(20), &rows);
    let config = DetectionConfig {
        detect_black: false,
        detect_borders: false,
        ..DetectionConfig::default()
    };
    let outcome = scan(&xml, &config).unwrap();
    assert_eq!(outcome.events.len(), 1);
    let event = &outcome.events[0];
    assert_eq!(event.category, DefectCategory::OrphanScene);
    assert_eq!(event.start_frame, 10);
    assert_eq!(event.duration, "3");
}

#[test]
fn test_observed_total_frames_wins_over_declared() {
    // Declared count 100 would close the tail scene at (18, 100) - too
    // long. An observed count of 20 makes it a 2-frame orphan.
    let rows: Vec<_> = (0..20)
        .map(|f| {
            let ydif = if f == 18 { 60.0 } else { 0.0 };
            (f, 200.0, ydif, None)
        })
        .collect();
    let xml = report_xml(Some(100), &rows);
    let config = DetectionConfig {
        detect_black: false,
        detect_borders: false,
        ..DetectionConfig::default()
    };

    let stale = scan(&xml, &config).unwrap();
    assert!(stale.events.is_empty());

    let options = ScanOptions {
        observed_total_frames: Some(20),
    };
    let live = scan_report(xml.as_bytes(), &config, &options, &ScanMonitor::default()).unwrap();
    assert_eq!(live.events.len(), 1);
    assert_eq!(live.events[0].start_frame, 18);
}

#[test]
fn test_event_ids_are_per_run_and_scans_are_idempotent() {
    let rows: Vec<_> = (0..20)
        .map(|f| {
            let yavg = if f < 2 { 3.0 } else { 200.0 };
            let ydif = if f == 10 || f == 13 { 60.0 } else { 0.0 };
            let crop = if f == 5 { Some((0, 100, 999, 399)) } else { None };
            (f, yavg, ydif, crop)
        })
        .collect();
    let xml = report_xml(Some(20), &rows);
    let config = DetectionConfig::default();

    let first = scan(&xml, &config).unwrap();
    let second = scan(&xml, &config).unwrap();
    assert_eq!(first.events, second.events);
    // One event per family; ids restart at 0 on every run.
    assert_eq!(first.events.len(), 3);
    let ids: Vec<u32> = first.events.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_scan_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fixture.qctools.xml");
    let rows = vec![(0, 3.0, 0.0, None), (1, 200.0, 0.0, None)];
    File::create(&path)
        .unwrap()
        .write_all(report_xml(Some(2), &rows).as_bytes())
        .unwrap();

    let file = File::open(&path).unwrap();
    let outcome = scan_report(
        BufReader::new(file),
        &DetectionConfig::default(),
        &ScanOptions::default(),
        &ScanMonitor::default(),
    )
    .unwrap();
    assert_eq!(outcome.geometry.width, 1000);
    assert_eq!(outcome.events.len(), 1);
}

#[test]
fn test_zero_frame_rate_fails_without_events() {
    let xml = r#"<report><streams><stream codec_type="video" width="1000" height="500" r_frame_rate="0/1"/></streams><frames><frame pkt_pts="0"/></frames></report>"#;
    match scan(xml, &DetectionConfig::default()) {
        Err(CoreError::IncompleteMedia(msg)) => assert!(msg.contains("frame rate")),
        other => panic!("expected IncompleteMedia, got {other:?}"),
    }
}

#[test]
fn test_invalid_config_rejected_before_reading() {
    let config = DetectionConfig {
        orphan_max_frames: 0,
        ..DetectionConfig::default()
    };
    // Would also fail the read (empty document), but config comes first.
    match scan("", &config) {
        Err(CoreError::InvalidConfig(_)) => {}
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_cancelled_scan_produces_no_outcome() {
    let rows = vec![(0, 3.0, 0.0, None)];
    let xml = report_xml(Some(1), &rows);
    let cancel = CancelFlag::new();
    cancel.request_stop();
    let monitor = ScanMonitor::new(cancel, &NullScanObserver);
    let result = scan_report(
        xml.as_bytes(),
        &DetectionConfig::default(),
        &ScanOptions::default(),
        &monitor,
    );
    assert!(matches!(result, Err(CoreError::Cancelled)));
}

#[test]
fn test_progress_observer_sees_positions() {
    use std::sync::atomic::{AtomicU64, Ordering};

    struct Recorder(AtomicU64);
    impl ScanObserver for Recorder {
        fn on_read_position(&self, bytes: u64) {
            self.0.store(bytes, Ordering::Relaxed);
        }
    }

    let rows: Vec<_> = (0..10).map(|f| (f, 200.0, 0.0, None)).collect();
    let xml = report_xml(Some(10), &rows);
    let recorder = Recorder(AtomicU64::new(0));
    let monitor = ScanMonitor::new(CancelFlag::new(), &recorder);
    scan_report(
        xml.as_bytes(),
        &DetectionConfig::default(),
        &ScanOptions::default(),
        &monitor,
    )
    .unwrap();
    // The final report lands at or near the end of the document.
    assert!(recorder.0.load(Ordering::Relaxed) > 0);
}
