//! Terminal rendering of scan results.

use lumascan_core::{DefectCategory, DefectEvent, MediaGeometry, TimecodeFormat, format_timecode};
use owo_colors::OwoColorize;

/// Print a heading with clear separation.
pub fn print_heading(text: &str) {
    let line = "=".repeat(50);
    println!("\n{}", line.blue());
    println!("{}", format!(" {text} ").bold());
    println!("{}", line.blue());
}

/// Print an info line with a colored label.
pub fn print_info<T: std::fmt::Display>(label: &str, value: T) {
    println!("{}: {}", label.cyan(), value);
}

/// Print the defect-event table, sorted by start frame across families.
///
/// Cells are padded before styling so ANSI escapes do not disturb the
/// column widths.
pub fn print_events(events: &[DefectEvent], geometry: &MediaGeometry, format: TimecodeFormat) {
    if events.is_empty() {
        println!("\n{}", "No defects found with the current settings.".green());
        return;
    }

    let mut sorted: Vec<&DefectEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start_frame);

    let timecodes: Vec<String> = sorted
        .iter()
        .map(|e| format_timecode(e.start_frame, geometry.fps, format))
        .collect();
    let tc_width = timecodes
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("Timecode".len());

    let header = format!(
        "{:>4}  {:<tc_width$}  {:>6}  {:<12}  {}",
        "#", "Timecode", "Frames", "Category", "Details",
    );
    println!("\n{}", header.bold());
    println!("{}", "-".repeat(50).blue());
    for (event, timecode) in sorted.iter().zip(&timecodes) {
        let category = format!("{:<12}", event.category.to_string());
        let category = match event.category {
            DefectCategory::BlackFrame => category.magenta().to_string(),
            DefectCategory::BlackBorder => category.yellow().to_string(),
            DefectCategory::OrphanScene => category.red().to_string(),
        };
        println!(
            "{:>4}  {:<tc_width$}  {:>6}  {}  {}",
            event.id, timecode, event.duration, category, event.details,
        );
    }
}

/// Print per-family counts after the table.
pub fn print_summary(events: &[DefectEvent]) {
    let count =
        |category: DefectCategory| events.iter().filter(|e| e.category == category).count();
    println!();
    print_info("Black frame events", count(DefectCategory::BlackFrame));
    print_info("Black border events", count(DefectCategory::BlackBorder));
    print_info("Orphan scene events", count(DefectCategory::OrphanScene));
}
