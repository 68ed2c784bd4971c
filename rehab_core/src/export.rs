//! CSV export of the pain log.
//!
//! The export is a full snapshot: the target file is replaced on every run,
//! rows are written oldest first.

use crate::{Error, Result, UserProgress};
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    date: String,
    day_number: Option<u32>,
    back_pain: u8,
    knee_pain: u8,
    notes: &'a str,
}

/// Write every pain log entry to `csv_path`
///
/// Returns the number of rows written. The header is written even when the
/// log is empty.
pub fn export_pain_log(progress: &UserProgress, csv_path: &Path) -> Result<usize> {
    let parent = match csv_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    let mut count = 0;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file());

        writer.write_record(["date", "day_number", "back_pain", "knee_pain", "notes"])?;

        for (date, entry) in &progress.pain_log {
            writer.serialize(CsvRow {
                date: date.to_string(),
                day_number: entry.day_number,
                back_pain: entry.back_pain,
                knee_pain: entry.knee_pain,
                notes: &entry.notes,
            })?;
            count += 1;
        }

        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.persist(csv_path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} pain log entries to {:?}", count, csv_path);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_export_rows_in_date_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("pain.csv");

        let mut progress = UserProgress::default();
        progress.complete_day(1, date("2024-01-02"), 3, 1, "sore, but ok");
        progress.complete_day(2, date("2024-01-01"), 2, 2, "");

        let count = export_pain_log(&progress, &csv_path).unwrap();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "date,day_number,back_pain,knee_pain,notes");
        assert_eq!(lines[1], "2024-01-01,2,2,2,");
        assert_eq!(lines[2], "2024-01-02,1,3,1,\"sore, but ok\"");
    }

    #[test]
    fn test_export_empty_log_writes_header() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("out").join("pain.csv");

        let count = export_pain_log(&UserProgress::default(), &csv_path).unwrap();
        assert_eq!(count, 0);
        assert_eq!(
            std::fs::read_to_string(&csv_path).unwrap().trim_end(),
            "date,day_number,back_pain,knee_pain,notes"
        );
    }

    #[test]
    fn test_export_replaces_previous_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("pain.csv");
        std::fs::write(&csv_path, "stale contents\n").unwrap();

        let mut progress = UserProgress::default();
        progress.complete_day(1, date("2024-01-01"), 0, 0, "");
        export_pain_log(&progress, &csv_path).unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert!(!content.contains("stale"));
        assert_eq!(content.lines().count(), 2);
    }
}
