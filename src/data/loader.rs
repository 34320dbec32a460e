use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::filter::ValidityRule;
use super::model::{
    Dataset, Record, COLUMNS, COL_DRONE, COL_LATITUDE, COL_LONGITUDE, COL_STATUS, COL_TIMESTAMP,
    COL_VALUE,
};

// ---------------------------------------------------------------------------
// Row-level parse errors
// ---------------------------------------------------------------------------

/// Why a single row was discarded.  Row errors never abort a file load;
/// the offending row is dropped and logged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("missing required column '{0}'")]
    MissingField(&'static str),
    #[error("column '{field}': '{value}' is not a number")]
    BadNumber { field: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// Directory listing
// ---------------------------------------------------------------------------

/// Immediate subdirectories of the data root, sorted by name.  Each one is
/// a selectable node folder.
pub fn list_folders(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("reading data root {}", root.display()))?;

    let mut folders: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    folders.sort();
    Ok(folders)
}

/// CSV file names inside a folder, lexicographically sorted.  The extension
/// match is case-insensitive; the loggers write `.CSV`.
pub fn list_csv_files(folder: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(folder)
        .with_context(|| format!("reading folder {}", folder.display()))?;

    let mut files: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
        .collect();
    files.sort();
    Ok(files)
}

// ---------------------------------------------------------------------------
// CSV loading
// ---------------------------------------------------------------------------

/// Parse one node log file into a [`Dataset`], classifying each surviving
/// row under `rule`.  Rows whose required numeric fields do not parse are
/// dropped with a warning; only an unreadable file is an error.
pub fn load_csv(path: &Path, rule: &ValidityRule) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unnamed>")
        .to_string();

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let raw = result.with_context(|| format!("{file_name}: reading row {row_no}"))?;
        match parse_row(&raw) {
            Ok(rec) => records.push(rec),
            Err(e) => {
                log::warn!("{file_name}: dropping row {row_no}: {e}");
                dropped += 1;
            }
        }
    }

    log::info!(
        "{file_name}: {} records loaded, {dropped} rows dropped",
        records.len()
    );
    Ok(Dataset::from_records(file_name, records, dropped, rule))
}

/// Parse one positional row.  Missing trailing columns become absent
/// fields; columns past 13 are ignored.
fn parse_row(raw: &csv::StringRecord) -> Result<Record, RowError> {
    let field = |idx: usize| raw.get(idx).map(str::trim).filter(|s| !s.is_empty());

    let latitude = parse_required(field(COL_LATITUDE), COLUMNS[COL_LATITUDE])?;
    let longitude = parse_required(field(COL_LONGITUDE), COLUMNS[COL_LONGITUDE])?;
    let value = parse_required(field(COL_VALUE), COLUMNS[COL_VALUE])?;

    let mut extras = BTreeMap::new();
    for (idx, name) in COLUMNS.iter().enumerate() {
        if matches!(
            idx,
            COL_DRONE | COL_LATITUDE | COL_LONGITUDE | COL_TIMESTAMP | COL_STATUS | COL_VALUE
        ) {
            continue;
        }
        if let Some(v) = field(idx) {
            extras.insert(name.to_string(), v.to_string());
        }
    }

    Ok(Record {
        latitude,
        longitude,
        value,
        status: field(COL_STATUS).map(String::from),
        drone: field(COL_DRONE).and_then(parse_drone_value),
        timestamp: field(COL_TIMESTAMP).map(String::from),
        extras,
    })
}

fn parse_required(field: Option<&str>, name: &'static str) -> Result<f64, RowError> {
    let text = field.ok_or(RowError::MissingField(name))?;
    text.parse::<f64>().map_err(|_| RowError::BadNumber {
        field: name,
        value: text.to_string(),
    })
}

/// Extract the float out of a `drone: <float>` payload.  Anything that
/// does not carry the prefix or a parseable number yields `None`.
pub fn parse_drone_value(text: &str) -> Option<f64> {
    let (_, rest) = text.split_once("drone:")?;
    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    rest[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    /// Unique scratch directory per test so fixtures never collide.
    fn scratch_dir(name: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "skytrace-test-{}-{name}-{n}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sentinel_rule() -> ValidityRule {
        ValidityRule::InvalidSentinel("0".to_string())
    }

    #[test]
    fn loads_documented_sample_rows() {
        let dir = scratch_dir("sample");
        let path = dir.join("LOG0001.CSV");
        std::fs::write(
            &path,
            "0,1,A,B,C,10.0,20.0,100,0,1,0,0,5.0\n\
             1,2,A,B,C,11.0,21.0,101,0,0,0,0,6.0\n",
        )
        .unwrap();

        let ds = load_csv(&path, &sentinel_rule()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.validity, vec![true, false]);
        assert_eq!(ds.valid_count(), 1);
        assert_eq!(ds.records[0].latitude, 10.0);
        assert_eq!(ds.records[0].longitude, 20.0);
        assert_eq!(ds.records[0].value, 5.0);
        assert_eq!(ds.records[1].value, 6.0);
        assert_eq!(ds.records[0].extras.get("type").map(String::as_str), Some("A"));
    }

    #[test]
    fn short_rows_parse_with_absent_trailing_fields() {
        let dir = scratch_dir("short");
        let path = dir.join("short.csv");
        // Row ends after longitude: no status, no value.
        std::fs::write(&path, "0,1,A,B,C,10.0,20.0\n").unwrap();

        let ds = load_csv(&path, &sentinel_rule()).unwrap();
        // value is a required numeric, so the row is dropped.
        assert_eq!(ds.len(), 0);
        assert_eq!(ds.dropped_rows, 1);
    }

    #[test]
    fn non_numeric_required_field_drops_the_row_only() {
        let dir = scratch_dir("badnum");
        let path = dir.join("bad.csv");
        std::fs::write(
            &path,
            "0,1,A,B,C,not-a-number,20.0,100,0,1,0,0,5.0\n\
             1,2,A,B,C,11.0,21.0,101,0,1,0,0,6.0\n",
        )
        .unwrap();

        let ds = load_csv(&path, &sentinel_rule()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dropped_rows, 1);
        assert_eq!(ds.records[0].latitude, 11.0);
    }

    #[test]
    fn extra_columns_past_thirteen_are_ignored() {
        let dir = scratch_dir("wide");
        let path = dir.join("wide.csv");
        std::fs::write(&path, "0,1,A,B,C,10.0,20.0,100,0,1,0,0,5.0,junk,junk\n").unwrap();

        let ds = load_csv(&path, &sentinel_rule()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].value, 5.0);
    }

    #[test]
    fn drone_payload_extraction() {
        assert_eq!(parse_drone_value("drone: 0.42"), Some(0.42));
        assert_eq!(parse_drone_value("drone:0.9"), Some(0.9));
        assert_eq!(parse_drone_value("drone: 0.125 extra"), Some(0.125));
        assert_eq!(parse_drone_value("bird: 0.3"), None);
        assert_eq!(parse_drone_value("drone: "), None);
    }

    #[test]
    fn drone_payload_flows_into_records() {
        let dir = scratch_dir("drone");
        let path = dir.join("drone.csv");
        std::fs::write(&path, "0,1,A,B,drone: 0.75,10.0,20.0,100,0,1,0,0,5.0\n").unwrap();

        let ds = load_csv(&path, &sentinel_rule()).unwrap();
        assert_eq!(ds.records[0].drone, Some(0.75));
        assert_eq!(ds.drone_range(), Some((0.75, 0.75)));
    }

    #[test]
    fn csv_listing_is_sorted_and_case_insensitive() {
        let dir = scratch_dir("listing");
        for name in ["b.CSV", "a.csv", "c.Csv", "notes.txt"] {
            std::fs::write(dir.join(name), "").unwrap();
        }

        let files = list_csv_files(&dir).unwrap();
        assert_eq!(files, vec!["a.csv", "b.CSV", "c.Csv"]);
    }

    #[test]
    fn empty_folder_yields_empty_listing_without_error() {
        let dir = scratch_dir("empty");
        let files = list_csv_files(&dir).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_folder_is_an_error() {
        let dir = scratch_dir("gone").join("does-not-exist");
        assert!(list_csv_files(&dir).is_err());
        assert!(list_folders(&dir).is_err());
    }

    #[test]
    fn folder_listing_skips_files() {
        let root = scratch_dir("folders");
        std::fs::create_dir(root.join("node2")).unwrap();
        std::fs::create_dir(root.join("node1")).unwrap();
        std::fs::write(root.join("stray.csv"), "").unwrap();

        let folders = list_folders(&root).unwrap();
        assert_eq!(folders, vec![root.join("node1"), root.join("node2")]);
    }
}
