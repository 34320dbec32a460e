use std::collections::BTreeMap;

use crate::data::filter::ValidityRule;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Positional column names of a node log row.  The files carry no header;
/// rows may be shorter than 13 columns (trailing fields absent) and any
/// columns past 13 are ignored.
pub const COLUMNS: [&str; 13] = [
    "index",
    "id",
    "type",
    "background",
    "drone",
    "latitude",
    "longitude",
    "timestamp",
    "unknown1",
    "status",
    "unknown2",
    "unknown3",
    "value",
];

pub const COL_DRONE: usize = 4;
pub const COL_LATITUDE: usize = 5;
pub const COL_LONGITUDE: usize = 6;
pub const COL_TIMESTAMP: usize = 7;
pub const COL_STATUS: usize = 9;
pub const COL_VALUE: usize = 12;

// ---------------------------------------------------------------------------
// Record – one parsed CSV row
// ---------------------------------------------------------------------------

/// One row of a node log file.  Latitude, longitude and value are required
/// numerics; the rest is carried through mostly untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub latitude: f64,
    pub longitude: f64,
    /// Third spatial axis of the scatter view.
    pub value: f64,
    /// Raw status text; validity is derived from this field alone.
    pub status: Option<String>,
    /// Numeric part of the `drone: <float>` payload, when present.
    pub drone: Option<f64>,
    pub timestamp: Option<String>,
    /// Remaining positional columns kept verbatim, keyed by column name.
    pub extras: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Dataset – all records from one CSV file
// ---------------------------------------------------------------------------

/// The parsed contents of a single file, in row order, with a parallel
/// validity flag per record.  Rebuilt on every selection; never cached.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub file_name: String,
    pub records: Vec<Record>,
    /// `validity[i]` classifies `records[i]` under the active rule.
    pub validity: Vec<bool>,
    /// Rows discarded during parsing (non-numeric required fields).
    pub dropped_rows: usize,
}

impl Dataset {
    /// Classify the records under `rule` and pair them with their flags.
    pub fn from_records(
        file_name: String,
        records: Vec<Record>,
        dropped_rows: usize,
        rule: &ValidityRule,
    ) -> Self {
        let validity = records
            .iter()
            .map(|r| rule.is_valid(r.status.as_deref()))
            .collect();
        Dataset {
            file_name,
            records,
            validity,
            dropped_rows,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.validity.iter().filter(|v| **v).count()
    }

    /// Min/max of the extracted drone probabilities, if any record has one.
    pub fn drone_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for p in self.records.iter().filter_map(|r| r.drone) {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(p), hi.max(p)),
                None => (p, p),
            });
        }
        range
    }
}
