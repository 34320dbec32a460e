use serde::{Deserialize, Serialize};

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Validity rule: status field → valid / invalid
// ---------------------------------------------------------------------------

/// Decides whether a record counts as valid, looking at nothing but the
/// status column.  The exact sentinel convention differs between log
/// generations (`Valid`/`Invalid` text in older captures, `1`/`0` flags in
/// newer ones), so the rule is configuration rather than a constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityRule {
    /// Only rows whose status equals the token are valid.
    StatusEquals(String),
    /// Rows whose status equals the sentinel are invalid; all other
    /// statuses are valid.
    InvalidSentinel(String),
}

impl Default for ValidityRule {
    fn default() -> Self {
        ValidityRule::StatusEquals("Valid".to_string())
    }
}

impl ValidityRule {
    /// A missing status field is always invalid.
    pub fn is_valid(&self, status: Option<&str>) -> bool {
        let Some(status) = status else {
            return false;
        };
        let status = status.trim();
        match self {
            ValidityRule::StatusEquals(token) => status == token,
            ValidityRule::InvalidSentinel(sentinel) => status != sentinel,
        }
    }
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

/// Indices of the records the views should draw.  With `show_invalid`
/// unset only valid records survive; otherwise every record does.
pub fn visible_indices(dataset: &Dataset, show_invalid: bool) -> Vec<usize> {
    dataset
        .validity
        .iter()
        .enumerate()
        .filter(|(_, valid)| show_invalid || **valid)
        .map(|(i, _)| i)
        .collect()
}
