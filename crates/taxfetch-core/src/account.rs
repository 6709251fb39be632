//! Account number resolution from raw tax identifiers.

use crate::models::InputRecord;

/// Turns the raw identifier column of an input row into a lookup account number.
#[derive(Debug, Clone)]
pub struct AccountResolver {
    id_column: String,
    prefix: String,
}

impl AccountResolver {
    pub fn new(id_column: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            id_column: id_column.into(),
            prefix: prefix.into(),
        }
    }

    /// Account number for `record`, or `None` when the row should be skipped.
    pub fn resolve_record(&self, record: &InputRecord) -> Option<String> {
        self.resolve_raw(record.get(&self.id_column)?)
    }

    /// Account number for a raw identifier value, or `None` when it is blank.
    pub fn resolve_raw(&self, raw: &str) -> Option<String> {
        if raw.trim().is_empty() {
            return None;
        }
        // Prefix match happens before trimming.
        let account = raw.strip_prefix(self.prefix.as_str()).unwrap_or(raw).trim();
        (!account.is_empty()).then(|| account.to_string())
    }
}

impl Default for AccountResolver {
    fn default() -> Self {
        Self::new("TAXID", "ACCT")
    }
}

/// Resolve a raw `TAXID` value with the default `ACCT` prefix.
///
/// Returns `None` for blank input.
pub fn resolve(raw: &str) -> Option<String> {
    AccountResolver::default().resolve_raw(raw)
}
