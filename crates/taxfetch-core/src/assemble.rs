//! Output record assembly.
//!
//! Every output row is built here against `OUTPUT_SCHEMA`, which is also the
//! header both sheet writers emit.

use chrono::{DateTime, Local};

use crate::extract::ExtractedFields;
use crate::models::schema;
use crate::models::{FetchStatus, InputRecord, OutputRecord};

/// Timestamp layout used for `FETCH_DATE`.
pub const FETCH_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Merges input fields and extracted fields into schema-ordered records.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordAssembler;

impl RecordAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Build one output record.
    ///
    /// Later sources overwrite earlier ones: input columns, then the account
    /// number, then extracted fields, then the fetch status and date. Input
    /// columns outside the schema are dropped.
    pub fn assemble(
        &self,
        input: &InputRecord,
        account: &str,
        fields: Option<&ExtractedFields>,
        status: &FetchStatus,
        fetched_at: DateTime<Local>,
    ) -> OutputRecord {
        let mut record = OutputRecord::blank();

        for (name, value) in input.iter() {
            record.set(name, value);
        }

        record.set(schema::ACCOUNT_NUMBER, account);

        if let Some(fields) = fields {
            for (column, value) in fields.columns() {
                record.set(column, value);
            }
        }

        record.set(schema::FETCH_STATUS, status.to_string());
        record.set(
            schema::FETCH_DATE,
            fetched_at.format(FETCH_DATE_FORMAT).to_string(),
        );

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rules::{AddressComponents, Valuation};
    use crate::models::{OUTPUT_SCHEMA, SCHEMA_LEN};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample_input() -> InputRecord {
        [
            ("JDX", "17"),
            ("TAXID", "ACCT00123"),
            ("OwnerName", "SMITH JOHN"),
            ("TOTAL DUE", "1200"),
            ("Notes", "call back"),
        ]
        .into_iter()
        .collect()
    }

    fn sample_fields() -> ExtractedFields {
        ExtractedFields {
            owner_name: Some("Owner Name: SMITH JOHN".to_string()),
            owner_address: AddressComponents {
                street: Some("123 Main St".to_string()),
                city: Some("San Antonio".to_string()),
                state: Some("TX".to_string()),
                zip: Some("78201".to_string()),
            },
            tax_due: Some("$45.00".to_string()),
            valuation: Valuation {
                land: Some("$50000".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn at(second: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, second)
            .single()
            .unwrap()
    }

    #[test]
    fn test_assemble_success() {
        let record = RecordAssembler::new().assemble(
            &sample_input(),
            "00123",
            Some(&sample_fields()),
            &FetchStatus::Success,
            at(7),
        );

        assert_eq!(record.values().len(), SCHEMA_LEN);
        assert_eq!(record.get("JDX"), Some("17"));
        assert_eq!(record.get("OwnerName"), Some("SMITH JOHN"));
        assert_eq!(record.get("TOTAL DUE"), Some("1200"));
        assert_eq!(record.get(schema::ACCOUNT_NUMBER), Some("00123"));
        assert_eq!(record.get(schema::CURRENT_OWNER_ZIP), Some("78201"));
        assert_eq!(record.get(schema::CURRENT_TAX_DUE), Some("$45.00"));
        assert_eq!(record.get(schema::CURRENT_LAND_VALUE), Some("$50000"));
        assert_eq!(record.get(schema::CURRENT_TOTAL_VALUE), Some(""));
        assert_eq!(record.get(schema::FETCH_STATUS), Some("SUCCESS"));
        assert_eq!(
            record.get(schema::FETCH_DATE),
            Some("2024-03-09T14:05:07.000")
        );
        assert_eq!(record.get("Notes"), None);
    }

    #[test]
    fn test_assemble_error_keeps_all_columns() {
        let record = RecordAssembler::new().assemble(
            &sample_input(),
            "00123",
            None,
            &FetchStatus::Error("connection refused".to_string()),
            at(7),
        );

        let columns: Vec<_> = record.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, OUTPUT_SCHEMA.to_vec());
        assert_eq!(record.fetch_status(), "ERROR: connection refused");
        assert!(record.is_error());
        assert_eq!(record.get(schema::CURRENT_OWNER_NAME), Some(""));
    }

    #[test]
    fn test_assemble_is_deterministic_apart_from_date() {
        let assembler = RecordAssembler::new();
        let input = sample_input();
        let fields = sample_fields();

        let mut first =
            assembler.assemble(&input, "00123", Some(&fields), &FetchStatus::Success, at(7));
        let mut second =
            assembler.assemble(&input, "00123", Some(&fields), &FetchStatus::Success, at(42));
        assert_ne!(first, second);

        first.set(schema::FETCH_DATE, "");
        second.set(schema::FETCH_DATE, "");
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolved_account_overrides_input_column() {
        let input: InputRecord = [("ACCOUNT_NUMBER", "ACCT999")].into_iter().collect();
        let record =
            RecordAssembler::new().assemble(&input, "999", None, &FetchStatus::Success, at(0));
        assert_eq!(record.get(schema::ACCOUNT_NUMBER), Some("999"));
    }
}
