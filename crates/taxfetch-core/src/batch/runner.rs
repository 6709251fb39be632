//! Sequential batch orchestration.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};

use super::events::{BatchEvent, BatchState, CancelFlag, EventSink};
use crate::account::AccountResolver;
use crate::assemble::RecordAssembler;
use crate::error::{Result, TaxFetchError};
use crate::extract::{ExtractedFields, TaxDetailExtractor};
use crate::fetch::{HttpTransport, TaxDetailFetcher, Transport};
use crate::models::{BatchConfig, FetchStatus, InputRecord, OutputRecord, TaxFetchConfig};
use crate::sheet::{RecordSink, RecordSource};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Records loaded from the input.
    pub total: usize,
    /// Records considered before the run ended.
    pub processed: usize,
    /// Records skipped for lack of an account number.
    pub skipped: usize,
    /// Output rows whose lookup failed.
    pub errors: usize,
    /// Whether the run stopped early on request.
    pub cancelled: bool,
    /// Where the output was written.
    pub output: Option<PathBuf>,
}

impl BatchSummary {
    /// Rows written to the output.
    pub fn emitted(&self) -> usize {
        self.processed - self.skipped
    }

    pub fn succeeded(&self) -> usize {
        self.emitted() - self.errors
    }
}

/// Output rows produced by the processing phase.
#[derive(Debug, Default)]
pub struct ProcessedBatch {
    pub records: Vec<OutputRecord>,
    pub summary: BatchSummary,
}

/// Resolves, fetches, extracts and assembles records one at a time.
pub struct BatchRunner<T> {
    resolver: AccountResolver,
    fetcher: TaxDetailFetcher<T>,
    extractor: TaxDetailExtractor,
    assembler: RecordAssembler,
    delay: Duration,
    cancel: CancelFlag,
}

impl<T: Transport> BatchRunner<T> {
    pub fn new(fetcher: TaxDetailFetcher<T>, config: &BatchConfig) -> Self {
        Self {
            resolver: AccountResolver::new(&config.id_column, &config.account_prefix),
            fetcher,
            extractor: TaxDetailExtractor::new(),
            assembler: RecordAssembler::new(),
            delay: config.delay(),
            cancel: CancelFlag::new(),
        }
    }

    /// Pause inserted after each emitted record.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Use a cancellation flag shared with the caller.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Load, process and write a whole batch.
    ///
    /// Loading and writing failures end the run with an error. Failures for
    /// individual records never do.
    pub fn run(
        &self,
        source: &dyn RecordSource,
        sink: &dyn RecordSink,
        events: &EventSink,
    ) -> Result<BatchSummary> {
        events.state(BatchState::Loading);
        let inputs = source.load().map_err(|e| fail(events, e.into()))?;
        events.log(format!("Loaded {} records", inputs.len()));

        events.state(BatchState::Processing);
        let ProcessedBatch {
            records,
            mut summary,
        } = self.process(&inputs, events);

        events.state(BatchState::Finalizing);
        let path = sink.write(records).map_err(|e| fail(events, e.into()))?;
        events.log(format!("Saved results to {}", path.display()));
        summary.output = Some(path);

        info!(
            "Batch finished: {}/{} processed, {} skipped, {} errors",
            summary.processed, summary.total, summary.skipped, summary.errors
        );
        events.state(BatchState::Completed);
        Ok(summary)
    }

    /// Run every record through the lookup pipeline, in input order.
    pub fn process(&self, inputs: &[InputRecord], events: &EventSink) -> ProcessedBatch {
        let total = inputs.len();
        let mut batch = ProcessedBatch {
            records: Vec::with_capacity(total),
            summary: BatchSummary {
                total,
                ..Default::default()
            },
        };

        for (index, input) in inputs.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!("Batch cancelled after {} of {} records", index, total);
                events.log(format!("Cancelled after {} of {} records", index, total));
                batch.summary.cancelled = true;
                break;
            }

            batch.summary.processed += 1;

            let Some(account) = self.resolver.resolve_record(input) else {
                info!("Skipping record {}: no account number", index + 1);
                batch.summary.skipped += 1;
                events.send(BatchEvent::Skipped { index });
                events.progress(batch.summary.processed, total);
                continue;
            };

            let record = self.process_account(input, &account, events);
            if record.is_error() {
                batch.summary.errors += 1;
            }
            batch.records.push(record);
            events.progress(batch.summary.processed, total);

            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        batch
    }

    fn process_account(
        &self,
        input: &InputRecord,
        account: &str,
        events: &EventSink,
    ) -> OutputRecord {
        match self.lookup(account) {
            Ok(fields) => {
                info!("Processed account: {}", account);
                events.log(format!("Processed account: {}", account));
                self.assembler.assemble(
                    input,
                    account,
                    Some(&fields),
                    &FetchStatus::Success,
                    Local::now(),
                )
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Error processing account {}: {}", account, message);
                events.send(BatchEvent::RecordFailed {
                    account: account.to_string(),
                    message: message.clone(),
                });
                self.assembler.assemble(
                    input,
                    account,
                    None,
                    &FetchStatus::Error(message),
                    Local::now(),
                )
            }
        }
    }

    /// Fetch and extract the fields for one already-resolved account.
    pub fn lookup(&self, account: &str) -> crate::fetch::Result<ExtractedFields> {
        let document = self.fetcher.fetch(account)?;
        Ok(self.extractor.extract(&document))
    }

    /// Resolve a raw identifier, then look it up.
    pub fn lookup_raw(&self, raw: &str) -> Result<Option<ExtractedFields>> {
        match self.resolver.resolve_raw(raw) {
            Some(account) => Ok(Some(self.lookup(&account)?)),
            None => Ok(None),
        }
    }
}

impl BatchRunner<HttpTransport> {
    /// Runner backed by a real HTTP client, for the supported county only.
    pub fn from_config(config: &TaxFetchConfig) -> Result<Self> {
        let county = config.batch.county;
        if !county.is_supported() {
            return Err(TaxFetchError::UnsupportedCounty(county.to_string()));
        }
        let fetcher = TaxDetailFetcher::from_config(&config.fetch)?;
        Ok(Self::new(fetcher, &config.batch))
    }
}

fn fail(events: &EventSink, err: TaxFetchError) -> TaxFetchError {
    warn!("Batch failed: {}", err);
    events.log(format!("Batch failed: {}", err));
    events.state(BatchState::Failed);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;
    use crate::fetch::testing::CannedTransport;
    use crate::models::schema;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use tokio::sync::mpsc;

    const BASE_URL: &str = "https://example.test/showdetail2.jsp";

    const PAGE: &str = r#"
        <table>
          <tr><td>Owner Name:</td><td>SMITH JOHN<br>123 Main St, San Antonio TX 78201</td></tr>
          <tr><td>Current Tax Due:</td><td>$1,204.50</td></tr>
        </table>
        <table>
          <tr><td>Land</td><td>Land Value: $50,000</td></tr>
        </table>
    "#;

    struct MemorySource(Vec<InputRecord>);

    impl RecordSource for MemorySource {
        fn load(&self) -> crate::sheet::Result<Vec<InputRecord>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    impl RecordSource for BrokenSource {
        fn load(&self) -> crate::sheet::Result<Vec<InputRecord>> {
            Err(SheetError::NoWorksheet("input.xlsx".to_string()))
        }
    }

    #[derive(Default)]
    struct MemorySink {
        written: RefCell<Vec<OutputRecord>>,
        fail: bool,
    }

    impl RecordSink for MemorySink {
        fn write(&self, records: Vec<OutputRecord>) -> crate::sheet::Result<PathBuf> {
            if self.fail {
                return Err(SheetError::Write {
                    path: "out.xlsx".to_string(),
                    reason: "disk full".to_string(),
                });
            }
            *self.written.borrow_mut() = records;
            Ok(PathBuf::from("out.xlsx"))
        }
    }

    fn input(taxid: &str) -> InputRecord {
        [("JDX", "1"), ("TAXID", taxid)].into_iter().collect()
    }

    fn runner(transport: &CannedTransport) -> BatchRunner<&CannedTransport> {
        BatchRunner::new(
            TaxDetailFetcher::new(transport, BASE_URL),
            &BatchConfig::default(),
        )
        .with_delay(Duration::ZERO)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<BatchEvent>) -> Vec<BatchEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_process_counts_skips_and_failures() {
        let transport = CannedTransport::new()
            .with_page("00123", PAGE)
            .with_page("00789", PAGE);
        let inputs = vec![
            input("ACCT00123"),
            input(""),
            input("00456"),
            input("ACCT00789"),
            input("   "),
        ];

        let batch = runner(&transport).process(&inputs, &EventSink::disabled());

        assert_eq!(batch.records.len(), 3);
        assert_eq!(batch.summary.total, 5);
        assert_eq!(batch.summary.processed, 5);
        assert_eq!(batch.summary.skipped, 2);
        assert_eq!(batch.summary.errors, 1);
        assert_eq!(batch.summary.succeeded(), 2);

        let statuses: Vec<_> = batch.records.iter().map(|r| r.fetch_status()).collect();
        assert_eq!(statuses[0], "SUCCESS");
        assert!(statuses[1].starts_with("ERROR:"));
        assert_eq!(statuses[2], "SUCCESS");

        let first = &batch.records[0];
        assert_eq!(first.get(schema::ACCOUNT_NUMBER), Some("00123"));
        assert_eq!(first.get(schema::CURRENT_OWNER_CITY), Some("San Antonio"));
        assert_eq!(first.get(schema::CURRENT_TAX_DUE), Some("$1204.50"));
        assert_eq!(first.get(schema::CURRENT_LAND_VALUE), Some("$50000"));
        assert_eq!(first.get("JDX"), Some("1"));

        let failed = &batch.records[1];
        assert_eq!(failed.get(schema::ACCOUNT_NUMBER), Some("00456"));
        assert_eq!(failed.get(schema::CURRENT_OWNER_NAME), Some(""));

        assert_eq!(
            *transport.requested.borrow(),
            vec![
                format!("{}?can=00123", BASE_URL),
                format!("{}?can=00456", BASE_URL),
                format!("{}?can=00789", BASE_URL),
            ]
        );
    }

    #[test]
    fn test_run_emits_states_and_progress() {
        let transport = CannedTransport::new().with_page("00123", PAGE);
        let source = MemorySource(vec![input("ACCT00123"), input("")]);
        let sink = MemorySink::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let summary = runner(&transport)
            .run(&source, &sink, &EventSink::new(tx))
            .unwrap();

        assert_eq!(summary.output, Some(PathBuf::from("out.xlsx")));
        assert_eq!(summary.emitted(), 1);
        assert_eq!(sink.written.borrow().len(), 1);

        let events = drain(&mut rx);
        let states: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                BatchEvent::State(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![
                BatchState::Loading,
                BatchState::Processing,
                BatchState::Finalizing,
                BatchState::Completed,
            ]
        );

        let progress: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                BatchEvent::Progress { processed, total } => Some((*processed, *total)),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![(1, 2), (2, 2)]);
        assert!(events.contains(&BatchEvent::Skipped { index: 1 }));
    }

    #[test]
    fn test_record_failure_is_reported() {
        let transport = CannedTransport::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let batch = runner(&transport).process(&[input("00456")], &EventSink::new(tx));
        assert_eq!(batch.summary.errors, 1);

        let failed = drain(&mut rx).into_iter().find_map(|e| match e {
            BatchEvent::RecordFailed { account, message } => Some((account, message)),
            _ => None,
        });
        let (account, message) = failed.unwrap();
        assert_eq!(account, "00456");
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn test_load_failure_is_fatal() {
        let transport = CannedTransport::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let err = runner(&transport)
            .run(&BrokenSource, &MemorySink::default(), &EventSink::new(tx))
            .unwrap_err();

        assert!(matches!(err, TaxFetchError::Sheet(SheetError::NoWorksheet(_))));
        assert!(drain(&mut rx).contains(&BatchEvent::State(BatchState::Failed)));
        assert!(transport.requested.borrow().is_empty());
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let transport = CannedTransport::new().with_page("00123", PAGE);
        let source = MemorySource(vec![input("00123")]);
        let sink = MemorySink {
            fail: true,
            ..Default::default()
        };

        let err = runner(&transport)
            .run(&source, &sink, &EventSink::disabled())
            .unwrap_err();
        assert!(matches!(err, TaxFetchError::Sheet(SheetError::Write { .. })));
    }

    #[test]
    fn test_cancel_stops_at_record_boundary() {
        let transport = CannedTransport::new().with_page("00123", PAGE);
        let runner = runner(&transport);
        runner.cancel_flag().cancel();

        let source = MemorySource(vec![input("00123"), input("00123")]);
        let sink = MemorySink::default();
        let summary = runner.run(&source, &sink, &EventSink::disabled()).unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.output, Some(PathBuf::from("out.xlsx")));
        assert!(transport.requested.borrow().is_empty());
    }

    #[test]
    fn test_identical_runs_match_apart_from_date() {
        let transport = CannedTransport::new().with_page("00123", PAGE);
        let inputs = vec![input("ACCT00123")];
        let runner = runner(&transport);

        let mut first = runner.process(&inputs, &EventSink::disabled()).records;
        let mut second = runner.process(&inputs, &EventSink::disabled()).records;
        for record in first.iter_mut().chain(second.iter_mut()) {
            record.set(schema::FETCH_DATE, "");
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_lookup_raw() {
        let transport = CannedTransport::new().with_page("00123", PAGE);
        let runner = runner(&transport);

        let fields = runner.lookup_raw("ACCT00123").unwrap().unwrap();
        assert_eq!(fields.owner_address.zip.as_deref(), Some("78201"));
        assert!(runner.lookup_raw("  ").unwrap().is_none());
        assert!(runner.lookup_raw("00999").is_err());
    }

    #[test]
    fn test_unsupported_county_is_rejected() {
        let mut config = TaxFetchConfig::default();
        config.batch.county = crate::models::County::Dallas;

        let err = BatchRunner::from_config(&config).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Currently only Bexar County is supported (got Dallas)."
        );
    }
}
