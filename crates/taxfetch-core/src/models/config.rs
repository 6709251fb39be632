//! Configuration structures for the lookup pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration for the taxfetch pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxFetchConfig {
    /// Remote lookup configuration.
    pub fetch: FetchConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,

    /// Output spreadsheet configuration.
    pub output: OutputConfig,
}

/// Remote tax-detail lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Lookup page URL; the account number is appended as `?can=<account>`.
    pub base_url: String,

    /// User-Agent header sent with every request.
    pub user_agent: String,

    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Read timeout in seconds.
    pub read_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://bexar.acttax.com/act_webdev/bexar/showdetail2.jsp".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            connect_timeout_secs: 10,
            read_timeout_secs: 15,
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Input column holding the raw tax identifier.
    pub id_column: String,

    /// Literal prefix stripped from raw identifiers (case-sensitive).
    pub account_prefix: String,

    /// Pause after each processed record, in milliseconds.
    pub delay_ms: u64,

    /// County whose tax office is queried.
    pub county: County,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            id_column: "TAXID".to_string(),
            account_prefix: "ACCT".to_string(),
            delay_ms: 500,
            county: County::Bexar,
        }
    }
}

impl BatchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Output spreadsheet configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the output spreadsheet (created if absent).
    pub directory: PathBuf,

    /// Output file format.
    pub format: SheetFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            format: SheetFormat::Xlsx,
        }
    }
}

/// Spreadsheet file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetFormat {
    /// Excel workbook.
    #[default]
    Xlsx,
    /// Comma-separated values.
    Csv,
}

impl SheetFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// County tax authority to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum County {
    #[default]
    Bexar,
    Dallas,
}

impl County {
    /// Whether a lookup implementation exists for this county.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Bexar)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bexar => "Bexar",
            Self::Dallas => "Dallas",
        }
    }
}

impl fmt::Display for County {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for County {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bexar" => Ok(Self::Bexar),
            "dallas" => Ok(Self::Dallas),
            other => Err(format!("unknown county: {}", other)),
        }
    }
}

impl TaxFetchConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
