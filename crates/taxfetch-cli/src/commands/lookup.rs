//! Lookup command - fetch and extract a single account.

use clap::Args;
use console::style;

use taxfetch_core::batch::BatchRunner;
use taxfetch_core::extract::ExtractedFields;

use super::load_config;

/// Arguments for the lookup command.
#[derive(Args)]
pub struct LookupArgs {
    /// Raw tax identifier (an `ACCT` prefix is stripped)
    #[arg(required = true)]
    taxid: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: LookupFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LookupFormat {
    /// JSON output
    Json,
    /// One `COLUMN value` line per field
    Text,
}

pub async fn run(args: LookupArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let taxid = args.taxid.clone();
    let fields = tokio::task::spawn_blocking(move || -> taxfetch_core::Result<_> {
        BatchRunner::from_config(&config)?.lookup_raw(&taxid)
    })
    .await??
    .ok_or_else(|| anyhow::anyhow!("No usable account number in {:?}", args.taxid))?;

    match args.format {
        LookupFormat::Json => println!("{}", serde_json::to_string_pretty(&fields)?),
        LookupFormat::Text => print!("{}", format_fields_text(&fields)),
    }

    Ok(())
}

fn format_fields_text(fields: &ExtractedFields) -> String {
    let columns = fields.columns();
    if columns.is_empty() {
        return format!("{} No fields found on the detail page.\n", style("!").yellow());
    }

    let width = columns.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
    let mut output = String::new();
    for (column, value) in columns {
        output.push_str(&format!("{:<width$}  {}\n", column, value, width = width));
    }
    output
}
