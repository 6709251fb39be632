//! Schema command - print the output columns.

use clap::Args;

use taxfetch_core::models::OUTPUT_SCHEMA;

/// Arguments for the schema command.
#[derive(Args)]
pub struct SchemaArgs {
    /// Prefix each column with its 1-based position
    #[arg(short, long)]
    numbered: bool,
}

pub fn run(args: SchemaArgs) -> anyhow::Result<()> {
    for (i, column) in OUTPUT_SCHEMA.iter().enumerate() {
        if args.numbered {
            println!("{:>2}  {}", i + 1, column);
        } else {
            println!("{}", column);
        }
    }
    Ok(())
}
