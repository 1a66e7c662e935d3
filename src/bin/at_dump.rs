//! Dump every record of an Airtable table as JSON lines.
//!
//! ```sh
//! export AIRTABLE_API_KEY='pat...'
//! cargo run --bin at-dump -- appXXXXXXXXXXXXXX Tasks "Grid view" > tasks.jsonl
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see each request.

use std::io::Write;

use busbar_at_rest::{format_timestamp, Airtable, DynamicFields, ListRecordsOptions};
use futures::StreamExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (base_id, table_name) = match (args.next(), args.next()) {
        (Some(base_id), Some(table_name)) => (base_id, table_name),
        _ => {
            eprintln!("Usage: at-dump <base_id> <table> [view]");
            std::process::exit(2);
        }
    };
    let view = args.next();

    let airtable = Airtable::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!();
        eprintln!("  Export a personal access token: export AIRTABLE_API_KEY='pat...'");
        std::process::exit(1);
    });

    let table = airtable
        .base(base_id)
        .and_then(|base| base.table::<DynamicFields>(table_name))
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    let mut options = ListRecordsOptions::new();
    if let Some(view) = view {
        options = options.view(view);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;
    let mut records = table.iter_records(options);

    while let Some(record) = records.next().await {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                eprintln!("Error after {count} records: {e}");
                airtable.close();
                std::process::exit(1);
            }
        };

        let line = serde_json::json!({
            "id": record.id(),
            "createdTime": format_timestamp(&record.created_time()),
            "fields": record.fields(),
        });
        if let Err(e) = writeln!(out, "{line}") {
            eprintln!("Error: failed to write output: {e}");
            std::process::exit(1);
        }
        count += 1;
    }

    info!(count, table = table.name(), "Dump complete");
    airtable.close();
}
