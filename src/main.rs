//! carecache admin utility.
//!
//! Inspects and manages the persisted dashboard snapshot on this
//! machine: show a summary, dump the raw envelope, reset it to the
//! empty state, or remove it entirely.

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use carecache::config::Config;
use carecache::storage::{FileStorage, StoragePort};
use carecache::store::envelope::{age_display, STORE_KEY};
use carecache::store::DashboardStore;
use carecache::utils::{format_optional, truncate};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g. RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!("Usage: carecache [COMMAND]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  --show   Summarize the persisted dashboard snapshot (default)");
    eprintln!("  --dump   Print the raw snapshot envelope as pretty JSON");
    eprintln!("  --clear  Reset the snapshot to the empty state (logout semantics)");
    eprintln!("  --purge  Delete the snapshot file entirely");
    eprintln!("  --help   Show this help");
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("--show");

    if matches!(command, "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    let config = Config::load()?;
    let storage = FileStorage::new(config.store_dir()?)?;
    info!(dir = %storage.dir().display(), "using snapshot directory");

    match command {
        "--show" => show(storage),
        "--dump" => dump(storage),
        "--clear" => clear(storage),
        "--purge" => purge(storage),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    }
}

/// Summarize the snapshot: counts, load state, age, first few records.
fn show(storage: FileStorage) -> Result<()> {
    let store = DashboardStore::open(storage);
    let state = store.load_state();

    println!("Dashboard snapshot");
    match store.stored_at() {
        Some(at) => println!("  written:       {}", age_display(at)),
        None => println!("  written:       never"),
    }
    println!("  data loaded:   {}", state.data_loaded);
    println!(
        "  operator:      {}",
        state
            .last_loaded
            .as_ref()
            .map(|o| o.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("  beneficiaries: {}", store.beneficiaries().len());
    println!("  follow-ups:    {}", store.follow_ups().len());

    if !store.beneficiaries().is_empty() {
        println!();
        for record in store.beneficiaries().iter().take(10) {
            println!(
                "    {:<14} {}",
                truncate(&format_optional(&record.id, "-"), 14),
                truncate(record.label(), 48)
            );
        }
        let remaining = store.beneficiaries().len().saturating_sub(10);
        if remaining > 0 {
            println!("    ... and {} more", remaining);
        }
    }
    Ok(())
}

/// Print the raw envelope exactly as persisted, pretty-printed.
fn dump(storage: FileStorage) -> Result<()> {
    match storage.get(STORE_KEY)? {
        Some(raw) => {
            let value: serde_json::Value = serde_json::from_str(&raw)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        None => eprintln!("No snapshot found."),
    }
    Ok(())
}

/// Logout semantics: reset every field and persist the empty envelope.
fn clear(storage: FileStorage) -> Result<()> {
    let mut store = DashboardStore::open(storage);
    store.clear();
    println!("Snapshot cleared.");
    Ok(())
}

/// Remove the persisted key entirely.
fn purge(mut storage: FileStorage) -> Result<()> {
    storage.remove(STORE_KEY)?;
    println!("Snapshot removed.");
    Ok(())
}
