// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (or INPUT_* environment variables)
// 2. Read the document and extract its links
// 3. Verify every link with a fixed-size worker pool
// 4. Print the working and broken links
// 5. Exit with proper code (0 = all reachable, 1 = broken links, 2 = error)
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - anyhow::Context: Adds a human-readable message to an error
// =============================================================================

mod cli; // src/cli.rs - command-line and environment parsing

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

// The checking core lives in the library (src/lib.rs)
use link_sentinel::checker;
use link_sentinel::verify::{self, OutcomeCollection};

use cli::Cli;

// Process exit codes
const EXIT_OK: i32 = 0;
const EXIT_UNREACHABLE: i32 = 1;
const EXIT_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    // Parse before anything else: a missing --file-path prints clap's usage
    // message and exits with code 2 before any work is done
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli).await;
    if let Err(e) = &result {
        // Structural failure: describe it, print neither list
        eprintln!("Error: {:#}", e);
    }

    std::process::exit(exit_code(&result));
}

// Maps the outcome of a run to the process exit status:
//   0 = every link is reachable
//   1 = at least one link is unreachable
//   2 = the run could not be completed
fn exit_code(result: &Result<OutcomeCollection>) -> i32 {
    match result {
        Ok(results) if results.is_clean() => EXIT_OK,
        Ok(_) => EXIT_UNREACHABLE,
        Err(_) => EXIT_ERROR,
    }
}

// Logs go to stderr so stdout only carries the results.
// RUST_LOG overrides the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// Reads, extracts, verifies and prints.
// Returns Err only for structural failures; nothing is printed in that case.
async fn run(cli: Cli) -> Result<OutcomeCollection> {
    let config = cli.probe_config();

    let content = tokio::fs::read_to_string(&cli.file_path)
        .await
        .with_context(|| format!("failed to read {}", cli.file_path.display()))?;

    let links = checker::extract_links(&content)?;
    tracing::info!(
        file = %cli.file_path.display(),
        links = links.len(),
        workers = config.worker_count,
        "checking links"
    );

    let results = verify::verify(&links, &config).await?;

    print_results(&results, cli.json)?;

    Ok(results)
}

// Prints the results either as two lists or as JSON
fn print_results(results: &OutcomeCollection, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(results)?;
        println!("{}", json_output);
    } else {
        print_lists(results);
    }
    Ok(())
}

fn print_lists(results: &OutcomeCollection) {
    println!("✅ Working URLs:");
    for url in &results.reachable {
        println!("- {}", url);
    }

    println!("\n\n❌ Invalid URLs:");
    for url in &results.unreachable {
        println!("- {}", url);
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Working: {}", results.reachable.len());
    println!("   ❌ Invalid: {}", results.unreachable.len());
    println!("   📋 Total: {}", results.total());
}
