//! fxpack - native bundling orchestrator for pre-built JVM applications.
//!
//! This binary drives external bundler engines over a pre-built
//! application directory and patches their output, with proper error
//! handling and per-engine failure policy.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match fxpack::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
