// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use klient::config::Config;
use klient::{describe_failure, BuildOptions, Connection, ResourceSet};

/// Resolve Kubernetes manifests against a cluster
#[derive(Parser, Debug)]
#[command(name = "klient", version)]
struct Cli {
    /// Files, directories or URLs to read. Reads stdin when omitted
    #[arg(short = 'f', long = "filename")]
    filenames: Vec<String>,

    /// Decode into typed API objects instead of generic ones
    #[arg(long)]
    typed: bool,

    /// Look up every resolved object in the cluster
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env();
    info!(
        "Configuration loaded: context={:?} namespace={:?}",
        config.context, config.namespace
    );

    let conn = Connection::from_config(&config).await?;
    let options = BuildOptions {
        unstructured: config.unstructured && !cli.typed,
    };

    let set = if cli.filenames.is_empty() {
        debug!("Reading manifests from stdin");
        conn.resolve_from_stream(tokio::io::stdin(), Some(options))
            .await
    } else {
        conn.resolve_from_paths(cli.filenames.as_slice(), Some(options))
            .await
    };

    let failed = print_set(&set) | (cli.check && check_live(&conn, &set).await);

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Print a table of descriptors followed by errors. Returns whether any entry failed.
fn print_set(set: &ResourceSet) -> bool {
    println!("{:<20} {:<24} NAME", "NAMESPACE", "KIND");
    for info in set.infos() {
        println!(
            "{:<20} {:<24} {}",
            info.namespace,
            info.kind().unwrap_or_default(),
            info.name
        );
    }

    for error in set.errors() {
        eprintln!("error: {}", error);
    }

    set.has_errors()
}

/// Fetch each resolved object. Returns whether any lookup failed.
async fn check_live(conn: &Connection, set: &ResourceSet) -> bool {
    let mut failed = false;

    for info in set.infos() {
        if let Err(e) = conn.get_live(info).await {
            eprintln!("error: {}", describe_failure("get", info, e));
            failed = true;
        }
    }

    failed
}
