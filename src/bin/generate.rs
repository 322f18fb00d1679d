//! Schema Generation CLI
//!
//! Scans Conduit plugin packages for node modules and writes one JSON Schema
//! document per node version, plus a run manifest with checksums.

use std::path::PathBuf;

use clap::Parser;
use conduit_schemas::{discover_manifests, Generator, GeneratorConfig, JsonModuleResolver};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-gen")]
#[command(about = "Generate JSON Schema documents from Conduit node packages")]
struct Cli {
    /// Package manifests to process (alternative to --root)
    manifests: Vec<PathBuf>,

    /// Scan this directory for package manifests
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Output directory for generated documents
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Package manifest file name to look for
    #[arg(long)]
    manifest_name: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Resolve and report without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Show per-module failure causes in the summary
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = GeneratorConfig::load_from(cli.config.as_deref())?;

    let output_dir = cli.output.clone().unwrap_or_else(|| config.output_dir());
    let manifest_name = cli
        .manifest_name
        .clone()
        .unwrap_or_else(|| config.discovery.manifest_name.clone());

    println!("🧩 Conduit Schema Generation");
    println!("  Output: {:?}", output_dir);
    println!();

    let manifests = if let Some(ref root) = cli.root {
        println!("🔍 Scanning {:?} for {} files", root, manifest_name);
        let found = discover_manifests(root, &manifest_name, &config.discovery.skip_prefixes);
        println!("   Found: {} packages", found.len());
        println!();
        found
    } else if !cli.manifests.is_empty() {
        cli.manifests.clone()
    } else {
        return Err("Either --root or at least one manifest path must be specified".into());
    };

    let generator = if cli.dry_run {
        Generator::dry_run(&output_dir, Box::new(JsonModuleResolver))
    } else {
        Generator::new(&output_dir, Box::new(JsonModuleResolver))?
    };

    let report = generator.generate_all(&manifests)?;

    for package in &report.packages {
        if let Some(ref error) = package.manifest_error {
            println!("⚠️  {} - {}", package.package, error);
            continue;
        }

        println!(
            "📂 {} - {} documents, {} failed",
            package.package,
            package.documents.len(),
            package.failures.len()
        );
        for record in package.documents.iter().take(5) {
            println!("    - {}", record.file);
        }
        if package.documents.len() > 5 {
            println!("    ... and {} more", package.documents.len() - 5);
        }
        if cli.verbose {
            for failure in &package.failures {
                println!("    ✗ {}: {}", failure.module, failure.cause);
            }
        }
    }

    println!();
    println!("📊 Generation Summary:");
    println!("  Documents: {}", report.total_generated());
    println!("  Failed modules: {}", report.total_failed());

    if cli.dry_run {
        println!();
        println!("🔍 Dry run - nothing written");
        return Ok(());
    }

    if report.total_generated() == 0 && report.has_failures() {
        return Err("no documents generated".into());
    }

    println!();
    println!("✅ Documents written to {:?}", output_dir);
    Ok(())
}
