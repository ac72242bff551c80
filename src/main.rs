//! Simdguide - x86/x64 SIMD Intrinsic Metadata Engine
//!
//! Main CLI entry point for converting guide documents and querying the
//! intrinsic store.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use simdguide::cache;
use simdguide::config::SimdguideConfig;
use simdguide::store::IntrinsicStore;
use simdguide::taxonomy::CpuFeatureSet;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "simdguide")]
#[command(version)]
#[command(about = "SIMD intrinsic metadata engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a guide document into the XML cache format
    Convert {
        /// Input guide document
        #[arg(short, long)]
        input: PathBuf,

        /// Output cache file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show all overloads of one intrinsic
    Lookup {
        /// Intrinsic name (case-insensitive)
        name: String,

        /// Data file (guide document or .xml cache); defaults to the
        /// configured source
        #[arg(long)]
        data: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List all intrinsic names in document order
    Names {
        /// Data file (guide document or .xml cache)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Only names usable with the configured feature set
        #[arg(long)]
        enabled_only: bool,
    },

    /// Show the CPU features required by an intrinsic
    Features {
        /// Intrinsic name (case-insensitive)
        name: String,

        /// Data file (guide document or .xml cache)
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

/// JSON projection of a record for `lookup --json`.
#[derive(Serialize)]
struct RecordView {
    name: String,
    signature: String,
    cpuid: String,
    instruction: String,
    library: bool,
    description: String,
    operation: String,
    performance: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = SimdguideConfig::load_from_cwd().unwrap_or_default();

    match cli.command {
        Commands::Convert { input, output } => {
            let store = IntrinsicStore::load_guide(&input)
                .with_context(|| format!("failed to ingest {}", input.display()))?;
            cache::save(&store, &output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!(
                "converted {} intrinsics ({} names) -> {}",
                store.record_count(),
                store.name_count(),
                output.display()
            );
        }

        Commands::Lookup { name, data, json } => {
            let store = load_store(&config, data.as_deref())?;
            let hits = store.lookup(&name);
            if hits.is_empty() {
                bail!("unknown intrinsic: {name}");
            }
            if json {
                let views: Vec<RecordView> = hits
                    .iter()
                    .map(|r| RecordView {
                        name: r.name.clone(),
                        signature: r.signature(),
                        cpuid: r.cpu_features.to_tag_string(),
                        instruction: r.mnemonic.as_str().to_string(),
                        library: r.is_library_routine,
                        description: r.description.clone(),
                        operation: r.operation.clone(),
                        performance: r.performance.clone(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                for rec in hits {
                    println!("{}", rec.signature());
                    println!("  cpuid: {}", rec.cpu_features.to_tag_string());
                    if !rec.mnemonic.is_unknown() {
                        println!("  instruction: {}", rec.mnemonic);
                    }
                    if rec.is_library_routine {
                        println!("  library routine (no fixed instruction)");
                    }
                    if !rec.description.is_empty() {
                        println!("  {}", rec.description);
                    }
                }
            }
        }

        Commands::Names { data, enabled_only } => {
            let store = load_store(&config, data.as_deref())?;
            if enabled_only {
                let enabled = config.enabled_features();
                let mut seen = None;
                for rec in store.records_by_feature(enabled) {
                    if seen != Some(&rec.name) {
                        println!("{}", rec.name);
                        seen = Some(&rec.name);
                    }
                }
            } else {
                for name in store.names() {
                    println!("{name}");
                }
            }
        }

        Commands::Features { name, data } => {
            let store = load_store(&config, data.as_deref())?;
            if !store.contains(&name) {
                bail!("unknown intrinsic: {name}");
            }
            let combined = store.combined_features(&name);
            println!("{}", combined.to_tag_string());
            for flag in CpuFeatureSet::all_flags() {
                if combined.contains(flag) {
                    match flag.doc() {
                        "" => println!("  {}", flag.tag()),
                        doc => println!("  {}: {doc}", flag.tag()),
                    }
                }
            }
        }
    }
    Ok(())
}

/// Open the data source: explicit path first, then the configured cache,
/// then the configured guide document. `.xml` files go through the cache
/// importer, everything else through the guide parser.
fn load_store(config: &SimdguideConfig, data: Option<&Path>) -> Result<IntrinsicStore> {
    let path = data
        .or(config.data.cache.as_deref())
        .or(config.data.guide.as_deref())
        .context("no data file given (pass --data or set one in simdguide.toml)")?;
    let store = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("xml")) {
        IntrinsicStore::load_cache(path)
            .with_context(|| format!("failed to load cache {}", path.display()))?
    } else {
        IntrinsicStore::load_guide(path)
            .with_context(|| format!("failed to ingest {}", path.display()))?
    };
    Ok(store)
}
