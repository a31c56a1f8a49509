//! Catalog Builder CLI
//!
//! JSON/CSV player catalogs → MessagePack+LZ4 cache for fc_core.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "catalog_builder")]
#[command(about = "Build player catalog caches from JSON or CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build cache from a catalog JSON document
    Json {
        /// Input JSON file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Build cache from a players CSV plus a teams JSON file
    Players {
        /// Input CSV file path (name,team,type,price[,image])
        #[arg(long)]
        csv: PathBuf,

        /// Teams JSON file path
        #[arg(long)]
        teams: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Check an existing cache against its metadata sidecar
    Verify {
        /// Cache file path
        #[arg(long)]
        cache: PathBuf,

        /// Metadata JSON file path
        #[arg(long)]
        metadata: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Json { r#in, out, verify, metadata } => {
            let meta = catalog_builder::build_catalog_from_json(
                &r#in,
                &out,
                metadata.as_deref(),
                verify,
            )?;
            println!(
                "built {} ({} -> {} bytes, ratio {:.3})",
                out.display(),
                meta.original_size,
                meta.compressed_size,
                meta.compression_ratio
            );
        }
        Commands::Players { csv, teams, out, verify, metadata } => {
            let (meta, stats) = catalog_builder::build_catalog_from_csv(
                &csv,
                &teams,
                &out,
                metadata.as_deref(),
                verify,
            )?;
            println!(
                "built {} from {} CSV rows ({} players, checksum {})",
                out.display(),
                stats.rows_read,
                stats.players_built,
                meta.checksum
            );
        }
        Commands::Verify { cache, metadata } => {
            let meta = catalog_builder::load_metadata(&metadata)?;
            let doc = fc_core::data::load_catalog_file(&cache, Some(&meta.checksum))?;
            println!(
                "cache OK: {} teams, {} players, schema {}",
                doc.teams.len(),
                doc.players.len(),
                doc.schema_version
            );
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("catalog_builder was built without the 'cli' feature");
}
