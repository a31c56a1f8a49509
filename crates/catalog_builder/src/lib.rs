//! Catalog Builder Library
//!
//! Player catalog pipeline: JSON or CSV source → MessagePack → LZ4 →
//! SHA-256 checksum + JSON metadata sidecar. The produced cache is
//! what `fc_core::data::load_catalog_file` consumes.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use fc_core::data::{
    decode_catalog, encode_catalog, sha256_hex, CatalogDoc, CatalogMetadata,
    CATALOG_SCHEMA_VERSION,
};
use fc_core::models::{Player, PlayerRole, Team};

/// Row shape of a players CSV export.
#[derive(Debug, Deserialize)]
struct CsvPlayerRow {
    name: String,
    team: String,
    #[serde(rename = "type")]
    role: String,
    price: u32,
    #[serde(default)]
    image: Option<String>,
}

/// Counters from a CSV parse, reported by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParseStats {
    pub rows_read: usize,
    pub players_built: usize,
}

/// Build a catalog cache from a JSON catalog document.
///
/// The input is the JSON form of [`CatalogDoc`]; its `schema_version`
/// must match the builder's. Returns the metadata that was (optionally)
/// written alongside.
pub fn build_catalog_from_json(
    input: &Path,
    out: &Path,
    metadata_out: Option<&Path>,
    verify: bool,
) -> Result<CatalogMetadata> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("reading catalog JSON {}", input.display()))?;
    let doc: CatalogDoc =
        serde_json::from_str(&raw).context("parsing catalog JSON document")?;
    if doc.schema_version != CATALOG_SCHEMA_VERSION {
        bail!(
            "schema version mismatch: file has {}, builder expects {}",
            doc.schema_version,
            CATALOG_SCHEMA_VERSION
        );
    }
    write_cache(&doc, raw.len() as u64, out, metadata_out, verify)
}

/// Build a catalog cache from a players CSV plus a teams JSON file.
///
/// CSV columns: `name,team,type,price[,image]` with the wire role
/// names ("batsman", "wicket-keeper", ...). Unknown roles fail the
/// build rather than slipping past the cap tables.
pub fn build_catalog_from_csv(
    players_csv: &Path,
    teams_json: &Path,
    out: &Path,
    metadata_out: Option<&Path>,
    verify: bool,
) -> Result<(CatalogMetadata, ParseStats)> {
    let teams_raw = fs::read_to_string(teams_json)
        .with_context(|| format!("reading teams JSON {}", teams_json.display()))?;
    let teams: Vec<Team> = serde_json::from_str(&teams_raw).context("parsing teams JSON")?;

    let mut stats = ParseStats::default();
    let mut players = Vec::new();
    let mut reader = csv::Reader::from_path(players_csv)
        .with_context(|| format!("opening players CSV {}", players_csv.display()))?;
    for (idx, row) in reader.deserialize::<CsvPlayerRow>().enumerate() {
        let row = row.with_context(|| format!("CSV row {}", idx + 1))?;
        stats.rows_read += 1;
        let Some(role) = PlayerRole::from_name(&row.role) else {
            bail!("CSV row {}: unknown role {:?}", idx + 1, row.role);
        };
        players.push(Player {
            id: (idx + 1) as i64,
            name: row.name,
            team: row.team,
            role,
            price: row.price,
            image: row.image,
            stats: serde_json::Value::Null,
        });
        stats.players_built += 1;
    }

    let doc = CatalogDoc::new(teams, players);
    let original_size = (teams_raw.len() + fs::metadata(players_csv)?.len() as usize) as u64;
    let metadata = write_cache(&doc, original_size, out, metadata_out, verify)?;
    Ok((metadata, stats))
}

fn write_cache(
    doc: &CatalogDoc,
    original_size: u64,
    out: &Path,
    metadata_out: Option<&Path>,
    verify: bool,
) -> Result<CatalogMetadata> {
    let bytes = encode_catalog(doc).context("encoding catalog cache")?;
    fs::write(out, &bytes).with_context(|| format!("writing cache {}", out.display()))?;

    if verify {
        let reloaded = decode_catalog(&bytes).context("verifying cache")?;
        if reloaded.players.len() != doc.players.len()
            || reloaded.teams.len() != doc.teams.len()
        {
            bail!("verification failed: reloaded cache does not match source");
        }
    }

    let compressed_size = bytes.len() as u64;
    let metadata = CatalogMetadata {
        schema_version: doc.schema_version.clone(),
        checksum: sha256_hex(&bytes),
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio: if original_size > 0 {
            compressed_size as f64 / original_size as f64
        } else {
            0.0
        },
    };
    if let Some(path) = metadata_out {
        fs::write(path, serde_json::to_string_pretty(&metadata)?)
            .with_context(|| format!("writing metadata {}", path.display()))?;
    }
    Ok(metadata)
}

/// Read a metadata sidecar back.
pub fn load_metadata(path: &Path) -> Result<CatalogMetadata> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading metadata {}", path.display()))?;
    Ok(serde_json::from_str(&raw)?)
}
