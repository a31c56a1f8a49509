//! Player catalog loading.
//!
//! The catalog ships as a binary cache built by the `catalog_builder`
//! tool: MessagePack, LZ4-compressed, with a SHA-256 checksum and a
//! JSON metadata sidecar. This module owns the document format, the
//! encode/decode pipeline and installation into a store; the builder
//! crate reuses it from the other side.

pub mod seed;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;

use crate::models::{Player, Team};
use crate::store::Repository;

/// Catalog document schema version.
pub const CATALOG_SCHEMA_VERSION: &str = "v1";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },

    #[error("Schema version mismatch: found {found}, expected {expected}")]
    SchemaVersion { found: String, expected: String },
}

/// The whole reference data set: franchises plus the player market.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogDoc {
    pub schema_version: String,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
}

impl CatalogDoc {
    pub fn new(teams: Vec<Team>, players: Vec<Player>) -> Self {
        Self { schema_version: CATALOG_SCHEMA_VERSION.to_string(), teams, players }
    }
}

/// Sidecar written next to the cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub schema_version: String,
    /// SHA-256 of the compressed cache bytes, hex.
    pub checksum: String,
    /// RFC3339 creation time.
    pub created_at: String,
    pub original_size: u64,
    pub compressed_size: u64,
    pub compression_ratio: f64,
}

/// MessagePack-encode and LZ4-compress a catalog document.
pub fn encode_catalog(doc: &CatalogDoc) -> Result<Vec<u8>, CatalogError> {
    let packed = rmp_serde::to_vec_named(doc)?;
    Ok(lz4_flex::compress_prepend_size(&packed))
}

/// Inverse of [`encode_catalog`], with schema version check.
pub fn decode_catalog(bytes: &[u8]) -> Result<CatalogDoc, CatalogError> {
    let packed = lz4_flex::decompress_size_prepended(bytes)
        .map_err(|_| CatalogError::Decompression)?;
    let doc: CatalogDoc = rmp_serde::from_slice(&packed)?;
    if doc.schema_version != CATALOG_SCHEMA_VERSION {
        return Err(CatalogError::SchemaVersion {
            found: doc.schema_version,
            expected: CATALOG_SCHEMA_VERSION.to_string(),
        });
    }
    Ok(doc)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Load a catalog cache from disk. When `expected_checksum` is given
/// (normally read from the metadata sidecar) the compressed bytes are
/// verified before decoding.
pub fn load_catalog_file(
    path: &Path,
    expected_checksum: Option<&str>,
) -> Result<CatalogDoc, CatalogError> {
    let bytes = std::fs::read(path)?;
    if let Some(expected) = expected_checksum {
        let found = sha256_hex(&bytes);
        if found != expected {
            return Err(CatalogError::ChecksumMismatch {
                expected: expected.to_string(),
                found,
            });
        }
    }
    let doc = decode_catalog(&bytes)?;
    log::info!(
        "loaded catalog cache: {} teams, {} players",
        doc.teams.len(),
        doc.players.len()
    );
    Ok(doc)
}

/// Install a catalog document into a store. Ids are reassigned by the
/// store's own counters; catalog order is preserved.
pub fn install_catalog(store: &mut impl Repository, doc: CatalogDoc) {
    for team in doc.teams {
        store.create_team(team);
    }
    for player in doc.players {
        store.create_player(player);
    }
}
