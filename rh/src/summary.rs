//! Upstream producer result records
//!
//! Read-only inputs written by the package-import and catalog-staging steps.
//! Producers emit either the bare record or an envelope carrying it under a
//! `data` key; both are accepted. Every field except `name` may be missing
//! and defaults to empty.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Result record of the package import step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportResult {
    /// Imported item name
    pub name: String,
    /// Imported version
    pub version: String,
    /// Catalogs the item landed in
    pub catalogs: Vec<String>,
    /// Repo path of the written pkginfo
    pub pkginfo_path: String,
    /// Repo path of the imported package
    pub pkg_path: String,
    /// Repo path of the item icon, if one was imported
    pub icon_path: Option<String>,
}

/// Result record of the catalog staging step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingResult {
    /// Staged item name
    pub name: String,
    /// Versions moved by this staging run
    pub versions: Vec<String>,
    /// Catalog the versions were staged from
    pub staging_catalog: String,
    /// Catalog the versions were promoted to
    pub production_catalog: String,
}

impl ImportResult {
    /// Parse a producer result, bare or `data`-enveloped
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        parse_record(text)
    }
}

impl StagingResult {
    /// Parse a producer result, bare or `data`-enveloped
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        parse_record(text)
    }
}

fn parse_record<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let record = match value.get("data") {
        Some(data) => data.clone(),
        None => value,
    };
    serde_json::from_value(record)
}
