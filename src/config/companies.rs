use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ats::{AtsConfig, AtsEndpoints};
use crate::config::ConfigError;
use crate::extractor::location::DEFAULT_ALLOWED_LOCATIONS;

const DEFAULT_INCLUDE: &[&str] = &[
    "engineer",
    "scientist",
    "developer",
    "analyst",
    "manager",
    "intern",
];
const DEFAULT_EXCLUDE: &[&str] = &["marketing", "sales", "finance"];

/// Contents of the companies file.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    /// Countries a guessed posting location must belong to.
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
    #[serde(default)]
    pub ats_endpoints: AtsEndpoints,
    #[serde(default)]
    pub companies: Vec<CompanyConfig>,
}

/// One company entry. Name and URL are optional here so a half-filled entry
/// is reported as skipped at scan time instead of failing the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub careers_url: Option<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    /// Replaces the global include list for this company when present.
    #[serde(default)]
    pub include: Option<Vec<String>>,
    /// Replaces the global exclude list for this company when present.
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub ats: Option<AtsConfig>,
}

impl ScanConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_include() -> Vec<String> {
    to_owned_list(DEFAULT_INCLUDE)
}

fn default_exclude() -> Vec<String> {
    to_owned_list(DEFAULT_EXCLUDE)
}

fn default_locations() -> Vec<String> {
    to_owned_list(DEFAULT_ALLOWED_LOCATIONS)
}
