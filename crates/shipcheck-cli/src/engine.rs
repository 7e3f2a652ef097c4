//! # Engine Loading
//!
//! File access for the diagnostics engine. The library crates never touch
//! the filesystem; everything they need is read here and handed over as
//! strings or values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use shipcheck_classify::{CodeTables, PortClassifier};
use shipcheck_core::ShipmentState;
use shipcheck_rules::{builtin_catalog, RuleCatalog, RuleConfig};

/// Options shared by every subcommand that builds the rule catalog.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Replacement code tables (YAML). Defaults to the built-in tables.
    #[arg(long, value_name = "YAML")]
    pub tables: Option<PathBuf>,

    /// Rule threshold overrides (YAML). Unset keys keep their defaults.
    #[arg(long, value_name = "YAML")]
    pub config: Option<PathBuf>,
}

impl EngineArgs {
    /// Build the catalog from the configured tables and thresholds.
    pub fn catalog(&self) -> Result<RuleCatalog> {
        let classifier = PortClassifier::new(load_tables(self.tables.as_deref())?);
        let config = load_config(self.config.as_deref())?;
        let catalog = builtin_catalog(classifier, config).context("built-in rule catalog failed integrity checks")?;
        tracing::debug!(rules = catalog.len(), fingerprint = catalog.fingerprint(), "catalog ready");
        Ok(catalog)
    }
}

/// Code tables from `path`, or the built-in tables.
pub fn load_tables(path: Option<&Path>) -> Result<CodeTables> {
    match path {
        None => CodeTables::builtin().context("built-in code tables are malformed"),
        Some(path) => {
            let yaml = read(path)?;
            let tables = CodeTables::from_yaml_str(&yaml)
                .with_context(|| format!("invalid code tables in {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                airports = tables.airports.len(),
                seaports = tables.seaports.len(),
                countries = tables.countries.len(),
                "loaded code tables"
            );
            Ok(tables)
        }
    }
}

/// Rule thresholds from `path`, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<RuleConfig> {
    match path {
        None => Ok(RuleConfig::default()),
        Some(path) => {
            let yaml = read(path)?;
            let config = RuleConfig::from_yaml_str(&yaml)
                .with_context(|| format!("invalid rule config in {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded rule config");
            Ok(config)
        }
    }
}

/// Parse a shipment snapshot from a JSON file.
pub fn load_state(path: &Path) -> Result<ShipmentState> {
    let json = read(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&json).with_context(|| format!("{} is not valid JSON", path.display()))?;
    ShipmentState::from_value(value).with_context(|| format!("{} is not a shipment snapshot", path.display()))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
