//! Parameter files
//!
//! Parameters load from TOML or JSON. Every field has a default, so a file
//! only needs the values that differ from the built-in scenario.

use std::fs;
use std::path::Path;

use crate::error::{Result, WarehouseError};
use crate::params::{ParamKey, WarehouseParameters};

pub fn from_toml_str(contents: &str) -> Result<WarehouseParameters> {
    Ok(toml::from_str(contents)?)
}

pub fn from_json_str(contents: &str) -> Result<WarehouseParameters> {
    Ok(serde_json::from_str(contents)?)
}

/// Load parameters, picking the format from the file extension (TOML by default)
pub fn load_parameters(path: &Path) -> Result<WarehouseParameters> {
    let contents = fs::read_to_string(path)?;
    let params = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => from_json_str(&contents)?,
        _ => from_toml_str(&contents)?,
    };
    log::debug!("Loaded parameters from {}", path.display());
    Ok(params)
}

/// Parse a `key=value` override
pub fn parse_override(arg: &str) -> Result<(ParamKey, f64)> {
    let (key, value) = arg.split_once('=').ok_or_else(|| {
        WarehouseError::ConfigError(format!("expected key=value, got '{}'", arg))
    })?;
    let key: ParamKey = key.parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| WarehouseError::InvalidParameter {
            field: key.to_string(),
            reason: format!("'{}' is not a number", value.trim()),
        })?;
    Ok((key, value))
}

/// Apply overrides in order, returning a new snapshot
pub fn apply_overrides(
    params: &WarehouseParameters,
    overrides: &[(ParamKey, f64)],
) -> WarehouseParameters {
    overrides
        .iter()
        .fold(params.clone(), |acc, (key, value)| acc.with_param(*key, *value))
}
