use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use super::FormulasConfig;
use crate::core::Result;

/// Read a config file fully into memory.
pub(crate) fn read_config_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML document and check the declared entries.
pub(crate) fn parse_and_validate_config(contents: &str) -> Result<FormulasConfig> {
    let config = toml::from_str::<FormulasConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

pub(crate) fn load_config_from_path(path: &Path) -> Result<FormulasConfig> {
    let contents = read_config_file(path)?;
    let config = parse_and_validate_config(&contents)?;
    tracing::debug!(
        path = %path.display(),
        metrics = config.metrics.len(),
        formulas = config.formulas.len(),
        "Loaded formulas config"
    );
    Ok(config)
}
