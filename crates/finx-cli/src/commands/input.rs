use std::fs;
use std::path::Path;

use finx_core::SymbolSeries;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CliError;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_series(path: &Path) -> Result<Vec<SymbolSeries>, CliError> {
    let series: Vec<SymbolSeries> = read_json(path)?;
    debug!(path = %path.display(), symbols = series.len(), "series loaded");
    Ok(series)
}
