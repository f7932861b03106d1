mod attention;
mod dv;
mod indicators;
mod input;
mod momentum;

use finx_core::{Envelope, EnvelopeMeta};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::config::ScanConfig;
use crate::error::CliError;

pub const SCHEMA_VERSION: &str = "v1.0.0";

#[derive(Debug)]
pub struct CommandResult {
    pub component: &'static str,
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(component: &'static str, data: Value) -> Self {
        Self {
            component,
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub fn run(cli: &Cli, config: &ScanConfig) -> Result<Envelope<Value>, CliError> {
    let result = execute(&cli.command, config)?;

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), SCHEMA_VERSION, result.component)?;
    for warning in result.warnings {
        meta.push_warning(warning);
    }

    Envelope::new(meta, result.data).map_err(CliError::from)
}

fn execute(command: &Command, config: &ScanConfig) -> Result<CommandResult, CliError> {
    match command {
        Command::Indicators(args) => indicators::run(args, config),
        Command::Dv(args) => dv::run(args, config),
        Command::Momentum(args) => momentum::run(args, config),
        Command::Attention(args) => attention::run(args, config),
    }
}

/// Warning for symbols a scorer skipped for lack of history.
fn skipped_warning(skipped: usize, total: usize, what: &str) -> Option<String> {
    (skipped > 0).then(|| format!("{skipped} of {total} symbols lacked history for {what}"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::{Path, PathBuf};

    use finx_core::TradeDate;
    use serde_json::{json, Value};

    /// `count` daily bars starting 2024-01-01 with the given close/volume
    /// generators.
    pub fn series_json(
        symbol: &str,
        count: usize,
        close: impl Fn(usize) -> f64,
        volume: impl Fn(usize) -> f64,
    ) -> Value {
        let start = TradeDate::parse("2024-01-01").expect("date");
        let bars: Vec<Value> = (0..count)
            .map(|i| {
                let c = close(i);
                json!({
                    "date": start.add_days(i as i64).to_string(),
                    "open": c, "high": c, "low": c, "close": c,
                    "volume": volume(i),
                })
            })
            .collect();
        json!({ "symbol": symbol, "bars": bars })
    }

    pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_vec(value).expect("encode")).expect("write input");
        path
    }
}
