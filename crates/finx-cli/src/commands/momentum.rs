use finx_momentum::{rank_clenow, rank_risk_adjusted};

use super::input::read_series;
use super::{skipped_warning, CommandResult};
use crate::cli::{MomentumArgs, MomentumMethod};
use crate::config::ScanConfig;
use crate::error::CliError;

pub fn run(args: &MomentumArgs, config: &ScanConfig) -> Result<CommandResult, CliError> {
    let universe = read_series(&args.input)?;

    let (component, data, ranked) = match args.method {
        MomentumMethod::B => {
            let records = rank_risk_adjusted(&universe, &config.momentum);
            ("momentum_b", serde_json::to_value(&records)?, records.len())
        }
        MomentumMethod::C => {
            let records = rank_clenow(&universe, &config.momentum);
            ("momentum_c", serde_json::to_value(&records)?, records.len())
        }
    };

    let mut result = CommandResult::ok(component, data);
    if let Some(warning) = skipped_warning(universe.len() - ranked, universe.len(), "momentum") {
        result = result.with_warning(warning);
    }
    Ok(result)
}
