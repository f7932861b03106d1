use finx_indicators::{run_all, scan_sustained, summarize};

use super::input::read_series;
use super::{skipped_warning, CommandResult};
use crate::cli::IndicatorsArgs;
use crate::config::ScanConfig;
use crate::error::CliError;

pub fn run(args: &IndicatorsArgs, config: &ScanConfig) -> Result<CommandResult, CliError> {
    let universe = read_series(&args.input)?;
    let indicator_config = config.indicators();

    if args.sustained {
        let hits = scan_sustained(&universe, &indicator_config);
        return Ok(CommandResult::ok("rvol_sustained", serde_json::to_value(hits)?));
    }

    let reports = run_all(&universe, &indicator_config);
    let insufficient = reports.values().filter(|r| r.is_insufficient()).count();
    let warning = skipped_warning(insufficient, universe.len(), "any indicator");

    let mut result = if args.summary {
        CommandResult::ok("indicator_summary", serde_json::to_value(summarize(reports.values()))?)
    } else {
        let reports: Vec<_> = reports.into_values().collect();
        CommandResult::ok("indicators", serde_json::to_value(reports)?)
    };
    if let Some(warning) = warning {
        result = result.with_warning(warning);
    }
    Ok(result)
}
