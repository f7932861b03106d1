use finx_indicators::run_dv_scan;

use super::input::read_series;
use super::{skipped_warning, CommandResult};
use crate::cli::DvArgs;
use crate::config::ScanConfig;
use crate::error::CliError;

pub fn run(args: &DvArgs, config: &ScanConfig) -> Result<CommandResult, CliError> {
    let universe = read_series(&args.input)?;
    let mut indicator_config = config.indicators();
    if let Some(threshold) = args.threshold {
        indicator_config.dv.threshold = threshold;
        indicator_config.dv.validate()?;
    }

    let mut results = run_dv_scan(&universe, &indicator_config);
    let skipped = universe.len() - results.len();
    let warning = skipped_warning(skipped, universe.len(), "dv acceleration");
    if args.signals_only {
        results.retain(|r| r.signal);
    }

    let mut result = CommandResult::ok("dv_acceleration", serde_json::to_value(results)?);
    if let Some(warning) = warning {
        result = result.with_warning(warning);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;
    use crate::commands::test_support::{series_json, write_json};

    #[test]
    fn surge_ranks_first_and_threshold_override_applies() {
        let temp = tempdir().expect("temp dir");
        let input = write_json(
            temp.path(),
            "bars.json",
            &json!([
                series_json("FLAT", 20, |_| 100.0, |_| 1_000_000.0),
                series_json("HOT", 20, |_| 100.0, |i| {
                    if i < 15 {
                        1_000_000.0
                    } else {
                        2_000_000.0
                    }
                }),
            ]),
        );

        let args = DvArgs {
            input,
            threshold: Some(1.55),
            signals_only: true,
        };
        let result = run(&args, &ScanConfig::default()).expect("run");
        let rows = result.data.as_array().expect("array");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["symbol"], "HOT");
        assert_eq!(rows[0]["signal"], true);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let temp = tempdir().expect("temp dir");
        let input = write_json(temp.path(), "bars.json", &json!([]));
        let args = DvArgs {
            input,
            threshold: Some(0.0),
            signals_only: false,
        };
        assert_eq!(run(&args, &ScanConfig::default()).expect_err("invalid").exit_code(), 2);
    }
}
