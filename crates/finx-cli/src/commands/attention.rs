use finx_attention::{
    aggregate_weekly, new_discoveries, rank_changes, score_all_periods, score_period,
    AttentionHistory, DailyObservation, KeywordMap, PeriodAggregate,
};
use finx_core::WeekKey;
use serde_json::json;

use super::input::read_json;
use super::CommandResult;
use crate::cli::AttentionArgs;
use crate::config::ScanConfig;
use crate::error::CliError;

pub fn run(args: &AttentionArgs, config: &ScanConfig) -> Result<CommandResult, CliError> {
    let aggregates: Vec<PeriodAggregate> = if args.daily {
        let daily: Vec<DailyObservation> = read_json(&args.input)?;
        aggregate_weekly(&daily)
    } else {
        read_json(&args.input)?
    };
    let keywords: KeywordMap = match &args.keywords {
        Some(path) => read_json(path)?,
        None => KeywordMap::new(),
    };

    let mut attention = config.attention.clone();
    if args.top.is_some() {
        attention.top_n = args.top;
        attention.validate()?;
    }

    let history = AttentionHistory::from_aggregates(&aggregates);
    let period = match &args.period {
        Some(value) => WeekKey::parse(value)?,
        None => match history.latest_period() {
            Some(period) => period,
            None => {
                return Ok(CommandResult::ok("attention", json!({ "ranking": [] }))
                    .with_warning("input holds no aggregates"));
            }
        },
    };

    let ranking = score_period(&history, &keywords, period, &attention);
    let mut data = json!({ "period": period, "ranking": &ranking });

    if args.discoveries {
        // discoveries compare complete rankings, not the truncated view
        let mut full = attention.clone();
        full.top_n = None;
        let snapshots: Vec<_> = score_all_periods(&history, &keywords, &full)
            .into_iter()
            .filter(|record| record.period_key <= period)
            .collect();
        data["discoveries"] = serde_json::to_value(new_discoveries(&snapshots, period))?;
    }

    if args.changes {
        let previous = score_period(&history, &keywords, period.previous(), &attention);
        data["changes"] = serde_json::to_value(rank_changes(&ranking, &previous))?;
    }

    let mut result = CommandResult::ok("attention", data);
    if ranking.is_empty() {
        result = result.with_warning(format!("no attention recorded for week {period}"));
    }
    Ok(result)
}
