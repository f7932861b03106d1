//! Command-line arguments for `finx`.
//!
//! # Commands
//!
//! | Command | Input | Output |
//! |---------|-------|--------|
//! | `indicators` | symbol series JSON | per-symbol PMARP / RVOL / DV report, or a summary |
//! | `dv` | symbol series JSON | dollar-volume acceleration, strongest first |
//! | `momentum` | symbol series JSON | Method B or C cross-sectional ranking |
//! | `attention` | weekly aggregates (or daily counts) JSON | composite attention ranking |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Fail when the run produced warnings |
//! | `--config` | `$FINX_HOME/finx.yaml` | YAML parameter file |
//! | `--workers` | from config | Worker threads for per-symbol scans |
//!
//! # Examples
//!
//! ```bash
//! finx indicators --input bars.json --summary --pretty
//! finx momentum --input bars.json --method c
//! finx attention --input weekly.json --keywords keywords.json --discoveries
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Signal scoring over price/volume series and attention counts.
#[derive(Debug, Parser)]
#[command(
    name = "finx",
    author,
    version,
    about = "Signal scoring over price/volume series and attention counts"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// YAML parameter file. Defaults to `finx.yaml` under `FINX_HOME`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Worker threads for per-symbol scans; overrides the config file.
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Key/value header followed by the indented data.
    Table,
    /// Single JSON object.
    Json,
    /// Metadata line, then one JSON object per record.
    Ndjson,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run PMARP, RVOL and dollar-volume acceleration per symbol.
    ///
    /// # Examples
    ///
    ///   finx indicators --input bars.json
    ///   finx indicators --input bars.json --summary
    ///   finx indicators --input bars.json --sustained
    Indicators(IndicatorsArgs),

    /// Rank symbols by 5-day over 20-day dollar volume.
    Dv(DvArgs),

    /// Cross-sectional momentum ranking (0-99).
    Momentum(MomentumArgs),

    /// Composite attention ranking for one week.
    Attention(AttentionArgs),
}

#[derive(Debug, Args)]
pub struct IndicatorsArgs {
    /// JSON array of `{symbol, bars: [{date, open, high, low, close, volume}]}`.
    #[arg(long)]
    pub input: PathBuf,

    /// Emit signal buckets and leaderboards instead of per-symbol reports.
    #[arg(long, default_value_t = false, conflicts_with = "sustained")]
    pub summary: bool,

    /// Emit only symbols in a run of elevated volume.
    #[arg(long, default_value_t = false)]
    pub sustained: bool,
}

#[derive(Debug, Args)]
pub struct DvArgs {
    #[arg(long)]
    pub input: PathBuf,

    /// Override the acceleration threshold.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Keep only symbols whose ratio exceeds the threshold.
    #[arg(long, default_value_t = false)]
    pub signals_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MomentumMethod {
    /// Risk-adjusted z-score.
    B,
    /// Exponential regression.
    C,
}

#[derive(Debug, Args)]
pub struct MomentumArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = MomentumMethod::B)]
    pub method: MomentumMethod,
}

#[derive(Debug, Args)]
pub struct AttentionArgs {
    /// JSON array of `{entity, source, period, value}` weekly aggregates.
    #[arg(long)]
    pub input: PathBuf,

    /// Treat the input as daily `{entity, source, date, value}` counts.
    #[arg(long, default_value_t = false)]
    pub daily: bool,

    /// JSON object mapping search keywords to entities.
    #[arg(long)]
    pub keywords: Option<PathBuf>,

    /// Monday of the week to score; defaults to the latest week in the input.
    #[arg(long)]
    pub period: Option<String>,

    /// Keep only the first N ranked entities; overrides the config file.
    #[arg(long)]
    pub top: Option<usize>,

    /// Also report entities ranked for the first time this week.
    #[arg(long, default_value_t = false)]
    pub discoveries: bool,

    /// Also report rank movement against the previous week.
    #[arg(long, default_value_t = false)]
    pub changes: bool,
}
