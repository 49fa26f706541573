//! CLI definition and dispatch.

use clap::{ArgAction, Args, Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::csv_dividend_adapter::CsvDividendAdapter;
use crate::adapters::csv_portfolio_adapter::{
    CsvPortfolioAdapter, DEFAULT_SHARES_COLUMN, DEFAULT_TICKER_COLUMN,
};
use crate::adapters::csv_report_adapter::{CsvReportAdapter, DEFAULT_OUTPUT};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::yahoo_adapter::{YahooDividendAdapter, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::domain::config_validation::{validate_config, SOURCE_CSV, SOURCE_YAHOO};
use crate::domain::error::DividendExtractorError;
use crate::domain::period::{build_period, Period};
use crate::domain::pipeline::{extract_dividends, ExtractionOptions, DEFAULT_MARKET_SUFFIX};
use crate::domain::report_format::DateStyle;
use crate::ports::config_port::ConfigPort;
use crate::ports::dividend_port::DividendPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_START: &str = "01/03/2025";
pub const DEFAULT_END: &str = "31/03/2025";
pub const DEFAULT_PORTFOLIO: &str = "portfolio.csv";

#[derive(Parser, Debug)]
#[command(
    name = "dividend-extractor",
    about = "Dividend income of a portfolio over a calendar period"
)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// First day of the period, DD/MM/YYYY
    #[arg(long)]
    pub start: Option<String>,
    /// Last day of the period, DD/MM/YYYY
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract the dividends paid to the portfolio and write the report
    Extract {
        #[command(flatten)]
        period: PeriodArgs,
        #[arg(short, long)]
        portfolio: Option<PathBuf>,
        /// Report path, or - for stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Open the report once written
        #[arg(long)]
        open: bool,
    },
    /// Validate the configuration and period without fetching anything
    Validate {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Show the dividends one ticker paid in the period
    Dividends {
        #[arg(long)]
        ticker: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
}

pub fn log_level(verbose: u8) -> log::Level {
    match verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Extract {
            period,
            portfolio,
            output,
            open,
        } => run_extract(&period, portfolio.as_ref(), output.as_deref(), open),
        Command::Validate { period } => run_validate(&period),
        Command::Dividends { ticker, period } => run_dividends(&ticker, &period),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, DividendExtractorError> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };

    info!("Loading config from {}", path.display());
    let config =
        FileConfigAdapter::from_file(path).map_err(|e| DividendExtractorError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Command line bounds win over `[period]`, which wins over the built-in March 2025 period.
pub fn resolve_period(
    args: &PeriodArgs,
    config: &dyn ConfigPort,
) -> Result<Period, DividendExtractorError> {
    let start = args
        .start
        .clone()
        .unwrap_or_else(|| config.get_string_or("period", "start", DEFAULT_START));
    let end = args
        .end
        .clone()
        .unwrap_or_else(|| config.get_string_or("period", "end", DEFAULT_END));

    build_period(&start, &end)
}

pub fn extraction_options(config: &dyn ConfigPort) -> ExtractionOptions {
    // An empty suffix is kept as-is.
    let market_suffix = config
        .get_string("dividends", "market_suffix")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| DEFAULT_MARKET_SUFFIX.to_string());
    ExtractionOptions { market_suffix }
}

pub fn build_portfolio_port(
    portfolio_override: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> CsvPortfolioAdapter {
    let path = portfolio_override
        .cloned()
        .unwrap_or_else(|| PathBuf::from(config.get_string_or("portfolio", "path", DEFAULT_PORTFOLIO)));

    CsvPortfolioAdapter::new(path).with_columns(
        &config.get_string_or("portfolio", "ticker_column", DEFAULT_TICKER_COLUMN),
        &config.get_string_or("portfolio", "shares_column", DEFAULT_SHARES_COLUMN),
    )
}

pub fn build_dividend_port(
    config: &dyn ConfigPort,
) -> Result<Box<dyn DividendPort>, DividendExtractorError> {
    let source = config
        .get_string_or("dividends", "source", SOURCE_YAHOO)
        .to_lowercase();

    match source.as_str() {
        SOURCE_CSV => {
            let path = config.get_string("dividends", "path").ok_or_else(|| {
                DividendExtractorError::ConfigMissing {
                    section: "dividends".into(),
                    key: "path".into(),
                }
            })?;
            info!("Reading dividend histories from {}", path);
            Ok(Box::new(CsvDividendAdapter::new(PathBuf::from(path.trim()))))
        }
        SOURCE_YAHOO => {
            let base_url = config.get_string_or("dividends", "base_url", DEFAULT_BASE_URL);
            let timeout = config.get_int("dividends", "timeout_secs", DEFAULT_TIMEOUT_SECS as i64);
            let timeout = Duration::from_secs(timeout.max(1) as u64);
            Ok(Box::new(YahooDividendAdapter::new(&base_url, timeout)?))
        }
        other => Err(DividendExtractorError::ConfigInvalid {
            section: "dividends".into(),
            key: "source".into(),
            reason: format!("unknown source {other:?}"),
        }),
    }
}

/// `[report] date_style`, defaulting to `DD/MM/YYYY`.
pub fn date_style(config: &dyn ConfigPort) -> DateStyle {
    config
        .get_string("report", "date_style")
        .and_then(|name| DateStyle::from_name(&name))
        .unwrap_or_default()
}

fn run_extract(
    period_args: &PeriodArgs,
    portfolio_override: Option<&PathBuf>,
    output_override: Option<&str>,
    open_override: bool,
) -> Result<(), DividendExtractorError> {
    // Stage 1: config and period. Nothing external is touched until both are valid.
    let config = load_config(period_args.config.as_ref())?;
    let period = resolve_period(period_args, &config)?;
    info!("Period: {}", period);

    // Stage 2: collaborators
    let portfolio = build_portfolio_port(portfolio_override, &config);
    let dividends = build_dividend_port(&config)?;
    let options = extraction_options(&config);

    // Stage 3: extraction
    let extraction = extract_dividends(&portfolio, dividends.as_ref(), &period, &options)?;
    info!(
        "Total dividend income: {:.2} from {} holdings",
        extraction.total_income(),
        extraction.records.len()
    );

    // Stage 4: report
    let output = output_override
        .map(str::to_string)
        .unwrap_or_else(|| config.get_string_or("report", "output", DEFAULT_OUTPUT));
    let open = open_override || config.get_bool("report", "open", false);

    CsvReportAdapter::new()
        .with_date_style(date_style(&config))
        .open_after_write(open)
        .write(&extraction.records, &output)
}

fn run_validate(period_args: &PeriodArgs) -> Result<(), DividendExtractorError> {
    let config = load_config(period_args.config.as_ref())?;
    let period = resolve_period(period_args, &config)?;
    let options = extraction_options(&config);

    println!("Period:        {}", period);
    println!(
        "Source:        {}",
        config.get_string_or("dividends", "source", SOURCE_YAHOO)
    );
    println!("Market suffix: {:?}", options.market_suffix);
    info!("Configuration is valid");
    Ok(())
}

fn run_dividends(ticker: &str, period_args: &PeriodArgs) -> Result<(), DividendExtractorError> {
    let config = load_config(period_args.config.as_ref())?;
    let period = resolve_period(period_args, &config)?;
    let options = extraction_options(&config);
    let dividends = build_dividend_port(&config)?;

    let qualified = options.qualify(&ticker.trim().to_uppercase());
    let Some(series) = dividends.fetch_dividends(&qualified)? else {
        println!("{}: no dividend history", qualified);
        return Ok(());
    };

    let mut total = 0.0;
    let mut paid = 0;
    for (date, amount) in series.iter().filter(|(date, _)| period.contains(date)) {
        println!("{}  {}", date, amount);
        total += amount;
        paid += 1;
    }

    if paid == 0 {
        println!("{}: no dividends paid in {}", qualified, period);
    } else {
        println!("{}: {} per share over {} payments", qualified, total, paid);
    }
    Ok(())
}
