//! CLI integration tests for config resolution and the extract command.
//!
//! Tests cover:
//! - Period resolution (flags over config over built-in defaults)
//! - Config loading and validation with real INI files on disk
//! - Market suffix and portfolio column settings
//! - Full extract command against CSV portfolio and dividend files

mod common;

use clap::Parser;
use common::*;
use dividend_extractor::adapters::file_config_adapter::FileConfigAdapter;
use dividend_extractor::cli::{self, Cli, PeriodArgs};
use dividend_extractor::domain::error::{DateError, DividendExtractorError};
use dividend_extractor::ports::portfolio_port::PortfolioPort;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn assert_exit(actual: ExitCode, expected: ExitCode) {
    assert_eq!(format!("{actual:?}"), format!("{expected:?}"));
}

fn period_args(start: Option<&str>, end: Option<&str>) -> PeriodArgs {
    PeriodArgs {
        config: None,
        start: start.map(str::to_string),
        end: end.map(str::to_string),
    }
}

mod period_resolution {
    use super::*;

    #[test]
    fn defaults_to_march_2025() {
        let period =
            cli::resolve_period(&period_args(None, None), &FileConfigAdapter::empty()).unwrap();
        assert_eq!(period.start(), date(2025, 3, 1));
        assert_eq!(period.end(), date(2025, 3, 31));
    }

    #[test]
    fn config_period_is_used() {
        let config =
            FileConfigAdapter::from_string("[period]\nstart = 01/02/2024\nend = 29/02/2024\n")
                .unwrap();
        let period = cli::resolve_period(&period_args(None, None), &config).unwrap();
        assert_eq!(period.start(), date(2024, 2, 1));
        assert_eq!(period.end(), date(2024, 2, 29));
    }

    #[test]
    fn flags_override_config() {
        let config =
            FileConfigAdapter::from_string("[period]\nstart = 01/02/2024\nend = 29/02/2024\n")
                .unwrap();
        let period =
            cli::resolve_period(&period_args(Some("15/02/2024"), None), &config).unwrap();
        assert_eq!(period.start(), date(2024, 2, 15));
        assert_eq!(period.end(), date(2024, 2, 29));
    }

    #[test]
    fn invalid_flag_is_fatal() {
        let err = cli::resolve_period(
            &period_args(Some("29/02/2023"), None),
            &FileConfigAdapter::empty(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DividendExtractorError::Date(DateError::InvalidDay { day: 29, month: 2, days_in_month: 28 })
        ));
    }
}

mod config_loading {
    use super::*;

    #[test]
    fn no_config_file_is_empty_config() {
        let config = cli::load_config(None).unwrap();
        assert_eq!(cli::extraction_options(&config).market_suffix, ".SA");
    }

    #[test]
    fn missing_config_file_is_parse_error() {
        let err = cli::load_config(Some(&PathBuf::from("/nonexistent/dividends.ini"))).unwrap_err();
        assert!(matches!(err, DividendExtractorError::ConfigParse { .. }));
        assert_exit(ExitCode::from(&err), ExitCode::from(2));
    }

    #[test]
    fn invalid_config_is_rejected_on_load() {
        let file = write_temp_ini("[dividends]\nsource = csv\n");
        let err = cli::load_config(Some(&file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, DividendExtractorError::ConfigMissing { .. }));
    }

    #[test]
    fn market_suffix_from_config() {
        let config = FileConfigAdapter::from_string("[dividends]\nmarket_suffix = .SA \n").unwrap();
        assert_eq!(cli::extraction_options(&config).market_suffix, ".SA");

        let config = FileConfigAdapter::from_string("[dividends]\nmarket_suffix = .L\n").unwrap();
        assert_eq!(cli::extraction_options(&config).market_suffix, ".L");
    }

    #[test]
    fn unknown_source_cannot_build_port() {
        let config = FileConfigAdapter::from_string("[dividends]\nsource = ftp\n").unwrap();
        assert!(matches!(
            cli::build_dividend_port(&config),
            Err(DividendExtractorError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn portfolio_columns_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("carteira.csv");
        fs::write(&path, "Ativo,Cotas\nMXRF11,12\n").unwrap();

        let config = FileConfigAdapter::from_string(&format!(
            "[portfolio]\npath = {}\nticker_column = Ativo\nshares_column = Cotas\n",
            path.display()
        ))
        .unwrap();

        let holdings = cli::build_portfolio_port(None, &config)
            .load_holdings()
            .unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].shares, 12);
    }
}

mod extract_command {
    use super::*;

    struct Workspace {
        _dir: tempfile::TempDir,
        config: PathBuf,
        output: PathBuf,
    }

    fn workspace(period: &str) -> Workspace {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path();

        fs::write(
            root.join("portfolio.csv"),
            "Ticker,Shares\n\
             MXRF11,10\n\
             HGLG11,2\n\
             VAZIO11,0\n\
             XPTO11,5\n",
        )
        .unwrap();

        let dividends = root.join("dividends");
        fs::create_dir(&dividends).unwrap();
        fs::write(
            dividends.join("MXRF11.SA.csv"),
            "date,dividend\n2025-03-14,0.1\n2025-04-14,0.1\n",
        )
        .unwrap();
        fs::write(
            dividends.join("HGLG11.SA.csv"),
            "date,dividend\n2025-03-07 00:00:00-03:00,1.1\n",
        )
        .unwrap();

        let output = root.join("Dividends.csv");
        let config = root.join("dividends.ini");
        fs::write(
            &config,
            format!(
                "{period}\n\
                 [portfolio]\npath = {}\n\n\
                 [dividends]\nsource = csv\npath = {}\n\n\
                 [report]\noutput = {}\n",
                root.join("portfolio.csv").display(),
                dividends.display(),
                output.display()
            ),
        )
        .unwrap();

        Workspace {
            _dir: dir,
            config,
            output,
        }
    }

    fn run(args: &[&str]) -> ExitCode {
        cli::run(Cli::try_parse_from(args).unwrap())
    }

    fn path_str(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn writes_sorted_report() {
        let ws = workspace("[period]\nstart = 01/03/2025\nend = 31/03/2025\n");

        let code = run(&["dividend-extractor", "extract", "-c", path_str(&ws.config)]);
        assert_exit(code, ExitCode::SUCCESS);

        let content = fs::read_to_string(&ws.output).unwrap();
        assert_eq!(
            content,
            "Date,Ticker,Dividend,Shares\n\
             07/03/2025,HGLG11,2.2,2\n\
             14/03/2025,MXRF11,1,10\n"
        );
    }

    #[test]
    fn period_flags_narrow_the_report() {
        let ws = workspace("");

        let code = run(&[
            "dividend-extractor",
            "extract",
            "-c",
            path_str(&ws.config),
            "--start",
            "10/03/2025",
            "--end",
            "31/03/2025",
        ]);
        assert_exit(code, ExitCode::SUCCESS);

        let content = fs::read_to_string(&ws.output).unwrap();
        assert_eq!(
            content,
            "Date,Ticker,Dividend,Shares\n14/03/2025,MXRF11,1,10\n"
        );
    }

    #[test]
    fn output_flag_overrides_config() {
        let ws = workspace("");
        let other = ws.output.with_file_name("other.csv");

        let code = run(&[
            "dividend-extractor",
            "extract",
            "-c",
            path_str(&ws.config),
            "-o",
            path_str(&other),
        ]);
        assert_exit(code, ExitCode::SUCCESS);
        assert!(other.exists());
        assert!(!ws.output.exists());
    }

    #[test]
    fn invalid_period_stops_before_writing() {
        let ws = workspace("");

        let code = run(&[
            "dividend-extractor",
            "extract",
            "-c",
            path_str(&ws.config),
            "--start",
            "15/13/2025",
        ]);
        assert_exit(code, ExitCode::from(3));
        assert!(!ws.output.exists());
    }

    #[test]
    fn reversed_period_is_rejected() {
        let ws = workspace("");

        let code = run(&[
            "dividend-extractor",
            "validate",
            "-c",
            path_str(&ws.config),
            "--start",
            "31/03/2025",
            "--end",
            "01/03/2025",
        ]);
        assert_exit(code, ExitCode::from(3));
    }

    #[test]
    fn period_flags_replace_invalid_config_period() {
        let ws = workspace("[period]\nstart = 31/04/2025\nend = 30/04/2025\n");

        let code = run(&[
            "dividend-extractor",
            "validate",
            "-c",
            path_str(&ws.config),
            "--start",
            "01/03/2025",
            "--end",
            "31/03/2025",
        ]);
        assert_exit(code, ExitCode::SUCCESS);
    }

    #[test]
    fn invalid_config_period_without_flags_is_a_date_error() {
        let ws = workspace("[period]\nstart = 31/04/2025\nend = 30/04/2025\n");

        let code = run(&["dividend-extractor", "validate", "-c", path_str(&ws.config)]);
        assert_exit(code, ExitCode::from(3));
    }

    #[test]
    fn iso_date_style_from_config() {
        let ws = workspace("[period]\nstart = 01/03/2025\nend = 31/03/2025\n");
        let mut ini = fs::read_to_string(&ws.config).unwrap();
        ini.push_str("date_style = iso\n");
        fs::write(&ws.config, ini).unwrap();

        let code = run(&["dividend-extractor", "extract", "-c", path_str(&ws.config)]);
        assert_exit(code, ExitCode::SUCCESS);

        let content = fs::read_to_string(&ws.output).unwrap();
        assert_eq!(
            content,
            "Date,Ticker,Dividend,Shares\n\
             2025-03-07,HGLG11,2.2,2\n\
             2025-03-14,MXRF11,1,10\n"
        );
    }

    #[test]
    fn validate_succeeds_without_touching_data() {
        let ws = workspace("[period]\nstart = 01/03/2025\nend = 31/03/2025\n");
        fs::remove_file(ws.config.with_file_name("portfolio.csv")).unwrap();

        let code = run(&["dividend-extractor", "validate", "-c", path_str(&ws.config)]);
        assert_exit(code, ExitCode::SUCCESS);
    }

    #[test]
    fn missing_portfolio_fails_with_portfolio_code() {
        let ws = workspace("");
        fs::remove_file(ws.config.with_file_name("portfolio.csv")).unwrap();

        let code = run(&["dividend-extractor", "extract", "-c", path_str(&ws.config)]);
        assert_exit(code, ExitCode::from(4));
    }

    #[test]
    fn dividends_command_for_one_ticker() {
        let ws = workspace("");

        let code = run(&[
            "dividend-extractor",
            "dividends",
            "--ticker",
            "mxrf11",
            "-c",
            path_str(&ws.config),
        ]);
        assert_exit(code, ExitCode::SUCCESS);
    }
}
