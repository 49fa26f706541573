//! Concrete adapter implementations for ports.

pub mod csv_dividend_adapter;
pub mod csv_portfolio_adapter;
pub mod csv_report_adapter;
pub mod file_config_adapter;
pub mod yahoo_adapter;
