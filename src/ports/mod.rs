//! Port traits for the collaborators around the extraction pipeline.

pub mod config_port;
pub mod dividend_port;
pub mod portfolio_port;
pub mod report_port;
