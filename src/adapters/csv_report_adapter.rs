//! CSV report adapter implementing ReportPort.

use std::io;
use std::path::Path;
use std::process::Command;

use log::{info, warn};

use crate::domain::dividend::DividendRecord;
use crate::domain::error::DividendExtractorError;
use crate::domain::report_format::{format_record, DateStyle, REPORT_HEADER};
use crate::ports::report_port::ReportPort;

pub const DEFAULT_OUTPUT: &str = "Dividends.csv";

/// Output path that sends the report to stdout.
pub const STDOUT: &str = "-";

#[derive(Debug, Clone, Default)]
pub struct CsvReportAdapter {
    date_style: DateStyle,
    open_after_write: bool,
}

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_style(mut self, date_style: DateStyle) -> Self {
        self.date_style = date_style;
        self
    }

    /// Launch the desktop's default application on the written file.
    pub fn open_after_write(mut self, open: bool) -> Self {
        self.open_after_write = open;
        self
    }

    fn write_records<W: io::Write>(
        &self,
        writer: W,
        records: &[DividendRecord],
    ) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(REPORT_HEADER)?;
        for record in records {
            wtr.write_record(format_record(record, self.date_style))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, records: &[DividendRecord], output_path: &str) -> Result<(), DividendExtractorError> {
        let report_error = |e: csv::Error| DividendExtractorError::Report {
            reason: format!("failed to write {}: {}", output_path, e),
        };

        if output_path == STDOUT {
            return self
                .write_records(io::stdout().lock(), records)
                .map_err(report_error);
        }

        let file = std::fs::File::create(output_path).map_err(|e| DividendExtractorError::Report {
            reason: format!("failed to create {}: {}", output_path, e),
        })?;
        self.write_records(file, records).map_err(report_error)?;
        info!("Report written to {}", output_path);

        if self.open_after_write {
            if let Err(e) = open_file(Path::new(output_path)) {
                warn!("Unable to open {}: {}", output_path, e);
            }
        }
        Ok(())
    }
}

fn open_file(path: &Path) -> io::Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    command.arg(path).spawn()?;
    Ok(())
}
