//! Report generation port trait.

use crate::domain::dividend::DividendRecord;
use crate::domain::error::DividendExtractorError;

/// Port for writing dividend reports.
pub trait ReportPort {
    /// Writes the header row followed by one row per record, in the given order.
    fn write(&self, records: &[DividendRecord], output_path: &str) -> Result<(), DividendExtractorError>;
}
