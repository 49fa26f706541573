//! Period aggregation and record ordering.

use crate::domain::dividend::{DividendRecord, DividendSeries};
use crate::domain::period::Period;

/// Income earned by `shares` units of `ticker` from the payments that fall inside `period`.
///
/// Returns `None` when no payment date lies in the period. The reported date is the earliest
/// in-period payment, even when several payments are summed. Amounts are used as given, zero and
/// negative values included.
pub fn aggregate(
    ticker: &str,
    series: &DividendSeries,
    period: &Period,
    shares: i64,
) -> Option<DividendRecord> {
    let mut in_period = series.iter().filter(|(date, _)| period.contains(date));

    let (first_date, first_amount) = in_period.next()?;
    let (date, per_unit) = in_period.fold(
        (*first_date, *first_amount),
        |(earliest, total), (date, amount)| (earliest.min(*date), total + amount),
    );

    Some(DividendRecord {
        date,
        ticker: ticker.to_string(),
        amount: per_unit * shares as f64,
        shares,
    })
}

/// Orders records by distribution date. Records sharing a date keep their input order.
pub fn sort_records(mut records: Vec<DividendRecord>) -> Vec<DividendRecord> {
    records.sort_by_key(|r| r.date);
    records
}
