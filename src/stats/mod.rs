use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::Transaction;
use crate::report::{category_breakdown, CategoryShare};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthBucket {
    /// 1 through 12.
    pub month: u32,
    pub amount: Decimal,
    pub count: usize,
}

/// Exactly twelve buckets for the selected year; months without data
/// stay at zero.
pub(crate) fn monthly_buckets(transactions: &[Transaction], year: i32) -> Vec<MonthBucket> {
    (1..=12)
        .map(|month| {
            let mut amount = Decimal::ZERO;
            let mut count = 0;
            for txn in transactions {
                if txn.date.year() == year && txn.date.month() == month {
                    amount += txn.amount;
                    count += 1;
                }
            }
            MonthBucket {
                month,
                amount,
                count,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct YearSummary {
    pub total: Decimal,
    pub monthly_average: Decimal,
    pub max_month: Option<MonthBucket>,
    pub min_month: Option<MonthBucket>,
}

/// The average divides by months with data, not twelve. Max/min
/// consider only nonzero months; ties go to the earliest month.
pub(crate) fn year_summary(buckets: &[MonthBucket]) -> YearSummary {
    let total: Decimal = buckets.iter().map(|b| b.amount).sum();
    let months_with_data = buckets.iter().filter(|b| b.amount > Decimal::ZERO).count();
    let monthly_average = if months_with_data > 0 {
        total / Decimal::from(months_with_data as u64)
    } else {
        Decimal::ZERO
    };

    let mut max_month: Option<&MonthBucket> = None;
    let mut min_month: Option<&MonthBucket> = None;
    for bucket in buckets.iter().filter(|b| b.amount > Decimal::ZERO) {
        if max_month.is_none_or(|m| bucket.amount > m.amount) {
            max_month = Some(bucket);
        }
        if min_month.is_none_or(|m| bucket.amount < m.amount) {
            min_month = Some(bucket);
        }
    }

    YearSummary {
        total,
        monthly_average,
        max_month: max_month.cloned(),
        min_month: min_month.cloned(),
    }
}

/// Years that have at least one record, newest first.
pub(crate) fn available_years(transactions: &[Transaction]) -> Vec<i32> {
    let mut years: Vec<i32> = transactions.iter().map(|t| t.date.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Drill-down list for one month, newest first.
pub(crate) fn month_transactions<'a>(
    transactions: &'a [Transaction],
    year: i32,
    month: u32,
) -> Vec<&'a Transaction> {
    let mut out: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// Category breakdown scoped to a single month of the history.
pub(crate) fn month_breakdown(
    transactions: &[Transaction],
    year: i32,
    month: u32,
) -> Vec<CategoryShare> {
    category_breakdown(&month_transactions(transactions, year, month))
}
