use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Decimal,
    #[serde(default)]
    pub memo: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, category: Category, amount: Decimal, memo: String) -> Self {
        Self {
            id: next_id(),
            date,
            category,
            amount,
            memo,
        }
    }

    /// Format: "YYYY-MM"
    pub fn year_month(&self) -> String {
        format!("{:04}-{:02}", self.date.year(), self.date.month())
    }
}

/// Creation-time id, kept as a string like the original tracker's
/// timestamp keys.
fn next_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
