use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One pass/fail record per calendar month: did spending stay within
/// the budget that was in effect at the time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// Format: "YYYY-MM"
    pub year_month: String,
    pub achieved: bool,
    pub total_expense: Decimal,
    pub budget: Decimal,
}

impl Achievement {
    pub fn evaluate(year_month: String, total_expense: Decimal, budget: Decimal) -> Self {
        Self {
            achieved: total_expense <= budget,
            year_month,
            total_expense,
            budget,
        }
    }
}
