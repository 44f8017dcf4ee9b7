use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::Achievement;
use crate::store::Store;

/// Re-evaluates the achievement record for the month containing
/// `today`. Only the current month is ever touched; past months are
/// never backfilled. No-op without a configured budget.
pub(crate) fn record_current_month(store: &mut Store, today: NaiveDate) -> Result<()> {
    let budget = store.settings().monthly_budget;
    if budget <= Decimal::ZERO {
        return Ok(());
    }

    let year_month = format!("{:04}-{:02}", today.year(), today.month());
    let total: Decimal = store
        .transactions()
        .iter()
        .filter(|t| t.date.year() == today.year() && t.date.month() == today.month())
        .map(|t| t.amount)
        .sum();

    // Skip the rewrite when nothing changed since the last evaluation.
    let existing = store
        .achievements()
        .iter()
        .find(|a| a.year_month == year_month);
    if let Some(a) = existing {
        if a.total_expense == total && a.budget == budget {
            return Ok(());
        }
    }

    store.upsert_achievement(Achievement::evaluate(year_month, total, budget))
}

/// Consecutive achieved months counting back from the most recent
/// record; stops at the first miss.
pub(crate) fn streak(achievements: &[Achievement]) -> usize {
    let mut sorted: Vec<&Achievement> = achievements.iter().collect();
    sorted.sort_by(|a, b| b.year_month.cmp(&a.year_month));
    sorted.iter().take_while(|a| a.achieved).count()
}

/// The `n` most recent records, newest first.
pub(crate) fn recent(achievements: &[Achievement], n: usize) -> Vec<&Achievement> {
    let mut sorted: Vec<&Achievement> = achievements.iter().collect();
    sorted.sort_by(|a, b| b.year_month.cmp(&a.year_month));
    sorted.truncate(n);
    sorted
}
