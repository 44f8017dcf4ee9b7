use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Category, Settings, Transaction};

/// Any single expense at or above this triggers the high-expense alert.
pub(crate) const HIGH_EXPENSE_THRESHOLD: i64 = 7000;

const WARNING_BUDGET_PERCENT: i64 = 80;
const TOP_CATEGORY_SHARE_PERCENT: i64 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewMode {
    Month,
    Week,
}

// ── Period filters ────────────────────────────────────────────

/// Month mode matches the calendar month of `now`. Week mode is a
/// rolling 7-day window over timestamps, with each date counted from
/// its midnight. The asymmetry is deliberate.
pub(crate) fn period_transactions<'a>(
    transactions: &'a [Transaction],
    now: NaiveDateTime,
    mode: ViewMode,
) -> Vec<&'a Transaction> {
    match mode {
        ViewMode::Month => {
            let (year, month) = (now.date().year(), now.date().month());
            transactions
                .iter()
                .filter(|t| t.date.year() == year && t.date.month() == month)
                .collect()
        }
        ViewMode::Week => {
            let cutoff = now - Duration::days(7);
            transactions
                .iter()
                .filter(|t| midnight(t.date) >= cutoff)
                .collect()
        }
    }
}

/// The immediately preceding period: last calendar month, or days
/// 8 through 14 ago for the rolling week window.
pub(crate) fn previous_period_transactions<'a>(
    transactions: &'a [Transaction],
    now: NaiveDateTime,
    mode: ViewMode,
) -> Vec<&'a Transaction> {
    match mode {
        ViewMode::Month => {
            let (year, month) = previous_month(now.date());
            transactions
                .iter()
                .filter(|t| t.date.year() == year && t.date.month() == month)
                .collect()
        }
        ViewMode::Week => {
            let upper = now - Duration::days(7);
            let lower = now - Duration::days(14);
            transactions
                .iter()
                .filter(|t| {
                    let ts = midnight(t.date);
                    ts >= lower && ts < upper
                })
                .collect()
        }
    }
}

pub(crate) fn total(transactions: &[&Transaction]) -> Decimal {
    transactions.iter().map(|t| t.amount).sum()
}

// ── Comparison ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Comparison {
    pub diff: Decimal,
    pub percent: Decimal,
}

/// Percent change against the previous period; 0 when there is no
/// baseline to compare against.
pub(crate) fn compare(current: Decimal, previous: Decimal) -> Comparison {
    let diff = current - previous;
    let percent = if previous > Decimal::ZERO {
        diff / previous * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    Comparison { diff, percent }
}

// ── Category breakdown ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryShare {
    pub category: Category,
    pub amount: Decimal,
    pub percent: Decimal,
    pub color: &'static str,
}

/// Per-category sums for a period, largest first. Ties keep first-seen
/// order; percentages are of the period total (0 when the total is 0).
pub(crate) fn category_breakdown(transactions: &[&Transaction]) -> Vec<CategoryShare> {
    let period_total = total(transactions);
    let mut shares: Vec<CategoryShare> = Vec::new();
    for txn in transactions {
        match shares.iter_mut().find(|s| s.category == txn.category) {
            Some(share) => share.amount += txn.amount,
            None => shares.push(CategoryShare {
                category: txn.category,
                amount: txn.amount,
                percent: Decimal::ZERO,
                color: txn.category.color(),
            }),
        }
    }
    for share in &mut shares {
        share.percent = if period_total > Decimal::ZERO {
            share.amount / period_total * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}

// ── Budget pacing ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Pacing {
    pub daily_budget: Decimal,
    pub expected_spend: Decimal,
    pub pace_diff: Decimal,
    pub remaining_budget: Decimal,
    pub remaining_days: u32,
    pub daily_allowance: Decimal,
}

/// Linear extrapolation of the monthly budget against actual spend so
/// far. All figures rounded to whole currency units for display.
pub(crate) fn pacing(
    budget: Decimal,
    days_in_month: u32,
    current_day: u32,
    actual_spend: Decimal,
) -> Pacing {
    let daily_budget = budget / Decimal::from(days_in_month);
    let expected_spend = daily_budget * Decimal::from(current_day);
    let remaining_budget = budget - actual_spend;
    let remaining_days = days_in_month - current_day + 1;
    let daily_allowance = if remaining_days > 0 {
        remaining_budget / Decimal::from(remaining_days)
    } else {
        Decimal::ZERO
    };
    Pacing {
        daily_budget: round_unit(daily_budget),
        expected_spend: round_unit(expected_spend),
        pace_diff: round_unit(actual_spend - expected_spend),
        remaining_budget: round_unit(remaining_budget),
        remaining_days,
        daily_allowance: round_unit(daily_allowance),
    }
}

// ── Alerts ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlertLevel {
    Danger,
    Warning,
    Info,
}

#[derive(Debug, Clone)]
pub(crate) struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

/// Budget overrun (danger/warning, mutually exclusive) plus the three
/// independent info triggers. Budget triggers require budget > 0.
pub(crate) fn alerts(
    period: &[&Transaction],
    breakdown: &[CategoryShare],
    current_total: Decimal,
    previous_total: Decimal,
    budget: Decimal,
) -> Vec<Alert> {
    let mut out = Vec::new();

    if budget > Decimal::ZERO {
        let used = current_total / budget * Decimal::ONE_HUNDRED;
        if used > Decimal::ONE_HUNDRED {
            out.push(Alert {
                level: AlertLevel::Danger,
                message: format!("予算を¥{}超過しています", round_unit(current_total - budget)),
            });
        } else if used > Decimal::from(WARNING_BUDGET_PERCENT) {
            out.push(Alert {
                level: AlertLevel::Warning,
                message: format!("予算の{}%を使用しました", round_unit(used)),
            });
        }
    }

    let high_count = period
        .iter()
        .filter(|t| t.amount >= Decimal::from(HIGH_EXPENSE_THRESHOLD))
        .count();
    if high_count > 0 {
        out.push(Alert {
            level: AlertLevel::Info,
            message: format!("¥{HIGH_EXPENSE_THRESHOLD}以上の支出が{high_count}件あります"),
        });
    }

    if let Some(top) = breakdown.first() {
        if top.percent > Decimal::from(TOP_CATEGORY_SHARE_PERCENT) {
            out.push(Alert {
                level: AlertLevel::Info,
                message: format!(
                    "{}が支出の{}%を占めています",
                    top.category,
                    round_unit(top.percent)
                ),
            });
        }
    }

    if previous_total > Decimal::ZERO && current_total > previous_total {
        out.push(Alert {
            level: AlertLevel::Info,
            message: format!("前の期間より¥{}増えています", current_total - previous_total),
        });
    }

    out
}

// ── Report ────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub(crate) struct PeriodReport {
    pub mode: ViewMode,
    pub total: Decimal,
    pub previous_total: Decimal,
    pub comparison: Comparison,
    pub breakdown: Vec<CategoryShare>,
    pub pacing: Option<Pacing>,
    pub alerts: Vec<Alert>,
}

impl PeriodReport {
    /// Pure over `(transactions, now, mode, settings)`; the controller
    /// decides when to rebuild.
    pub(crate) fn build(
        transactions: &[Transaction],
        now: NaiveDateTime,
        mode: ViewMode,
        settings: &Settings,
    ) -> Self {
        let period = period_transactions(transactions, now, mode);
        let previous = previous_period_transactions(transactions, now, mode);
        let current_total = total(&period);
        let previous_total = total(&previous);
        let breakdown = category_breakdown(&period);

        // The budget is monthly, so pacing and budget alerts only make
        // sense in month mode.
        let (pacing_view, budget) = if mode == ViewMode::Month && settings.has_budget() {
            let days = days_in_month(now.date());
            (
                Some(pacing(
                    settings.monthly_budget,
                    days,
                    now.date().day(),
                    current_total,
                )),
                settings.monthly_budget,
            )
        } else {
            (None, Decimal::ZERO)
        };

        let alerts = alerts(&period, &breakdown, current_total, previous_total, budget);

        Self {
            mode,
            total: current_total,
            previous_total,
            comparison: compare(current_total, previous_total),
            breakdown,
            pacing: pacing_view,
            alerts,
        }
    }
}

// ── Calendar helpers ──────────────────────────────────────────

/// Last day of the month, via day zero of the next month.
pub(crate) fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

fn previous_month(date: NaiveDate) -> (i32, u32) {
    if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub(crate) fn round_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
