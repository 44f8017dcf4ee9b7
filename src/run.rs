use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::achieve;
use crate::models::{Category, Transaction};
use crate::report::{self, AlertLevel, PeriodReport, ViewMode};
use crate::stats;
use crate::store::Store;

pub(crate) fn as_cli(args: &[String], store: &mut Store, now: NaiveDateTime) -> Result<()> {
    let command = args.get(1).map(String::as_str).unwrap_or("summary");
    let rest = if args.len() > 2 { &args[2..] } else { &[][..] };
    match command {
        "add" => cli_add(rest, store, now),
        "list" | "ls" => cli_list(rest, store),
        "edit" => cli_edit(rest, store, now),
        "remove" | "rm" => cli_remove(rest, store, now),
        "summary" | "s" => cli_summary(rest, store, now),
        "stats" => cli_stats(rest, store, now),
        "budget" => cli_budget(rest, store, now),
        "streak" => cli_streak(store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("kakeibo {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("kakeibo — local-only personal expense tracker");
    println!();
    println!("Usage: kakeibo [command]");
    println!();
    println!("Commands:");
    println!("  (none), summary [--week]      Period report (month, or trailing 7 days)");
    println!("  add <date> <category> <amount> [memo..]");
    println!("                                Record an expense (date: YYYY-MM-DD)");
    println!("  list [YYYY-MM]                List records, newest first");
    println!("  edit <id> <date> <category> <amount> [memo..]");
    println!("                                Replace a record in place");
    println!("  remove <id>                   Delete a record");
    println!("  stats [year] [--month N]      Yearly statistics, optional month drill-down");
    println!("  budget [amount]               Show or set the monthly budget");
    println!("  streak                        Monthly achievement streak");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

// ── Mutations ─────────────────────────────────────────────────

fn cli_add(args: &[String], store: &mut Store, now: NaiveDateTime) -> Result<()> {
    if args.len() < 3 {
        bail!("Usage: kakeibo add <YYYY-MM-DD> <category> <amount> [memo..]");
    }
    let (date, category, amount) = parse_record_fields(&args[0], &args[1], &args[2])?;
    let memo = args[3..].join(" ");

    let txn = Transaction::new(date, category, amount, memo);
    let id = txn.id.clone();
    store.add_transaction(txn)?;
    achieve::record_current_month(store, now.date())?;

    println!("{date} {category} ¥{amount} を追加しました (id {id})");
    Ok(())
}

fn cli_edit(args: &[String], store: &mut Store, now: NaiveDateTime) -> Result<()> {
    if args.len() < 4 {
        bail!("Usage: kakeibo edit <id> <YYYY-MM-DD> <category> <amount> [memo..]");
    }
    let id = &args[0];
    let (date, category, amount) = parse_record_fields(&args[1], &args[2], &args[3])?;
    let memo = args[4..].join(" ");

    let replacement = Transaction {
        id: id.clone(),
        date,
        category,
        amount,
        memo,
    };
    if !store.update_transaction(id, replacement)? {
        bail!("No record with id {id}");
    }
    achieve::record_current_month(store, now.date())?;

    println!("id {id} を更新しました");
    Ok(())
}

fn cli_remove(args: &[String], store: &mut Store, now: NaiveDateTime) -> Result<()> {
    let Some(id) = args.first() else {
        bail!("Usage: kakeibo remove <id>");
    };
    if !store.remove_transaction(id)? {
        bail!("No record with id {id}");
    }
    achieve::record_current_month(store, now.date())?;

    println!("id {id} を削除しました");
    Ok(())
}

/// Rejects bad input before any record exists; a failed parse never
/// mutates the store.
fn parse_record_fields(
    date: &str,
    category: &str,
    amount: &str,
) -> Result<(NaiveDate, Category, Decimal)> {
    let date = NaiveDate::from_str(date).with_context(|| format!("Invalid date: {date}"))?;
    let Some(category) = Category::find(category) else {
        let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        bail!(
            "Unknown category: {category} (expected one of: {})",
            names.join(", ")
        );
    };
    let Ok(amount) = Decimal::from_str(amount) else {
        bail!("Invalid amount: {amount}");
    };
    Ok((date, category, amount))
}

// ── Views ─────────────────────────────────────────────────────

fn cli_list(args: &[String], store: &Store) -> Result<()> {
    let month = args.first().filter(|a| !a.starts_with('-')).cloned();
    let txns: Vec<&Transaction> = store
        .transactions()
        .iter()
        .filter(|t| month.as_deref().is_none_or(|m| t.year_month() == m))
        .collect();

    if txns.is_empty() {
        println!("データがありません");
        return Ok(());
    }

    println!("{:<14} {:<11} {:<8} {:>10}  メモ", "ID", "日付", "カテゴリ", "金額");
    println!("{}", "─".repeat(60));
    for txn in txns {
        println!(
            "{:<14} {:<11} {:<8} {:>10}  {}",
            txn.id,
            txn.date,
            txn.category,
            format!("¥{}", txn.amount),
            txn.memo,
        );
    }
    Ok(())
}

fn cli_summary(args: &[String], store: &Store, now: NaiveDateTime) -> Result<()> {
    let mode = if args.iter().any(|a| a == "--week" || a == "-w") {
        ViewMode::Week
    } else {
        ViewMode::Month
    };
    let report = PeriodReport::build(store.transactions(), now, mode, store.settings());

    let label = match mode {
        ViewMode::Month => now.format("%Y-%m").to_string(),
        ViewMode::Week => "直近7日間".to_string(),
    };
    println!("kakeibo — {label}");
    println!("{}", "─".repeat(40));
    println!("  支出合計:  ¥{}", report.total);
    println!(
        "  前の期間:  ¥{} (増減 ¥{} / {}%)",
        report.previous_total,
        report.comparison.diff,
        report::round_unit(report.comparison.percent),
    );

    if let Some(p) = &report.pacing {
        println!();
        println!("予算ペース:");
        println!("  1日あたりの予算:  ¥{}", p.daily_budget);
        println!("  想定支出:         ¥{}", p.expected_spend);
        println!("  ペース差:         ¥{}", p.pace_diff);
        println!(
            "  残り予算:         ¥{} (残り{}日)",
            p.remaining_budget, p.remaining_days
        );
        println!("  1日に使える額:    ¥{}", p.daily_allowance);
    }

    if !report.breakdown.is_empty() {
        println!();
        println!("カテゴリ別内訳:");
        for share in &report.breakdown {
            println!(
                "  {:<6} {:>10} ({}%)",
                share.category,
                format!("¥{}", share.amount),
                report::round_unit(share.percent),
            );
        }
    }

    if !report.alerts.is_empty() {
        println!();
        for alert in &report.alerts {
            let tag = match alert.level {
                AlertLevel::Danger => "!!",
                AlertLevel::Warning => "! ",
                AlertLevel::Info => "i ",
            };
            println!("  [{tag}] {}", alert.message);
        }
    }
    Ok(())
}

fn cli_stats(args: &[String], store: &Store, now: NaiveDateTime) -> Result<()> {
    let year = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| a.parse::<i32>().with_context(|| format!("Invalid year: {a}")))
        .transpose()?
        .unwrap_or_else(|| now.date().year());
    let drill_month = args
        .windows(2)
        .find(|w| w[0] == "--month")
        .map(|w| {
            w[1].parse::<u32>()
                .with_context(|| format!("Invalid month: {}", w[1]))
        })
        .transpose()?;

    let buckets = stats::monthly_buckets(store.transactions(), year);
    let summary = stats::year_summary(&buckets);

    println!("{year}年の統計");
    println!("{}", "─".repeat(40));
    println!("  年間合計:  ¥{}", summary.total);
    println!("  月平均:    ¥{}", report::round_unit(summary.monthly_average));
    if let Some(max) = &summary.max_month {
        println!("  最高額の月: {}月 ¥{}", max.month, max.amount);
    }
    if let Some(min) = &summary.min_month {
        println!("  最低額の月: {}月 ¥{}", min.month, min.amount);
    }

    println!();
    for bucket in &buckets {
        println!(
            "  {:>2}月 {:>12}  {}件",
            bucket.month,
            format!("¥{}", bucket.amount),
            bucket.count,
        );
    }

    if let Some(month) = drill_month {
        if !(1..=12).contains(&month) {
            bail!("Month must be 1-12, got {month}");
        }
        println!();
        println!("{year}年{month}月のカテゴリ別内訳:");
        let shares = stats::month_breakdown(store.transactions(), year, month);
        if shares.is_empty() {
            println!("  データがありません");
        }
        for share in &shares {
            println!(
                "  {:<6} {:>10} ({}%)",
                share.category,
                format!("¥{}", share.amount),
                report::round_unit(share.percent),
            );
        }
        let txns = stats::month_transactions(store.transactions(), year, month);
        if !txns.is_empty() {
            println!();
            println!("履歴 ({}件):", txns.len());
            for txn in txns {
                println!(
                    "  {} {:<8} ¥{}  {}",
                    txn.date, txn.category, txn.amount, txn.memo
                );
            }
        }
    }
    Ok(())
}

fn cli_budget(args: &[String], store: &mut Store, now: NaiveDateTime) -> Result<()> {
    let Some(raw) = args.first() else {
        if store.settings().has_budget() {
            println!("月予算: ¥{}", store.settings().monthly_budget);
        } else {
            println!("予算が設定されていません");
        }
        return Ok(());
    };

    let Ok(amount) = Decimal::from_str(raw) else {
        bail!("Invalid amount: {raw}");
    };
    if amount < Decimal::ZERO {
        bail!("Budget cannot be negative: {raw}");
    }
    store.set_monthly_budget(amount)?;
    achieve::record_current_month(store, now.date())?;

    println!("月予算を¥{amount}に設定しました");
    Ok(())
}

fn cli_streak(store: &Store) -> Result<()> {
    let achievements = store.achievements();
    if achievements.is_empty() {
        println!("目標達成記録はまだありません");
        return Ok(());
    }

    let streak = achieve::streak(achievements);
    if streak > 0 {
        println!("{streak}ヶ月連続達成中！");
    }
    for a in achieve::recent(achievements, 3) {
        let mark = if a.achieved { "達成" } else { "超過" };
        println!(
            "  {}  {}  ¥{} / ¥{}",
            a.year_month, mark, a.total_expense, a.budget
        );
    }
    Ok(())
}
