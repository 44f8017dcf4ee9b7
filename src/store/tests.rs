#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, Transaction};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(id: &str, day: u32, amount: rust_decimal::Decimal) -> Transaction {
    Transaction {
        id: id.into(),
        date: date(2024, 6, day),
        category: Category::Food,
        amount,
        memo: String::new(),
    }
}

// ── Loading ───────────────────────────────────────────────────

#[test]
fn test_open_empty_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    assert!(store.transactions().is_empty());
    assert!(store.achievements().is_empty());
    assert!(!store.settings().has_budget());
}

#[test]
fn test_open_creates_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("data");
    let store = Store::open(&nested).unwrap();
    assert!(store.transactions().is_empty());
    assert!(nested.exists());
}

#[test]
fn test_malformed_blob_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("transactions.json"), "{not json").unwrap();
    std::fs::write(dir.path().join("settings.json"), "[]").unwrap();
    let store = Store::open(dir.path()).unwrap();
    assert!(store.transactions().is_empty());
    assert_eq!(store.settings().monthly_budget, rust_decimal::Decimal::ZERO);
}

#[test]
fn test_reopen_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = Store::open(dir.path()).unwrap();
        store.add_transaction(txn("1", 1, dec!(3000))).unwrap();
        store.set_monthly_budget(dec!(30000)).unwrap();
    }
    let store = Store::open(dir.path()).unwrap();
    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.transactions()[0].amount, dec!(3000));
    assert_eq!(store.settings().monthly_budget, dec!(30000));
}

// ── Transaction mutations ─────────────────────────────────────

#[test]
fn test_add_prepends() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(dir.path()).unwrap();
    store.add_transaction(txn("1", 1, dec!(100))).unwrap();
    store.add_transaction(txn("2", 2, dec!(200))).unwrap();
    let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
}

#[test]
fn test_update_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(dir.path()).unwrap();
    store.add_transaction(txn("1", 1, dec!(100))).unwrap();
    store.add_transaction(txn("2", 2, dec!(200))).unwrap();
    store.add_transaction(txn("3", 3, dec!(300))).unwrap();

    let replaced = store.update_transaction("2", txn("2", 20, dec!(999))).unwrap();
    assert!(replaced);
    let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["3", "2", "1"]);
    assert_eq!(store.transactions()[1].amount, dec!(999));
}

#[test]
fn test_update_missing_id_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(dir.path()).unwrap();
    store.add_transaction(txn("1", 1, dec!(100))).unwrap();
    let replaced = store.update_transaction("99", txn("99", 2, dec!(1))).unwrap();
    assert!(!replaced);
    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.transactions()[0].amount, dec!(100));
}

#[test]
fn test_remove_exactly_one() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(dir.path()).unwrap();
    store.add_transaction(txn("1", 1, dec!(100))).unwrap();
    store.add_transaction(txn("2", 2, dec!(200))).unwrap();
    store.add_transaction(txn("3", 3, dec!(300))).unwrap();

    let removed = store.remove_transaction("2").unwrap();
    assert!(removed);
    let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["3", "1"]);
}

#[test]
fn test_remove_missing_id_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(dir.path()).unwrap();
    store.add_transaction(txn("1", 1, dec!(100))).unwrap();
    let removed = store.remove_transaction("99").unwrap();
    assert!(!removed);
    assert_eq!(store.transactions().len(), 1);
}

// ── Achievements ──────────────────────────────────────────────

#[test]
fn test_upsert_achievement_never_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(dir.path()).unwrap();
    store
        .upsert_achievement(Achievement::evaluate("2024-06".into(), dec!(100), dec!(300)))
        .unwrap();
    store
        .upsert_achievement(Achievement::evaluate("2024-06".into(), dec!(400), dec!(300)))
        .unwrap();
    assert_eq!(store.achievements().len(), 1);
    assert!(!store.achievements()[0].achieved);
    assert_eq!(store.achievements()[0].total_expense, dec!(400));
}

#[test]
fn test_upsert_achievement_leaves_other_months() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open(dir.path()).unwrap();
    store
        .upsert_achievement(Achievement::evaluate("2024-05".into(), dec!(100), dec!(300)))
        .unwrap();
    store
        .upsert_achievement(Achievement::evaluate("2024-06".into(), dec!(200), dec!(300)))
        .unwrap();
    assert_eq!(store.achievements().len(), 2);
    let may = store
        .achievements()
        .iter()
        .find(|a| a.year_month == "2024-05")
        .unwrap();
    assert_eq!(may.total_expense, dec!(100));
}
