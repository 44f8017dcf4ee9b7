#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse_known() {
    assert_eq!(Category::parse("食費"), Category::Food);
    assert_eq!(Category::parse("交通費"), Category::Transport);
    assert_eq!(Category::parse("日用品"), Category::DailyGoods);
    assert_eq!(Category::parse("娯楽"), Category::Leisure);
    assert_eq!(Category::parse("医療"), Category::Medical);
    assert_eq!(Category::parse("その他"), Category::Other);
}

#[test]
fn test_category_parse_unknown_falls_back() {
    assert_eq!(Category::parse("現金"), Category::Other);
    assert_eq!(Category::parse(""), Category::Other);
}

#[test]
fn test_category_parse_trims() {
    assert_eq!(Category::parse(" 食費 "), Category::Food);
}

#[test]
fn test_category_find_strict() {
    assert_eq!(Category::find("食費"), Some(Category::Food));
    assert_eq!(Category::find("現金"), None);
    assert_eq!(Category::find(""), None);
}

#[test]
fn test_category_roundtrip() {
    // Every category should roundtrip through as_str -> parse
    for c in Category::all() {
        let s = c.as_str();
        assert_eq!(*c, Category::parse(s), "Roundtrip failed for {s}");
    }
}

#[test]
fn test_category_colors_distinct() {
    let mut colors: Vec<&str> = Category::all().iter().map(|c| c.color()).collect();
    colors.sort_unstable();
    colors.dedup();
    assert_eq!(colors.len(), Category::all().len());
}

#[test]
fn test_category_display() {
    assert_eq!(format!("{}", Category::Food), "食費");
    assert_eq!(format!("{}", Category::Other), "その他");
}

#[test]
fn test_category_serde_string_form() {
    let json = serde_json::to_string(&Category::Food).unwrap();
    assert_eq!(json, "\"食費\"");
    let back: Category = serde_json::from_str("\"娯楽\"").unwrap();
    assert_eq!(back, Category::Leisure);
    // Unknown stored names never fail to deserialize
    let unknown: Category = serde_json::from_str("\"クレジットカード\"").unwrap();
    assert_eq!(unknown, Category::Other);
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_transaction_new_assigns_id() {
    let txn = Transaction::new(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        Category::Food,
        dec!(3000),
        String::new(),
    );
    assert!(!txn.id.is_empty());
    assert!(txn.id.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_transaction_year_month() {
    let txn = Transaction::new(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        Category::Food,
        dec!(3000),
        String::new(),
    );
    assert_eq!(txn.year_month(), "2024-06");
}

#[test]
fn test_transaction_serde_roundtrip_with_missing_memo() {
    let json = r#"{"id":"1718000000000","date":"2024-06-15","category":"食費","amount":"5000"}"#;
    let txn: Transaction = serde_json::from_str(json).unwrap();
    assert_eq!(txn.amount, dec!(5000));
    assert!(txn.memo.is_empty());
}

// ── Settings ──────────────────────────────────────────────────

#[test]
fn test_settings_default_has_no_budget() {
    let settings = Settings::default();
    assert_eq!(settings.monthly_budget, Decimal::ZERO);
    assert!(!settings.has_budget());
}

#[test]
fn test_settings_has_budget() {
    let settings = Settings {
        monthly_budget: dec!(30000),
    };
    assert!(settings.has_budget());
}

// ── Achievement ───────────────────────────────────────────────

#[test]
fn test_achievement_evaluate_under_budget() {
    let a = Achievement::evaluate("2024-06".into(), dec!(25000), dec!(30000));
    assert!(a.achieved);
    assert_eq!(a.year_month, "2024-06");
    assert_eq!(a.total_expense, dec!(25000));
    assert_eq!(a.budget, dec!(30000));
}

#[test]
fn test_achievement_evaluate_exactly_on_budget() {
    let a = Achievement::evaluate("2024-06".into(), dec!(30000), dec!(30000));
    assert!(a.achieved);
}

#[test]
fn test_achievement_evaluate_over_budget() {
    let a = Achievement::evaluate("2024-06".into(), dec!(30001), dec!(30000));
    assert!(!a.achieved);
}
