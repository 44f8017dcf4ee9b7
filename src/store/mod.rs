use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::models::*;

const TRANSACTIONS_FILE: &str = "transactions.json";
const SETTINGS_FILE: &str = "settings.json";
const ACHIEVEMENTS_FILE: &str = "achievements.json";

/// Owns the three persisted collections. Loaded once at startup; every
/// mutation rewrites the owning blob in full.
pub(crate) struct Store {
    dir: PathBuf,
    transactions: Vec<Transaction>,
    settings: Settings,
    achievements: Vec<Achievement>,
}

impl Store {
    pub(crate) fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Ok(Self {
            transactions: load_blob(&dir.join(TRANSACTIONS_FILE)),
            settings: load_blob(&dir.join(SETTINGS_FILE)),
            achievements: load_blob(&dir.join(ACHIEVEMENTS_FILE)),
            dir: dir.to_path_buf(),
        })
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// New records go to the front: most-recent-first listing order.
    pub(crate) fn add_transaction(&mut self, txn: Transaction) -> Result<()> {
        self.transactions.insert(0, txn);
        self.persist_transactions()
    }

    /// Replaces the record with the same id, keeping its position.
    /// Returns false when no record matched.
    pub(crate) fn update_transaction(&mut self, id: &str, txn: Transaction) -> Result<bool> {
        let Some(slot) = self.transactions.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        *slot = Transaction {
            id: id.to_string(),
            ..txn
        };
        self.persist_transactions()?;
        Ok(true)
    }

    /// Returns false when no record matched.
    pub(crate) fn remove_transaction(&mut self, id: &str) -> Result<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return Ok(false);
        }
        self.persist_transactions()?;
        Ok(true)
    }

    // ── Settings ──────────────────────────────────────────────

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn set_monthly_budget(&mut self, amount: Decimal) -> Result<()> {
        self.settings.monthly_budget = amount;
        save_blob(&self.dir.join(SETTINGS_FILE), &self.settings)
    }

    // ── Achievements ──────────────────────────────────────────

    pub(crate) fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    /// Insert or overwrite the record keyed by its year_month. Records
    /// for other months are never touched.
    pub(crate) fn upsert_achievement(&mut self, achievement: Achievement) -> Result<()> {
        let slot = self
            .achievements
            .iter_mut()
            .find(|a| a.year_month == achievement.year_month);
        match slot {
            Some(existing) => *existing = achievement,
            None => self.achievements.push(achievement),
        }
        save_blob(&self.dir.join(ACHIEVEMENTS_FILE), &self.achievements)
    }

    fn persist_transactions(&self) -> Result<()> {
        save_blob(&self.dir.join(TRANSACTIONS_FILE), &self.transactions)
    }
}

/// Missing or malformed blobs load as the default value; a broken file
/// never prevents startup.
fn load_blob<T: DeserializeOwned + Default>(path: &Path) -> T {
    match std::fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

fn save_blob<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    std::fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests;
