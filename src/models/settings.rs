use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Singleton user settings, persisted independently of transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Zero means no budget is configured.
    #[serde(default)]
    pub monthly_budget: Decimal,
}

impl Settings {
    pub fn has_budget(&self) -> bool {
        self.monthly_budget > Decimal::ZERO
    }
}
