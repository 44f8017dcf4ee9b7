mod achievement;
mod category;
mod settings;
mod transaction;

pub use achievement::Achievement;
pub use category::Category;
pub use settings::Settings;
pub use transaction::Transaction;

#[cfg(test)]
mod tests;
