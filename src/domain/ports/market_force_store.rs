use crate::domain::entities::sentiment_series::{MarketForceTable, SentimentRow};
use crate::domain::error::DomainError;

/// Columns written after the date column; the date column must not reuse them.
pub const VALUE_COLUMNS: [&str; 3] = ["commodity", "price", "market_force"];

pub trait MarketForceStore: Send + Sync {
    /// Replace the named table wholesale with `table`. No index column is
    /// written. On error the previous contents must survive.
    fn replace_table(&self, name: &str, table: &MarketForceTable) -> Result<usize, DomainError>;

    /// Read the named table back in stored order.
    fn load_table(
        &self,
        name: &str,
        date_column: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SentimentRow>, DomainError>;
}
