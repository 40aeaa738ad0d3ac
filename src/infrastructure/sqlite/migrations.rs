use crate::domain::error::DomainError;
use crate::domain::ports::upstream_repository::{PRICE_TABLE, SENTIMENT_TABLE};
use rusqlite::Connection;

/// Upstream tables read by the market model. The published market force
/// table is not created here: every run replaces it wholesale.
pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(&format!(
        "
        CREATE TABLE IF NOT EXISTS {PRICE_TABLE} (
            date TEXT NOT NULL,
            commodity TEXT NOT NULL,
            price REAL NOT NULL,
            PRIMARY KEY (date, commodity)
        );

        CREATE TABLE IF NOT EXISTS {SENTIMENT_TABLE} (
            date TEXT NOT NULL,
            commodity TEXT NOT NULL,
            sentiment REAL NOT NULL,
            PRIMARY KEY (date, commodity)
        );

        CREATE INDEX IF NOT EXISTS idx_price_commodity ON {PRICE_TABLE}(commodity, date);
        CREATE INDEX IF NOT EXISTS idx_sentiment_commodity ON {SENTIMENT_TABLE}(commodity, date);
        "
    )).map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
