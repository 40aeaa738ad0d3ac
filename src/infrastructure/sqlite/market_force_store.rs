use crate::domain::entities::sentiment_series::{MarketForceTable, SentimentRow};
use crate::domain::error::DomainError;
use crate::domain::ports::market_force_store::{MarketForceStore, VALUE_COLUMNS};
use crate::domain::values::identifier::quote_identifier;
use crate::infrastructure::sqlite::SharedConnection;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

pub struct SqliteMarketForceStore {
    conn: SharedConnection,
}

impl SqliteMarketForceStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_sentiment(row: &rusqlite::Row) -> Result<SentimentRow, rusqlite::Error> {
        let date_str: String = row.get(0)?;
        let commodity_str: String = row.get(1)?;
        Ok(SentimentRow {
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
            })?,
            commodity: commodity_str
                .parse()
                .map_err(|_| rusqlite::Error::InvalidParameterName(commodity_str.clone()))?,
            price: row.get(2)?,
            market_force: row.get(3)?,
        })
    }
}

impl MarketForceStore for SqliteMarketForceStore {
    fn replace_table(&self, name: &str, table: &MarketForceTable) -> Result<usize, DomainError> {
        let quoted_table = quote_identifier(name)?;
        let quoted_date = quote_identifier(&table.date_column)?;

        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        // Dropping the transaction without commit rolls back, keeping the old table.
        let tx = conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {quoted_table};
             CREATE TABLE {quoted_table} (
                 {quoted_date} TEXT NOT NULL,
                 commodity TEXT NOT NULL,
                 price REAL,
                 market_force REAL NOT NULL
             );"
        ))
        .map_err(|e| DomainError::Database(format!("Failed to recreate {name}: {e}")))?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {quoted_table} ({quoted_date}, {}) VALUES (?1, ?2, ?3, ?4)",
                VALUE_COLUMNS.join(", ")
            ))?;
            for row in &table.rows {
                stmt.execute(params![
                    row.date.format("%Y-%m-%d").to_string(),
                    row.commodity.as_str(),
                    row.price,
                    row.market_force,
                ])
                .map_err(|e| {
                    DomainError::Database(format!(
                        "Failed to write {} {} into {name}: {e}",
                        row.commodity, row.date
                    ))
                })?;
            }
        }
        tx.commit()?;
        Ok(table.len())
    }

    fn load_table(
        &self,
        name: &str,
        date_column: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SentimentRow>, DomainError> {
        let quoted_table = quote_identifier(name)?;
        let quoted_date = quote_identifier(date_column)?;

        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let exists: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(DomainError::NotFound(format!("Table not found: {name}")));
        }

        let mut sql = format!(
            "SELECT {quoted_date}, {} FROM {quoted_table} ORDER BY rowid",
            VALUE_COLUMNS.join(", ")
        );
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?1");
            param_values.push(Box::new(limit as i64));
        }
        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params_refs.as_slice(), Self::row_to_sentiment)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(format!("Failed to read {name}: {e}")))?;
        Ok(rows)
    }
}
