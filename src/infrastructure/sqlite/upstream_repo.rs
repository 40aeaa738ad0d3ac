use crate::domain::error::DomainError;
use crate::domain::ports::upstream_repository::*;
use crate::domain::values::commodity::Commodity;
use crate::infrastructure::sqlite::SharedConnection;
use chrono::NaiveDate;
use rusqlite::params;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteUpstreamRepo {
    conn: SharedConnection,
}

impl SqliteUpstreamRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn parse_date(s: &str) -> Result<NaiveDate, rusqlite::Error> {
        NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    }

    /// Rows of `(date, value)` for one commodity, ascending by date.
    fn series(&self, sql: &str, commodity: &Commodity) -> Result<Vec<(NaiveDate, f64)>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![commodity.as_str()], |row| {
                let date: String = row.get(0)?;
                Ok((Self::parse_date(&date)?, row.get(1)?))
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(format!("Failed to read {commodity}: {e}")))?;
        Ok(rows)
    }
}

impl UpstreamRepository for SqliteUpstreamRepo {
    fn add_prices(&self, prices: &[PriceObservation]) -> Result<usize, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT OR REPLACE INTO {PRICE_TABLE} (date, commodity, price) VALUES (?1, ?2, ?3)"
            ))?;
            for p in prices {
                stmt.execute(params![
                    p.date.format(DATE_FORMAT).to_string(),
                    p.commodity.as_str(),
                    p.price
                ])
                .map_err(|e| DomainError::Database(format!("Failed to add price: {e}")))?;
            }
        }
        tx.commit()?;
        Ok(prices.len())
    }

    fn add_sentiments(&self, sentiments: &[SentimentObservation]) -> Result<usize, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT OR REPLACE INTO {SENTIMENT_TABLE} (date, commodity, sentiment) VALUES (?1, ?2, ?3)"
            ))?;
            for s in sentiments {
                stmt.execute(params![
                    s.date.format(DATE_FORMAT).to_string(),
                    s.commodity.as_str(),
                    s.sentiment
                ])
                .map_err(|e| DomainError::Database(format!("Failed to add sentiment: {e}")))?;
            }
        }
        tx.commit()?;
        Ok(sentiments.len())
    }

    fn prices_for(&self, commodity: &Commodity) -> Result<Vec<PriceObservation>, DomainError> {
        let rows = self.series(
            &format!("SELECT date, price FROM {PRICE_TABLE} WHERE commodity = ?1 ORDER BY date"),
            commodity,
        )?;
        Ok(rows
            .into_iter()
            .map(|(date, price)| PriceObservation {
                date,
                commodity: commodity.clone(),
                price,
            })
            .collect())
    }

    fn sentiments_for(&self, commodity: &Commodity) -> Result<Vec<SentimentObservation>, DomainError> {
        let rows = self.series(
            &format!("SELECT date, sentiment FROM {SENTIMENT_TABLE} WHERE commodity = ?1 ORDER BY date"),
            commodity,
        )?;
        Ok(rows
            .into_iter()
            .map(|(date, sentiment)| SentimentObservation {
                date,
                commodity: commodity.clone(),
                sentiment,
            })
            .collect())
    }
}
