use crate::domain::error::DomainError;
use crate::domain::values::commodity::Commodity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRow {
    pub date: NaiveDate,
    pub commodity: Commodity,
    pub price: Option<f64>,
    pub market_force: f64,
}

/// Market force time series of a single commodity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSeries {
    pub commodity: Commodity,
    /// Column name the dates are published under.
    pub date_column: String,
    pub rows: Vec<SentimentRow>,
}

impl SentimentSeries {
    pub fn new(commodity: Commodity, date_column: impl Into<String>) -> Self {
        Self {
            commodity,
            date_column: date_column.into(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Row-wise union of every commodity's series, in commodity-then-row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketForceTable {
    pub date_column: String,
    pub rows: Vec<SentimentRow>,
}

impl MarketForceTable {
    /// Concatenate series without merging or deduplicating rows.
    pub fn concat(
        date_column: &str,
        series: Vec<SentimentSeries>,
    ) -> Result<Self, DomainError> {
        let mut rows = Vec::with_capacity(series.iter().map(|s| s.len()).sum());
        for s in series {
            if s.date_column != date_column {
                return Err(DomainError::InvalidInput(format!(
                    "Series for {} uses date column '{}', expected '{}'",
                    s.commodity, s.date_column, date_column
                )));
            }
            rows.extend(s.rows);
        }
        Ok(Self {
            date_column: date_column.to_string(),
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
