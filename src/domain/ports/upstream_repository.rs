use crate::domain::error::DomainError;
use crate::domain::values::commodity::Commodity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Table published by price extraction.
pub const PRICE_TABLE: &str = "PriceSeries";
/// Table published by data harmonisation.
pub const SENTIMENT_TABLE: &str = "HarmonisedSentiment";
pub const UPSTREAM_TABLES: [&str; 2] = [PRICE_TABLE, SENTIMENT_TABLE];

/// A daily closing price published by price extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub commodity: Commodity,
    pub price: f64,
}

/// A daily harmonised sentiment score published by data harmonisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentObservation {
    pub date: NaiveDate,
    pub commodity: Commodity,
    pub sentiment: f64,
}

/// Tables written by upstream pipeline stages and read by the market model.
pub trait UpstreamRepository: Send + Sync {
    /// Upsert by `(date, commodity)`. Returns rows written.
    fn add_prices(&self, prices: &[PriceObservation]) -> Result<usize, DomainError>;
    fn add_sentiments(&self, sentiments: &[SentimentObservation]) -> Result<usize, DomainError>;
    /// Ascending by date.
    fn prices_for(&self, commodity: &Commodity) -> Result<Vec<PriceObservation>, DomainError>;
    /// Ascending by date.
    fn sentiments_for(&self, commodity: &Commodity) -> Result<Vec<SentimentObservation>, DomainError>;
}
