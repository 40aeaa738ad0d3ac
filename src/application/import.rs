use crate::domain::error::DomainError;
use crate::domain::ports::upstream_repository::{
    PriceObservation, SentimentObservation, UpstreamRepository,
};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
struct PriceRecord {
    date: String,
    commodity: String,
    price: f64,
}

#[derive(Debug, Deserialize)]
struct SentimentRecord {
    date: String,
    commodity: String,
    sentiment: f64,
}

/// Loads upstream CSV extracts into the tables the market model reads.
pub struct ImportUseCase {
    repo: Arc<dyn UpstreamRepository>,
}

impl ImportUseCase {
    pub fn new(repo: Arc<dyn UpstreamRepository>) -> Self {
        Self { repo }
    }

    /// CSV with header `date,commodity,price`.
    pub fn import_prices<R: Read>(&self, reader: R) -> Result<usize, DomainError> {
        let prices = read_records(reader, |line, r: PriceRecord| {
            if !r.price.is_finite() {
                return Err(DomainError::Parse(format!("line {line}: price must be finite")));
            }
            Ok(PriceObservation {
                date: parse_date(line, &r.date)?,
                commodity: r
                    .commodity
                    .parse()
                    .map_err(|e: String| DomainError::Parse(format!("line {line}: {e}")))?,
                price: r.price,
            })
        })?;
        let written = self.repo.add_prices(&prices)?;
        info!(rows = written, "Imported prices");
        Ok(written)
    }

    /// CSV with header `date,commodity,sentiment`.
    pub fn import_sentiments<R: Read>(&self, reader: R) -> Result<usize, DomainError> {
        let sentiments = read_records(reader, |line, r: SentimentRecord| {
            if !r.sentiment.is_finite() {
                return Err(DomainError::Parse(format!("line {line}: sentiment must be finite")));
            }
            Ok(SentimentObservation {
                date: parse_date(line, &r.date)?,
                commodity: r
                    .commodity
                    .parse()
                    .map_err(|e: String| DomainError::Parse(format!("line {line}: {e}")))?,
                sentiment: r.sentiment,
            })
        })?;
        let written = self.repo.add_sentiments(&sentiments)?;
        info!(rows = written, "Imported sentiments");
        Ok(written)
    }
}

fn read_records<R, T, O, F>(reader: R, mut convert: F) -> Result<Vec<O>, DomainError>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(usize, T) -> Result<O, DomainError>,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for (i, record) in csv_reader.deserialize::<T>().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let record = record.map_err(|e| DomainError::Parse(format!("line {line}: {e}")))?;
        out.push(convert(line, record)?);
    }
    Ok(out)
}

fn parse_date(line: usize, s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| DomainError::Parse(format!("line {line}: invalid date '{s}', use YYYY-MM-DD")))
}
