//! Shared test helpers: recording stubs for the market-force ports and
//! fixtures for the SQLite-backed model.

#![allow(dead_code)]

use chrono::NaiveDate;
use reading_machine::domain::entities::model_dataset::ModelDataset;
use reading_machine::domain::entities::sentiment_series::{
    MarketForceTable, SentimentRow, SentimentSeries,
};
use reading_machine::domain::entities::sentiment_weights::{FeatureWeight, SentimentWeights};
use reading_machine::domain::error::DomainError;
use reading_machine::domain::ports::market_force_store::MarketForceStore;
use reading_machine::domain::ports::market_model::MarketModel;
use reading_machine::domain::ports::sentiment_plotter::SentimentPlotter;
use reading_machine::domain::values::commodity::Commodity;
use reading_machine::infrastructure::plots::noop::NoopPlotter;
use reading_machine::ReadingMachine;
use std::sync::{Arc, Mutex};

pub fn commodity(name: &str) -> Commodity {
    Commodity::new(name).unwrap()
}

pub fn commodities(names: &[&str]) -> Vec<Commodity> {
    names.iter().map(|n| commodity(n)).collect()
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 4, 20).unwrap()
}

/// Deterministic value derived from the commodity name.
pub fn seed_value(c: &Commodity) -> f64 {
    c.as_str().bytes().map(f64::from).sum::<f64>() / 1000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Create,
    Estimate,
    Compute,
}

/// Returns sentinel datasets and weights; each series has `rows_per` rows
/// valued by `seed_value`. Records every call in order.
pub struct StubModel {
    pub calls: Mutex<Vec<String>>,
    pub rows_per: usize,
    pub fail_at: Option<(String, Stage)>,
}

impl StubModel {
    pub fn new(rows_per: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            rows_per,
            fail_at: None,
        }
    }

    pub fn failing(rows_per: usize, commodity: &str, stage: Stage) -> Self {
        Self {
            fail_at: Some((commodity.to_string(), stage)),
            ..Self::new(rows_per)
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, stage: Stage, c: &Commodity) -> Result<(), DomainError> {
        let label = match stage {
            Stage::Create => "create",
            Stage::Estimate => "estimate",
            Stage::Compute => "compute",
        };
        self.calls.lock().unwrap().push(format!("{label}:{c}"));
        match &self.fail_at {
            Some((name, s)) if name == c.as_str() && *s == stage => {
                Err(DomainError::Estimation(format!("stub failure at {label}:{c}")))
            }
            _ => Ok(()),
        }
    }
}

impl MarketModel for StubModel {
    fn create_model_data(
        &self,
        commodity: &Commodity,
        all_commodities: &[Commodity],
    ) -> Result<ModelDataset, DomainError> {
        self.record(Stage::Create, commodity)?;
        assert!(all_commodities.contains(commodity));
        Ok(ModelDataset::new(
            commodity.clone(),
            vec![format!("sentinel_{commodity}")],
        ))
    }

    fn estimate_sentiment_weights(
        &self,
        dataset: &ModelDataset,
        commodity: &Commodity,
    ) -> Result<SentimentWeights, DomainError> {
        self.record(Stage::Estimate, commodity)?;
        assert_eq!(&dataset.commodity, commodity);
        Ok(SentimentWeights {
            commodity: commodity.clone(),
            intercept: 0.0,
            coefficients: vec![FeatureWeight {
                feature: format!("sentinel_{commodity}"),
                weight: 1.0,
            }],
            r_squared: None,
            alpha: 0.0,
        })
    }

    fn compute_market_sentiments(
        &self,
        dataset: &ModelDataset,
        weights: &SentimentWeights,
        date_column: &str,
        commodity: &Commodity,
    ) -> Result<SentimentSeries, DomainError> {
        self.record(Stage::Compute, commodity)?;
        assert_eq!(&dataset.commodity, commodity);
        assert_eq!(&weights.commodity, commodity);
        let mut series = SentimentSeries::new(commodity.clone(), date_column);
        for i in 0..self.rows_per {
            series.rows.push(SentimentRow {
                date: day() + chrono::Duration::days(i as i64),
                commodity: commodity.clone(),
                price: None,
                market_force: seed_value(commodity),
            });
        }
        Ok(series)
    }
}

/// Records plotted series; optionally fails for one commodity.
#[derive(Default)]
pub struct RecordingPlotter {
    pub plotted: Mutex<Vec<SentimentSeries>>,
    pub fail_for: Option<String>,
}

impl SentimentPlotter for RecordingPlotter {
    fn create_sentiment_plot(
        &self,
        series: &SentimentSeries,
        commodity: &Commodity,
    ) -> Result<(), DomainError> {
        if self.fail_for.as_deref() == Some(commodity.as_str()) {
            return Err(DomainError::Plot(format!("stub plot failure for {commodity}")));
        }
        self.plotted.lock().unwrap().push(series.clone());
        Ok(())
    }
}

/// In-memory store that records every write.
#[derive(Default)]
pub struct RecordingStore {
    pub tables: Mutex<Vec<(String, MarketForceTable)>>,
    pub writes: Mutex<usize>,
}

impl RecordingStore {
    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    pub fn table(&self, name: &str) -> Option<MarketForceTable> {
        self.tables
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t.clone())
    }

    pub fn seed(&self, name: &str, table: MarketForceTable) {
        self.tables.lock().unwrap().push((name.to_string(), table));
    }
}

impl MarketForceStore for RecordingStore {
    fn replace_table(&self, name: &str, table: &MarketForceTable) -> Result<usize, DomainError> {
        *self.writes.lock().unwrap() += 1;
        let mut tables = self.tables.lock().unwrap();
        tables.retain(|(n, _)| n != name);
        tables.push((name.to_string(), table.clone()));
        Ok(table.len())
    }

    fn load_table(
        &self,
        name: &str,
        _date_column: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SentimentRow>, DomainError> {
        let table = self
            .table(name)
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;
        Ok(table
            .rows
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }
}

pub fn setup() -> ReadingMachine {
    ReadingMachine::with_plotter(":memory:", Arc::new(NoopPlotter)).unwrap()
}

/// Prices follow `exp(cumulative sum of 0.01 * own sentiment)` so the own
/// sentiment feature explains the log returns.
pub fn seed_market(rm: &ReadingMachine, names: &[&str], days: u32) {
    let mut prices = String::from("date,commodity,price\n");
    let mut sentiments = String::from("date,commodity,sentiment\n");
    for (k, name) in names.iter().enumerate() {
        let mut log_price = (100.0_f64 + k as f64 * 10.0).ln();
        for d in 0..days {
            let date = day() + chrono::Duration::days(d as i64);
            // Deterministic, non-collinear across commodities.
            let s = (((d as usize * (k + 3) + k * 7) % 11) as f64 - 5.0) / 5.0;
            if d > 0 {
                log_price += 0.01 * s;
            }
            prices.push_str(&format!("{date},{name},{}\n", log_price.exp()));
            sentiments.push_str(&format!("{date},{name},{s}\n"));
        }
    }
    rm.import_prices(prices.as_bytes()).unwrap();
    rm.import_sentiments(sentiments.as_bytes()).unwrap();
}
