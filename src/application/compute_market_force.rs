//! Market-force use case: per commodity, build the model dataset, fit the
//! sentiment weights, project the market force series and plot it; then
//! publish the concatenation of all series as one table.
//!
//! Nothing is written until every commodity has gone through every step.
//! Any error aborts the run and leaves the published table untouched.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::config::MarketForceConfig;
use crate::domain::entities::sentiment_series::{MarketForceTable, SentimentSeries};
use crate::domain::error::DomainError;
use crate::domain::ports::market_force_store::MarketForceStore;
use crate::domain::ports::market_model::MarketModel;
use crate::domain::ports::sentiment_plotter::SentimentPlotter;
use crate::domain::values::commodity::Commodity;

/// Outcome of one successful run.
#[derive(Debug, Clone, Serialize)]
pub struct MarketForceReport {
    pub run_id: String,
    pub target_table: String,
    pub rows_written: usize,
    pub commodities: Vec<CommodityReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommodityReport {
    pub commodity: Commodity,
    pub dataset_rows: usize,
    pub r_squared: Option<f64>,
    pub series_rows: usize,
}

pub struct ComputeMarketForceUseCase {
    model: Arc<dyn MarketModel>,
    plotter: Arc<dyn SentimentPlotter>,
    store: Arc<dyn MarketForceStore>,
}

impl ComputeMarketForceUseCase {
    pub fn new(
        model: Arc<dyn MarketModel>,
        plotter: Arc<dyn SentimentPlotter>,
        store: Arc<dyn MarketForceStore>,
    ) -> Self {
        Self {
            model,
            plotter,
            store,
        }
    }

    pub fn execute(&self, config: &MarketForceConfig) -> Result<MarketForceReport, DomainError> {
        config.validate()?;

        let run_id = uuid::Uuid::new_v4().to_string();
        let span = info_span!("market_force", run_id = %run_id, table = %config.target_table);
        let _guard = span.enter();
        info!(commodities = config.commodities.len(), "Computing market force");

        let mut market_sentiments: Vec<SentimentSeries> = Vec::with_capacity(config.commodities.len());
        let mut reports = Vec::with_capacity(config.commodities.len());

        for commodity in &config.commodities {
            let dataset = self.model.create_model_data(commodity, &config.commodities)?;
            debug!(%commodity, rows = dataset.len(), "Model data built");

            // TODO: seed the estimator with the previous run's weights as a prior
            // to stabilise day-to-day coefficients.
            let weights = self.model.estimate_sentiment_weights(&dataset, commodity)?;
            debug!(%commodity, r_squared = ?weights.r_squared, "Sentiment weights estimated");

            let series = self.model.compute_market_sentiments(
                &dataset,
                &weights,
                &config.date_column,
                commodity,
            )?;

            reports.push(CommodityReport {
                commodity: commodity.clone(),
                dataset_rows: dataset.len(),
                r_squared: weights.r_squared,
                series_rows: series.len(),
            });

            self.plotter.create_sentiment_plot(&series, commodity)?;
            info!(%commodity, rows = series.len(), "Market force computed");
            market_sentiments.push(series);
        }

        let table = MarketForceTable::concat(&config.date_column, market_sentiments)?;
        let rows_written = self.store.replace_table(&config.target_table, &table)?;
        info!(rows = rows_written, "Market force table replaced");

        Ok(MarketForceReport {
            run_id,
            target_table: config.target_table.clone(),
            rows_written,
            commodities: reports,
        })
    }
}
