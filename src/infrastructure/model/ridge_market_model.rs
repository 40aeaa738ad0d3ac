use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use ndarray::{Array1, Array2};
use tracing::debug;

use crate::domain::entities::model_dataset::{feature_name, ModelDataset, ModelRow};
use crate::domain::entities::sentiment_series::{SentimentRow, SentimentSeries};
use crate::domain::entities::sentiment_weights::{FeatureWeight, SentimentWeights};
use crate::domain::error::DomainError;
use crate::domain::ports::market_model::MarketModel;
use crate::domain::ports::upstream_repository::UpstreamRepository;
use crate::domain::values::commodity::Commodity;
use crate::infrastructure::model::ridge;

/// Regresses each commodity's daily log return on the harmonised sentiment
/// of every tracked commodity.
pub struct RidgeMarketModel {
    repo: Arc<dyn UpstreamRepository>,
    alpha: f64,
}

impl RidgeMarketModel {
    pub fn new(repo: Arc<dyn UpstreamRepository>, alpha: f64) -> Self {
        Self { repo, alpha }
    }
}

impl MarketModel for RidgeMarketModel {
    fn create_model_data(
        &self,
        commodity: &Commodity,
        all_commodities: &[Commodity],
    ) -> Result<ModelDataset, DomainError> {
        if !all_commodities.contains(commodity) {
            let known: Vec<&str> = all_commodities.iter().map(|c| c.as_str()).collect();
            return Err(DomainError::UnknownCommodity {
                commodity: commodity.to_string(),
                known: known.join(", "),
            });
        }

        let mut sentiment_by_commodity: Vec<HashMap<NaiveDate, f64>> =
            Vec::with_capacity(all_commodities.len());
        for c in all_commodities {
            let scores = self
                .repo
                .sentiments_for(c)?
                .into_iter()
                .map(|s| (s.date, s.sentiment))
                .collect();
            sentiment_by_commodity.push(scores);
        }

        let feature_names = all_commodities.iter().map(feature_name).collect();
        let mut dataset = ModelDataset::new(commodity.clone(), feature_names);

        let prices = self.repo.prices_for(commodity)?;
        for pair in prices.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            if prev.price <= 0.0 || curr.price <= 0.0 {
                debug!(%commodity, date = %curr.date, "Skipping non-positive price");
                continue;
            }
            // Missing sentiment counts as neutral.
            let features = sentiment_by_commodity
                .iter()
                .map(|scores| scores.get(&curr.date).copied().unwrap_or(0.0))
                .collect();
            dataset.rows.push(ModelRow {
                date: curr.date,
                price: curr.price,
                target: (curr.price / prev.price).ln(),
                features,
            });
        }

        Ok(dataset)
    }

    fn estimate_sentiment_weights(
        &self,
        dataset: &ModelDataset,
        commodity: &Commodity,
    ) -> Result<SentimentWeights, DomainError> {
        if &dataset.commodity != commodity {
            return Err(DomainError::InvalidInput(format!(
                "Dataset belongs to {}, not {commodity}",
                dataset.commodity
            )));
        }
        let n_features = dataset.feature_count();
        if dataset.len() <= n_features {
            return Err(DomainError::InsufficientData {
                commodity: commodity.to_string(),
                rows: dataset.len(),
                features: n_features,
            });
        }

        let flat: Vec<f64> = dataset
            .rows
            .iter()
            .flat_map(|r| r.features.iter().copied())
            .collect();
        let x = Array2::from_shape_vec((dataset.len(), n_features), flat)
            .map_err(|e| DomainError::Estimation(format!("Ragged feature rows: {e}")))?;
        let y: Array1<f64> = dataset.rows.iter().map(|r| r.target).collect();

        let fit = ridge::fit(&x, &y, self.alpha)?;

        Ok(SentimentWeights {
            commodity: commodity.clone(),
            intercept: fit.intercept,
            coefficients: dataset
                .feature_names
                .iter()
                .zip(fit.coefficients.iter())
                .map(|(feature, weight)| FeatureWeight {
                    feature: feature.clone(),
                    weight: *weight,
                })
                .collect(),
            r_squared: fit.r_squared,
            alpha: self.alpha,
        })
    }

    fn compute_market_sentiments(
        &self,
        dataset: &ModelDataset,
        weights: &SentimentWeights,
        date_column: &str,
        commodity: &Commodity,
    ) -> Result<SentimentSeries, DomainError> {
        if !dataset.feature_names.iter().map(String::as_str).eq(weights.feature_names()) {
            return Err(DomainError::InvalidInput(format!(
                "Weights for {} do not match the features of the {} dataset",
                weights.commodity, dataset.commodity
            )));
        }

        let mut series = SentimentSeries::new(commodity.clone(), date_column);
        series.rows = dataset
            .rows
            .iter()
            .map(|row| SentimentRow {
                date: row.date,
                commodity: commodity.clone(),
                price: Some(row.price),
                market_force: row
                    .features
                    .iter()
                    .zip(&weights.coefficients)
                    .map(|(x, w)| x * w.weight)
                    .sum(),
            })
            .collect();
        Ok(series)
    }
}
