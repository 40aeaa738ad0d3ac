//! Market model port: the three modelling steps the market-force stage
//! delegates per commodity.
//!
//! The aggregator never inspects datasets or weights; it only threads them
//! from one step to the next, so any implementation (or a test stub) can be
//! substituted.

use crate::domain::entities::model_dataset::ModelDataset;
use crate::domain::entities::sentiment_series::SentimentSeries;
use crate::domain::entities::sentiment_weights::SentimentWeights;
use crate::domain::error::DomainError;
use crate::domain::values::commodity::Commodity;

pub trait MarketModel: Send + Sync {
    /// Build the dataset for `commodity`. `all_commodities` supplies the
    /// cross-commodity regressors and must contain `commodity`.
    fn create_model_data(
        &self,
        commodity: &Commodity,
        all_commodities: &[Commodity],
    ) -> Result<ModelDataset, DomainError>;

    /// Fit the sentiment weighting for `commodity` from its dataset.
    fn estimate_sentiment_weights(
        &self,
        dataset: &ModelDataset,
        commodity: &Commodity,
    ) -> Result<SentimentWeights, DomainError>;

    /// Project the market force series, dated under `date_column`.
    fn compute_market_sentiments(
        &self,
        dataset: &ModelDataset,
        weights: &SentimentWeights,
        date_column: &str,
        commodity: &Commodity,
    ) -> Result<SentimentSeries, DomainError>;
}
