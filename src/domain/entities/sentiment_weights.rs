use crate::domain::values::commodity::Commodity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureWeight {
    pub feature: String,
    pub weight: f64,
}

/// Fitted weighting of sentiment features for one commodity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentWeights {
    pub commodity: Commodity,
    pub intercept: f64,
    pub coefficients: Vec<FeatureWeight>,
    pub r_squared: Option<f64>,
    pub alpha: f64,
}

impl SentimentWeights {
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.coefficients.iter().map(|c| c.feature.as_str())
    }

    pub fn weight_of(&self, feature: &str) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|c| c.feature == feature)
            .map(|c| c.weight)
    }
}
