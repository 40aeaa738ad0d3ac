use crate::domain::values::commodity::Commodity;
use chrono::NaiveDate;
use serde::Serialize;

/// One dated observation: the modelled price response and its sentiment features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRow {
    pub date: NaiveDate,
    pub price: f64,
    /// Log return of the price into `date`.
    pub target: f64,
    /// Aligned with `ModelDataset::feature_names`.
    pub features: Vec<f64>,
}

/// Dataset built for one commodity, keyed by date in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDataset {
    pub commodity: Commodity,
    pub feature_names: Vec<String>,
    pub rows: Vec<ModelRow>,
}

impl ModelDataset {
    pub fn new(commodity: Commodity, feature_names: Vec<String>) -> Self {
        Self {
            commodity,
            feature_names,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }
}

pub fn feature_name(commodity: &Commodity) -> String {
    format!("sentiment_{commodity}")
}
