pub mod model_dataset;
pub mod sentiment_series;
pub mod sentiment_weights;
