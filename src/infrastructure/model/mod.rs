pub mod ridge;
pub mod ridge_market_model;
