pub mod market_force_store;
pub mod market_model;
pub mod sentiment_plotter;
pub mod upstream_repository;
