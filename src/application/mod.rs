pub mod compute_market_force;
pub mod import;
pub mod pipeline;
pub mod show;
