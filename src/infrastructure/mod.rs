pub mod model;
pub mod plots;
pub mod sqlite;
