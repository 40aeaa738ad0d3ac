pub mod market_force_store;
pub mod migrations;
pub mod upstream_repo;

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// One connection shared by every SQLite adapter, so an in-memory database
/// is seen by all of them.
pub type SharedConnection = Arc<Mutex<Connection>>;

pub fn shared(conn: Connection) -> SharedConnection {
    Arc::new(Mutex::new(conn))
}
