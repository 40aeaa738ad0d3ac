use crate::domain::error::DomainError;
use crate::domain::ports::market_force_store::VALUE_COLUMNS;
use crate::domain::ports::upstream_repository::UPSTREAM_TABLES;
use crate::domain::values::commodity::Commodity;
use crate::domain::values::identifier::validate_identifier;
use serde::Serialize;
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "./reading_machine.db";
pub const DEFAULT_TARGET_TABLE: &str = "MarketForce";
pub const DEFAULT_DATE_COLUMN: &str = "date";

/// Parameters of one market-force run.
#[derive(Debug, Clone, Serialize)]
pub struct MarketForceConfig {
    /// Processing order, also the order rows are published in.
    pub commodities: Vec<Commodity>,
    pub target_table: String,
    pub date_column: String,
    /// L2 penalty of the weight estimator.
    pub ridge_alpha: f64,
    /// `None` disables diagnostic plots.
    pub plot_dir: Option<PathBuf>,
}

impl Default for MarketForceConfig {
    fn default() -> Self {
        Self {
            commodities: Commodity::defaults(),
            target_table: DEFAULT_TARGET_TABLE.to_string(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            ridge_alpha: 1.0,
            plot_dir: None,
        }
    }
}

impl MarketForceConfig {
    /// Defaults overridden by `READING_MACHINE_*` environment variables.
    pub fn from_env() -> Result<Self, DomainError> {
        let mut config = Self::default();

        if let Ok(list) = env::var("READING_MACHINE_COMMODITIES") {
            config.commodities = Commodity::parse_list(&list).map_err(DomainError::InvalidInput)?;
        }
        if let Ok(table) = env::var("READING_MACHINE_TARGET_TABLE") {
            config.target_table = table;
        }
        if let Ok(alpha) = env::var("READING_MACHINE_RIDGE_ALPHA") {
            config.ridge_alpha = alpha
                .parse()
                .map_err(|e| DomainError::Parse(format!("READING_MACHINE_RIDGE_ALPHA '{alpha}': {e}")))?;
        }
        if let Ok(dir) = env::var("READING_MACHINE_PLOT_DIR") {
            if !dir.is_empty() {
                config.plot_dir = Some(PathBuf::from(dir));
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.commodities.is_empty() {
            return Err(DomainError::InvalidInput("Commodity list must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for c in &self.commodities {
            if !seen.insert(c) {
                return Err(DomainError::InvalidInput(format!("Duplicate commodity: {c}")));
            }
        }
        validate_identifier(&self.target_table)?;
        // SQLite identifiers are case-insensitive.
        if let Some(table) = UPSTREAM_TABLES
            .iter()
            .find(|t| t.eq_ignore_ascii_case(&self.target_table))
        {
            return Err(DomainError::InvalidInput(format!(
                "Target table '{}' would overwrite upstream table {table}",
                self.target_table
            )));
        }
        validate_identifier(&self.date_column)?;
        if VALUE_COLUMNS
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&self.date_column))
        {
            return Err(DomainError::InvalidInput(format!(
                "Date column '{}' clashes with a market force column ({})",
                self.date_column,
                VALUE_COLUMNS.join(", ")
            )));
        }
        if !self.ridge_alpha.is_finite() || self.ridge_alpha < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Ridge alpha must be finite and >= 0, got {}",
                self.ridge_alpha
            )));
        }
        Ok(())
    }
}

pub fn db_path_from_env() -> String {
    env::var("READING_MACHINE_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.into())
}
