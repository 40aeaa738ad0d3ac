pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::compute_market_force::{ComputeMarketForceUseCase, MarketForceReport};
use crate::application::import::ImportUseCase;
use crate::application::pipeline::PipelineGraph;
use crate::application::show::ShowUseCase;
use crate::config::MarketForceConfig;
use crate::domain::entities::sentiment_series::SentimentRow;
use crate::domain::error::DomainError;
use crate::domain::ports::market_force_store::MarketForceStore;
use crate::domain::ports::sentiment_plotter::SentimentPlotter;
use crate::domain::ports::upstream_repository::UpstreamRepository;
use crate::infrastructure::model::ridge_market_model::RidgeMarketModel;
use crate::infrastructure::plots::noop::NoopPlotter;
use crate::infrastructure::plots::svg::SvgSentimentPlotter;
use crate::infrastructure::sqlite::market_force_store::SqliteMarketForceStore;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::shared;
use crate::infrastructure::sqlite::upstream_repo::SqliteUpstreamRepo;
use rusqlite::Connection;
use std::io::Read;
use std::sync::Arc;

pub struct ReadingMachine {
    upstream: Arc<dyn UpstreamRepository>,
    store: Arc<dyn MarketForceStore>,
    plotter_override: Option<Arc<dyn SentimentPlotter>>,
    import_uc: ImportUseCase,
    show_uc: ShowUseCase,
}

impl ReadingMachine {
    /// Plots follow `MarketForceConfig::plot_dir`.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        Self::open(db_path, None)
    }

    /// Every run uses `plotter`, whatever the config says.
    pub fn with_plotter(
        db_path: &str,
        plotter: Arc<dyn SentimentPlotter>,
    ) -> Result<Self, DomainError> {
        Self::open(db_path, Some(plotter))
    }

    fn open(
        db_path: &str,
        plotter_override: Option<Arc<dyn SentimentPlotter>>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        if db_path != ":memory:" {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        }
        run_migrations(&conn)?;

        let conn = shared(conn);
        let upstream: Arc<dyn UpstreamRepository> = Arc::new(SqliteUpstreamRepo::new(conn.clone()));
        let store: Arc<dyn MarketForceStore> = Arc::new(SqliteMarketForceStore::new(conn));

        Ok(Self {
            import_uc: ImportUseCase::new(upstream.clone()),
            show_uc: ShowUseCase::new(store.clone()),
            upstream,
            store,
            plotter_override,
        })
    }

    pub fn compute_market_force(&self, config: &MarketForceConfig) -> Result<MarketForceReport, DomainError> {
        let plotter: Arc<dyn SentimentPlotter> = match (&self.plotter_override, &config.plot_dir) {
            (Some(p), _) => p.clone(),
            (None, Some(dir)) => Arc::new(SvgSentimentPlotter::new(dir.clone())),
            (None, None) => Arc::new(NoopPlotter),
        };
        let model = Arc::new(RidgeMarketModel::new(self.upstream.clone(), config.ridge_alpha));
        ComputeMarketForceUseCase::new(model, plotter, self.store.clone()).execute(config)
    }

    pub fn import_prices<R: Read>(&self, reader: R) -> Result<usize, DomainError> {
        self.import_uc.import_prices(reader)
    }

    pub fn import_sentiments<R: Read>(&self, reader: R) -> Result<usize, DomainError> {
        self.import_uc.import_sentiments(reader)
    }

    pub fn market_force(
        &self,
        table: &str,
        date_column: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SentimentRow>, DomainError> {
        self.show_uc.execute(table, date_column, limit)
    }

    pub fn pipeline(&self) -> PipelineGraph {
        PipelineGraph::reading_machine()
    }
}
