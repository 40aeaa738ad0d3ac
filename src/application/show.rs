use crate::domain::entities::sentiment_series::SentimentRow;
use crate::domain::error::DomainError;
use crate::domain::ports::market_force_store::MarketForceStore;
use std::sync::Arc;

pub struct ShowUseCase {
    store: Arc<dyn MarketForceStore>,
}

impl ShowUseCase {
    pub fn new(store: Arc<dyn MarketForceStore>) -> Self {
        Self { store }
    }

    pub fn execute(
        &self,
        table: &str,
        date_column: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SentimentRow>, DomainError> {
        self.store.load_table(table, date_column, limit)
    }
}
