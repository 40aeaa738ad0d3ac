use crate::domain::entities::sentiment_series::SentimentSeries;
use crate::domain::error::DomainError;
use crate::domain::ports::sentiment_plotter::SentimentPlotter;
use crate::domain::values::commodity::Commodity;

pub struct NoopPlotter;

impl SentimentPlotter for NoopPlotter {
    fn create_sentiment_plot(
        &self,
        _series: &SentimentSeries,
        _commodity: &Commodity,
    ) -> Result<(), DomainError> {
        Ok(())
    }
}
