use crate::domain::entities::sentiment_series::SentimentSeries;
use crate::domain::error::DomainError;
use crate::domain::values::commodity::Commodity;

/// Produces a diagnostic chart of one commodity's series. Side effect only.
pub trait SentimentPlotter: Send + Sync {
    fn create_sentiment_plot(
        &self,
        series: &SentimentSeries,
        commodity: &Commodity,
    ) -> Result<(), DomainError>;
}
