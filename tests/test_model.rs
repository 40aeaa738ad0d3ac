mod common;

use common::*;
use reading_machine::domain::error::DomainError;
use reading_machine::domain::ports::market_model::MarketModel;
use reading_machine::domain::ports::upstream_repository::{
    PriceObservation, SentimentObservation, UpstreamRepository,
};
use reading_machine::infrastructure::model::ridge_market_model::RidgeMarketModel;
use reading_machine::infrastructure::sqlite::migrations::run_migrations;
use reading_machine::infrastructure::sqlite::shared;
use reading_machine::infrastructure::sqlite::upstream_repo::SqliteUpstreamRepo;
use rusqlite::Connection;
use std::sync::Arc;

fn model_with(prices: &[(&str, i64, f64)], sentiments: &[(&str, i64, f64)]) -> RidgeMarketModel {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    let repo = Arc::new(SqliteUpstreamRepo::new(shared(conn)));
    let prices: Vec<PriceObservation> = prices
        .iter()
        .map(|(c, d, p)| PriceObservation {
            date: day() + chrono::Duration::days(*d),
            commodity: commodity(c),
            price: *p,
        })
        .collect();
    let sentiments: Vec<SentimentObservation> = sentiments
        .iter()
        .map(|(c, d, s)| SentimentObservation {
            date: day() + chrono::Duration::days(*d),
            commodity: commodity(c),
            sentiment: *s,
        })
        .collect();
    repo.add_prices(&prices).unwrap();
    repo.add_sentiments(&sentiments).unwrap();
    RidgeMarketModel::new(repo, 0.0)
}

#[test]
fn test_dataset_uses_every_commodity_as_feature() {
    let model = model_with(
        &[("Wheat", 0, 100.0), ("Wheat", 1, 110.0), ("Wheat", 2, 99.0)],
        &[("Wheat", 1, 0.5), ("GOI", 1, -0.2), ("GOI", 2, 0.3)],
    );
    let all = commodities(&["GOI", "Wheat"]);

    let dataset = model.create_model_data(&commodity("Wheat"), &all).unwrap();

    assert_eq!(dataset.feature_names, vec!["sentiment_GOI", "sentiment_Wheat"]);
    assert_eq!(dataset.len(), 2);
    assert!((dataset.rows[0].target - (1.1_f64).ln()).abs() < 1e-12);
    assert_eq!(dataset.rows[0].features, vec![-0.2, 0.5]);
    // Wheat has no score on day 2: neutral.
    assert_eq!(dataset.rows[1].features, vec![0.3, 0.0]);
    assert_eq!(dataset.rows[1].price, 99.0);
}

#[test]
fn test_non_positive_prices_are_skipped() {
    let model = model_with(
        &[("Rice", 0, 10.0), ("Rice", 1, 0.0), ("Rice", 2, 12.0), ("Rice", 3, 13.0)],
        &[],
    );
    let dataset = model
        .create_model_data(&commodity("Rice"), &commodities(&["Rice"]))
        .unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.rows[0].date, day() + chrono::Duration::days(3));
}

#[test]
fn test_unknown_commodity_rejected() {
    let model = model_with(&[], &[]);
    let err = model
        .create_model_data(&commodity("Cocoa"), &commodities(&["GOI", "Wheat"]))
        .unwrap_err();
    assert!(matches!(err, DomainError::UnknownCommodity { .. }));
}

#[test]
fn test_weights_and_series_follow_sentiment() {
    // Return = 0.02 * sentiment exactly.
    let sentiment = [0.0, 0.5, -1.0, 0.25, 1.0, -0.5];
    let mut log_price = 100.0_f64.ln();
    let mut prices = vec![("Maize", 0, log_price.exp())];
    let mut scores = Vec::new();
    for (d, s) in sentiment.iter().enumerate().skip(1) {
        log_price += 0.02 * s;
        prices.push(("Maize", d as i64, log_price.exp()));
        scores.push(("Maize", d as i64, *s));
    }
    let model = model_with(&prices, &scores);
    let maize = commodity("Maize");
    let all = commodities(&["Maize"]);

    let dataset = model.create_model_data(&maize, &all).unwrap();
    let weights = model.estimate_sentiment_weights(&dataset, &maize).unwrap();
    assert!((weights.weight_of("sentiment_Maize").unwrap() - 0.02).abs() < 1e-6);
    assert!(weights.intercept.abs() < 1e-6);

    let series = model
        .compute_market_sentiments(&dataset, &weights, "date", &maize)
        .unwrap();
    assert_eq!(series.len(), 5);
    assert_eq!(series.date_column, "date");
    for (row, s) in series.rows.iter().zip(&sentiment[1..]) {
        assert!((row.market_force - 0.02 * s).abs() < 1e-6);
        assert_eq!(row.commodity, maize);
    }
}

#[test]
fn test_weights_require_matching_dataset() {
    let model = model_with(&[("GOI", 0, 1.0), ("GOI", 1, 2.0), ("GOI", 2, 3.0)], &[]);
    let goi = commodity("GOI");
    let dataset = model.create_model_data(&goi, &commodities(&["GOI"])).unwrap();

    let err = model
        .estimate_sentiment_weights(&dataset, &commodity("Wheat"))
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[test]
fn test_series_rejects_foreign_weights() {
    let model = model_with(
        &[("GOI", 0, 1.0), ("GOI", 1, 2.0), ("GOI", 2, 3.0), ("GOI", 3, 3.5)],
        &[("GOI", 1, 0.1), ("GOI", 2, 0.4), ("GOI", 3, -0.3)],
    );
    let goi = commodity("GOI");
    let one = model.create_model_data(&goi, &commodities(&["GOI"])).unwrap();
    let two = model
        .create_model_data(&goi, &commodities(&["GOI", "Wheat"]))
        .unwrap();
    let weights = model.estimate_sentiment_weights(&one, &goi).unwrap();

    assert!(matches!(
        model.compute_market_sentiments(&two, &weights, "date", &goi),
        Err(DomainError::InvalidInput(_))
    ));
}
