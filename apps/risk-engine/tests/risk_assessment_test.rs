//! Risk Assessment Integration Tests
//!
//! Max-loss properties, the classifier decision table, suggestion day
//! boundaries and an end-to-end assessment through the in-memory store.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use risk_engine::application::ports::HoldingsStore;
use risk_engine::config::RiskConfig;
use risk_engine::domain::holdings::{Direction, OptionHolding, OptionType, Portfolio, StockHolding};
use risk_engine::domain::risk_management::{
    MaxLossEstimator, PortfolioAggregator, PortfolioHoldings, RiskClassifier, RiskEngine,
    RiskLevel, RiskThresholds, SuggestionAction, SuggestionGenerator, SuggestionPriority, TieringPolicy,
};
use risk_engine::domain::shared::{Money, PortfolioId, UserId};
use risk_engine::{AssessRiskUseCase, ErrorCode, InMemoryHoldingsStore, RiskMetricsDto};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_case::test_case;

fn option(
    option_type: OptionType,
    direction: Direction,
    contracts: u32,
    strike: Decimal,
    cost: Decimal,
    expiration: NaiveDate,
) -> OptionHolding {
    OptionHolding::new(
        PortfolioId::new("pf-it"),
        "XYZ-OPT",
        "XYZ",
        option_type,
        direction,
        contracts,
        strike,
        expiration,
        cost,
    )
}

fn far_expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 12, 18).unwrap()
}

// ============================================
// Max loss properties
// ============================================

proptest! {
    #[test]
    fn prop_short_put_max_loss_is_never_negative(
        contracts in 1u32..1_000,
        strike_cents in 0i64..1_000_000,
        cost_cents in 0i64..1_000_000,
    ) {
        let holding = option(
            OptionType::Put,
            Direction::Sell,
            contracts,
            Decimal::new(strike_cents, 2),
            Decimal::new(cost_cents, 2),
            far_expiry(),
        );
        let loss = MaxLossEstimator::default().estimate(&holding, None).unwrap();
        prop_assert!(loss >= Money::ZERO);
    }

    #[test]
    fn prop_long_option_max_loss_is_premium_paid(
        contracts in 1u32..1_000,
        cost_cents in 0i64..1_000_000,
        is_call in any::<bool>(),
    ) {
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };
        let cost = Decimal::new(cost_cents, 2);
        let holding = option(option_type, Direction::Buy, contracts, dec!(100), cost, far_expiry());

        let loss = MaxLossEstimator::default().estimate(&holding, Some(dec!(250))).unwrap();
        prop_assert_eq!(loss.amount(), cost * Decimal::from(contracts) * dec!(100));
    }

    #[test]
    fn prop_short_call_scales_with_multiplier(
        contracts in 1u32..100,
        underlying_cents in 1i64..100_000,
    ) {
        let underlying = Decimal::new(underlying_cents, 2);
        let holding = option(OptionType::Call, Direction::Sell, contracts, dec!(50), dec!(1), far_expiry());

        let base = MaxLossEstimator::new(dec!(1)).estimate(&holding, Some(underlying)).unwrap();
        let tripled = MaxLossEstimator::new(dec!(3)).estimate(&holding, Some(underlying)).unwrap();
        prop_assert_eq!(tripled.amount(), base.amount() * dec!(3));
    }
}

// ============================================
// Classifier decision table
// ============================================

#[test_case(dec!(0.5), dec!(5), Some(dec!(80)) => RiskLevel::Green ; "all factors healthy")]
#[test_case(dec!(1.0), dec!(5), Some(dec!(80)) => RiskLevel::Yellow ; "leverage at yellow threshold")]
#[test_case(dec!(1.5), dec!(5), Some(dec!(80)) => RiskLevel::Red ; "leverage at red threshold")]
#[test_case(dec!(0.5), dec!(10), Some(dec!(80)) => RiskLevel::Yellow ; "concentration at yellow threshold")]
#[test_case(dec!(0.5), dec!(20), Some(dec!(80)) => RiskLevel::Red ; "concentration at red threshold")]
#[test_case(dec!(0.5), dec!(5), Some(dec!(29.99)) => RiskLevel::Yellow ; "liquidity below yellow")]
#[test_case(dec!(0.5), dec!(5), Some(dec!(30)) => RiskLevel::Green ; "liquidity at yellow threshold")]
#[test_case(dec!(0.5), dec!(5), Some(dec!(14)) => RiskLevel::Red ; "liquidity below red")]
#[test_case(dec!(0.5), dec!(5), None => RiskLevel::Green ; "unknown liquidity is skipped")]
#[test_case(dec!(1.2), dec!(25), Some(dec!(80)) => RiskLevel::Red ; "red factor beats yellow factor")]
fn test_three_factor_tiering(
    leverage: Decimal,
    concentration: Decimal,
    liquidity: Option<Decimal>,
) -> RiskLevel {
    RiskClassifier::default().classify(leverage, concentration, liquidity)
}

#[test_case(dec!(0.5), dec!(90), Some(dec!(1)) => RiskLevel::Green ; "other factors ignored")]
#[test_case(dec!(1.1), dec!(0), Some(dec!(100)) => RiskLevel::Yellow ; "yellow by leverage")]
#[test_case(dec!(2.0), dec!(0), Some(dec!(100)) => RiskLevel::Red ; "red by leverage")]
fn test_leverage_only_tiering(
    leverage: Decimal,
    concentration: Decimal,
    liquidity: Option<Decimal>,
) -> RiskLevel {
    RiskClassifier::new(RiskThresholds::default(), TieringPolicy::LeverageOnly)
        .classify(leverage, concentration, liquidity)
}

// ============================================
// Suggestion day boundaries
// ============================================

#[test_case(0 => None ; "expiring today is not flagged")]
#[test_case(1 => Some((SuggestionAction::HandleExpiration, SuggestionPriority::High)) ; "one day")]
#[test_case(7 => Some((SuggestionAction::HandleExpiration, SuggestionPriority::High)) ; "last urgent day")]
#[test_case(8 => Some((SuggestionAction::RolloverOption, SuggestionPriority::Medium)) ; "first rollover day")]
#[test_case(60 => Some((SuggestionAction::RolloverOption, SuggestionPriority::Medium)) ; "last rollover day")]
#[test_case(61 => None ; "outside rollover window")]
fn test_expiration_suggestion_by_days(
    days: i64,
) -> Option<(SuggestionAction, SuggestionPriority)> {
    let now = Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap();
    let expiration = (now + Duration::days(days)).date_naive();
    let holding = option(OptionType::Put, Direction::Sell, 1, dec!(50), dec!(2), expiration);
    let portfolio = Portfolio::new(PortfolioId::new("pf-it"), UserId::new("u"), dec!(100000));

    let metrics = PortfolioAggregator::default()
        .aggregate(&portfolio, &[], std::slice::from_ref(&holding))
        .unwrap();
    let suggestions = SuggestionGenerator::default().generate(&metrics, &[], &[holding], now);

    assert!(suggestions.len() <= 1);
    suggestions.first().map(|s| (s.action, s.priority))
}

// ============================================
// End-to-end assessment
// ============================================

async fn seeded_store() -> Arc<InMemoryHoldingsStore> {
    let pid = PortfolioId::new("pf-it");
    let store = Arc::new(InMemoryHoldingsStore::new());
    store.insert_portfolio(
        Portfolio::new(pid.clone(), UserId::new("owner"), dec!(100000)).with_margin_used(dec!(20000)),
    );
    store
        .create_stock_holding(
            StockHolding::new(pid.clone(), "AAPL", 100, dec!(150))
                .with_current_price(dec!(200))
                .with_beta(dec!(1.2)),
        )
        .await
        .unwrap();
    store
        .create_option_holding(OptionHolding::new(
            pid,
            "AAPL991218P00180000",
            "AAPL",
            OptionType::Put,
            Direction::Sell,
            1,
            dec!(180),
            far_expiry(),
            dec!(5),
        ))
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn test_assessment_end_to_end() {
    let store = seeded_store().await;
    let use_case = AssessRiskUseCase::new(
        Arc::clone(&store),
        RiskEngine::default(),
        SuggestionGenerator::default(),
    );
    let owner = UserId::new("owner");
    let pid = PortfolioId::new("pf-it");

    let risk = use_case.assess(&owner, &pid).await.unwrap();

    // Single stock is 100% concentrated, which alone is RED.
    assert_eq!(risk.risk_level, RiskLevel::Red);
    assert_eq!(risk.metrics.stock_value, Money::new(dec!(20000)));
    assert_eq!(risk.metrics.option_max_loss, Money::new(dec!(17500)));
    assert_eq!(risk.metrics.leverage_ratio, dec!(0.375));
    assert_eq!(risk.metrics.portfolio_beta, dec!(1.2));
    assert_eq!(risk.metrics.max_concentration_symbol.as_deref(), Some("AAPL"));

    let dto = RiskMetricsDto::from(&risk);
    assert_eq!(dto.risk_level, "RED");
    assert_eq!(dto.leverage_ratio, "0.3750");
    assert_eq!(dto.max_concentration, "100.00");
    assert_eq!(dto.margin_usage_ratio, "20.00");
    assert_eq!(dto.remaining_liquidity.as_deref(), Some("80.00"));

    let snapshot = use_case.latest_snapshot(&owner, &pid).await.unwrap();
    assert_eq!(snapshot, Some(risk));
}

#[tokio::test]
async fn test_leverage_only_policy_from_config() {
    let store = seeded_store().await;
    let config = RiskConfig {
        policy: TieringPolicy::LeverageOnly,
        ..Default::default()
    };
    let use_case =
        AssessRiskUseCase::new(store, config.engine(), SuggestionGenerator::default());

    let risk = use_case
        .assess(&UserId::new("owner"), &PortfolioId::new("pf-it"))
        .await
        .unwrap();
    assert_eq!(risk.risk_level, RiskLevel::Green);
}

#[tokio::test]
async fn test_suggestions_end_to_end() {
    let store = seeded_store().await;
    let use_case =
        AssessRiskUseCase::new(store, RiskEngine::default(), SuggestionGenerator::default());

    let suggestions = use_case
        .suggest(&UserId::new("owner"), &PortfolioId::new("pf-it"))
        .await
        .unwrap();

    // Liquidity is 80% and the option is years out, so only concentration fires.
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].action, SuggestionAction::ReducePosition);
    assert_eq!(suggestions[0].priority, SuggestionPriority::High);
}

#[tokio::test]
async fn test_assessment_of_foreign_portfolio_is_forbidden() {
    let store = seeded_store().await;
    let use_case =
        AssessRiskUseCase::new(store, RiskEngine::default(), SuggestionGenerator::default());

    let err = use_case
        .assess(&UserId::new("stranger"), &PortfolioId::new("pf-it"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[test]
fn test_batch_assessment_keeps_input_order() {
    let at = Utc::now();
    let batch: Vec<_> = (1..=4)
        .map(|i| {
            let pid = PortfolioId::new(format!("pf-{i}"));
            let portfolio = Portfolio::new(pid.clone(), UserId::new("u"), dec!(10000));
            let stock = StockHolding::new(pid, format!("S{i}"), i64::from(i) * 50, dec!(100));
            PortfolioHoldings::new(portfolio, vec![stock], vec![])
        })
        .collect();

    let results = RiskEngine::default().assess_batch(&batch, at);
    let leverage: Vec<Decimal> = results
        .into_iter()
        .map(|r| r.unwrap().metrics.leverage_ratio)
        .collect();
    assert_eq!(leverage, vec![dec!(0.5), dec!(1), dec!(1.5), dec!(2)]);
}
