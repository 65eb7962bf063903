//! Rollover Saga Integration Tests
//!
//! Drives `RollOptionUseCase` against a store that fails on demand at each
//! write step, and checks that the compensating actions leave the holdings
//! exactly as they were before the call.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use risk_engine::application::ports::{HoldingsStore, OptionHoldingPatch, StoreError};
use risk_engine::application::use_cases::{RollOptionUseCase, RolloverHistoryUseCase};
use risk_engine::domain::holdings::{
    Direction, OptionHolding, OptionStatus, OptionType, Portfolio, RolloverRecord, StockHolding,
};
use risk_engine::domain::risk_management::RiskMetrics;
use risk_engine::domain::shared::{HoldingId, Money, PortfolioId, UserId};
use risk_engine::{ErrorCode, InMemoryHoldingsStore, RolloverCommand};
use rust_decimal_macros::dec;

// ============================================
// Fault-injecting store
// ============================================

/// Which writes should fail.
#[derive(Default)]
struct Faults {
    create_holding: AtomicBool,
    mark_rolled: AtomicBool,
    reactivate: AtomicBool,
    delete_holding: AtomicBool,
    create_record: AtomicBool,
}

/// In-memory store with switchable write failures.
///
/// With `assign_ids` set it also replaces the id of every inserted option lot,
/// the way a database assigning its own keys would.
struct FaultyStore {
    inner: InMemoryHoldingsStore,
    faults: Faults,
    assign_ids: AtomicBool,
    next_row: AtomicU64,
}

impl FaultyStore {
    fn new() -> Self {
        Self {
            inner: InMemoryHoldingsStore::new(),
            faults: Faults::default(),
            assign_ids: AtomicBool::new(false),
            next_row: AtomicU64::new(1),
        }
    }

    fn fail(flag: &AtomicBool, op: &str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(format!("injected failure: {op}")));
        }
        Ok(())
    }
}

#[async_trait]
impl HoldingsStore for FaultyStore {
    async fn get_portfolio(&self, id: &PortfolioId) -> Result<Portfolio, StoreError> {
        self.inner.get_portfolio(id).await
    }

    async fn get_stock_holdings(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Vec<StockHolding>, StoreError> {
        self.inner.get_stock_holdings(portfolio_id).await
    }

    async fn create_stock_holding(
        &self,
        holding: StockHolding,
    ) -> Result<StockHolding, StoreError> {
        self.inner.create_stock_holding(holding).await
    }

    async fn delete_stock_holding(&self, id: &HoldingId) -> Result<(), StoreError> {
        self.inner.delete_stock_holding(id).await
    }

    async fn get_option_holdings(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Vec<OptionHolding>, StoreError> {
        self.inner.get_option_holdings(portfolio_id).await
    }

    async fn get_option_holding(&self, id: &HoldingId) -> Result<OptionHolding, StoreError> {
        self.inner.get_option_holding(id).await
    }

    async fn create_option_holding(
        &self,
        mut holding: OptionHolding,
    ) -> Result<OptionHolding, StoreError> {
        Self::fail(&self.faults.create_holding, "create option holding")?;
        if self.assign_ids.load(Ordering::SeqCst) {
            let row = self.next_row.fetch_add(1, Ordering::SeqCst);
            holding.id = HoldingId::new(format!("db-assigned-{row}"));
        }
        self.inner.create_option_holding(holding).await
    }

    async fn update_option_holding(
        &self,
        id: &HoldingId,
        patch: OptionHoldingPatch,
    ) -> Result<OptionHolding, StoreError> {
        match patch.status {
            Some(OptionStatus::Rolled) => Self::fail(&self.faults.mark_rolled, "mark rolled")?,
            Some(OptionStatus::Active) => Self::fail(&self.faults.reactivate, "reactivate")?,
            _ => {}
        }
        self.inner.update_option_holding(id, patch).await
    }

    async fn delete_option_holding(&self, id: &HoldingId) -> Result<(), StoreError> {
        Self::fail(&self.faults.delete_holding, "delete option holding")?;
        self.inner.delete_option_holding(id).await
    }

    async fn create_rollover_record(
        &self,
        record: RolloverRecord,
    ) -> Result<RolloverRecord, StoreError> {
        Self::fail(&self.faults.create_record, "create rollover record")?;
        self.inner.create_rollover_record(record).await
    }

    async fn list_rollover_records(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Vec<RolloverRecord>, StoreError> {
        self.inner.list_rollover_records(portfolio_id).await
    }

    async fn save_risk_snapshot(&self, snapshot: RiskMetrics) -> Result<(), StoreError> {
        self.inner.save_risk_snapshot(snapshot).await
    }

    async fn latest_risk_snapshot(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Option<RiskMetrics>, StoreError> {
        self.inner.latest_risk_snapshot(portfolio_id).await
    }
}

// ============================================
// Fixtures
// ============================================

fn pid() -> PortfolioId {
    PortfolioId::new("pf-saga")
}

fn user() -> UserId {
    UserId::new("user-saga")
}

async fn seeded_store() -> (Arc<FaultyStore>, OptionHolding) {
    let store = Arc::new(FaultyStore::new());
    store
        .inner
        .insert_portfolio(Portfolio::new(pid(), user(), dec!(100000)));

    let old = store
        .create_option_holding(
            OptionHolding::new(
                pid(),
                "TSLA250117C00400000",
                "TSLA",
                OptionType::Call,
                Direction::Sell,
                3,
                dec!(400),
                NaiveDate::from_ymd_opt(2025, 1, 17).unwrap(),
                dec!(8.00),
            )
            .with_current_price(dec!(6.50)),
        )
        .await
        .unwrap();

    (store, old)
}

fn command(old: &OptionHolding) -> RolloverCommand {
    RolloverCommand {
        user_id: user(),
        portfolio_id: pid(),
        old_holding_id: old.id.clone(),
        close_price: dec!(6.50),
        close_contracts: 3,
        new_option_symbol: "TSLA250221C00420000".to_string(),
        new_strike_price: dec!(420),
        new_expiration_date: NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(),
        open_price: dec!(9.25),
        open_contracts: 3,
        fees: Some(dec!(3.90)),
        notes: Some("roll up and out".to_string()),
        rollover_date: None,
    }
}

async fn holdings(store: &FaultyStore) -> Vec<OptionHolding> {
    store.get_option_holdings(&pid()).await.unwrap()
}

async fn records(store: &FaultyStore) -> Vec<RolloverRecord> {
    store.list_rollover_records(&pid()).await.unwrap()
}

// ============================================
// Happy path
// ============================================

#[tokio::test]
async fn test_rollover_writes_all_three_steps() {
    let (store, old) = seeded_store().await;
    let use_case = RollOptionUseCase::new(Arc::clone(&store));

    let outcome = use_case.execute(command(&old)).await.unwrap();

    // (8.00 - 6.50) * 3 * 100 - 3.90
    assert_eq!(outcome.realized_pnl, Money::new(dec!(446.10)));
    assert!(!outcome.partial_close);

    let after = holdings(&store).await;
    assert_eq!(after.len(), 2);
    let old_after = after.iter().find(|h| h.id == old.id).unwrap();
    assert_eq!(old_after.status, OptionStatus::Rolled);
    assert_eq!(old_after.closed_at, Some(outcome.rollover_date));

    let new_after = after.iter().find(|h| h.id == outcome.new_holding.id).unwrap();
    assert_eq!(new_after.status, OptionStatus::Active);
    assert_eq!(new_after.underlying_symbol, "TSLA");
    assert_eq!(new_after.direction, Direction::Sell);
    assert_eq!(new_after.cost_price, dec!(9.25));

    let ledger = records(&store).await;
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].id, outcome.rollover_id);
    assert_eq!(ledger[0].old_holding_id, old.id);
    assert_eq!(ledger[0].new_holding_id, outcome.new_holding.id);
    assert_eq!(ledger[0].fees, Some(dec!(3.90)));
}

#[tokio::test]
async fn test_history_lists_completed_rollovers() {
    let (store, old) = seeded_store().await;
    let roll = RollOptionUseCase::new(Arc::clone(&store));
    let first = roll.execute(command(&old)).await.unwrap();

    let mut second_cmd = command(&first.new_holding);
    second_cmd.close_price = dec!(10.25);
    second_cmd.new_option_symbol = "TSLA250321C00440000".to_string();
    second_cmd.new_expiration_date = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
    second_cmd.fees = None;
    let second = roll.execute(second_cmd).await.unwrap();

    // Short call closed above its premium loses (9.25 - 10.25) * 300.
    assert_eq!(second.realized_pnl, Money::new(dec!(-300)));

    let history = RolloverHistoryUseCase::new(Arc::clone(&store))
        .execute(&user(), &pid())
        .await
        .unwrap();
    assert_eq!(history.records.len(), 2);
    assert_eq!(history.records[0].id, second.rollover_id);
    assert_eq!(history.total_realized_pnl, Money::new(dec!(146.10)));
}

#[tokio::test]
async fn test_record_links_store_assigned_replacement_id() {
    let (store, old) = seeded_store().await;
    store.assign_ids.store(true, Ordering::SeqCst);

    let outcome = RollOptionUseCase::new(Arc::clone(&store))
        .execute(command(&old))
        .await
        .unwrap();

    assert_eq!(outcome.new_holding.id, HoldingId::new("db-assigned-1"));
    let ledger = records(&store).await;
    assert_eq!(ledger[0].new_holding_id, outcome.new_holding.id);
    assert!(
        holdings(&store)
            .await
            .iter()
            .any(|h| h.id == ledger[0].new_holding_id)
    );
}

// ============================================
// Compensation
// ============================================

#[tokio::test]
async fn test_failed_insert_writes_nothing() {
    let (store, old) = seeded_store().await;
    let before = holdings(&store).await;
    store.faults.create_holding.store(true, Ordering::SeqCst);

    let err = RollOptionUseCase::new(Arc::clone(&store))
        .execute(command(&old))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DependencyFailure);
    assert_eq!(holdings(&store).await, before);
    assert!(records(&store).await.is_empty());
}

#[tokio::test]
async fn test_failed_status_update_deletes_replacement() {
    let (store, old) = seeded_store().await;
    let before = holdings(&store).await;
    store.faults.mark_rolled.store(true, Ordering::SeqCst);

    let err = RollOptionUseCase::new(Arc::clone(&store))
        .execute(command(&old))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DependencyFailure);
    assert_eq!(holdings(&store).await, before);
    assert!(records(&store).await.is_empty());
}

#[tokio::test]
async fn test_failed_record_reactivates_old_and_deletes_replacement() {
    let (store, old) = seeded_store().await;
    let before = holdings(&store).await;
    store.faults.create_record.store(true, Ordering::SeqCst);

    let err = RollOptionUseCase::new(Arc::clone(&store))
        .execute(command(&old))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DependencyFailure);
    let after = holdings(&store).await;
    assert_eq!(after, before);
    assert_eq!(after[0].status, OptionStatus::Active);
    assert_eq!(after[0].closed_at, None);
    assert!(records(&store).await.is_empty());
}

#[tokio::test]
async fn test_failed_compensation_still_reports_original_failure() {
    let (store, old) = seeded_store().await;
    store.faults.create_record.store(true, Ordering::SeqCst);
    store.faults.delete_holding.store(true, Ordering::SeqCst);

    let err = RollOptionUseCase::new(Arc::clone(&store))
        .execute(command(&old))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DependencyFailure);
    assert!(err.to_string().contains("create rollover record"));

    // Reactivation still ran; only the orphan replacement is left behind.
    let after = holdings(&store).await;
    assert_eq!(after.len(), 2);
    let old_after = after.iter().find(|h| h.id == old.id).unwrap();
    assert_eq!(old_after.status, OptionStatus::Active);
}

#[tokio::test]
async fn test_rollback_allows_retry() {
    let (store, old) = seeded_store().await;
    let use_case = RollOptionUseCase::new(Arc::clone(&store));

    store.faults.create_record.store(true, Ordering::SeqCst);
    assert!(use_case.execute(command(&old)).await.is_err());

    store.faults.create_record.store(false, Ordering::SeqCst);
    let outcome = use_case.execute(command(&old)).await.unwrap();
    assert_eq!(outcome.old_holding.status, OptionStatus::Rolled);
    assert_eq!(holdings(&store).await.len(), 2);
    assert_eq!(records(&store).await.len(), 1);
}
