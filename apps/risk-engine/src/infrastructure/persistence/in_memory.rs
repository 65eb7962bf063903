//! In-memory holdings store.
//!
//! Backs guest sessions and tests. State lives as long as the store value;
//! there is no global instance, so callers construct and pass one explicitly.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{HoldingsStore, OptionHoldingPatch, StoreError};
use crate::domain::holdings::{OptionHolding, Portfolio, RolloverRecord, StockHolding};
use crate::domain::risk_management::RiskMetrics;
use crate::domain::shared::{HoldingId, PortfolioId};

#[derive(Debug, Default)]
struct Tables {
    portfolios: HashMap<PortfolioId, Portfolio>,
    stocks: Vec<StockHolding>,
    options: Vec<OptionHolding>,
    rollovers: Vec<RolloverRecord>,
    snapshots: HashMap<PortfolioId, RiskMetrics>,
}

/// In-memory implementation of [`HoldingsStore`].
///
/// Insertion order is preserved for holdings and rollover records.
#[derive(Debug, Default)]
pub struct InMemoryHoldingsStore {
    tables: RwLock<Tables>,
}

impl InMemoryHoldingsStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a portfolio.
    pub fn insert_portfolio(&self, portfolio: Portfolio) {
        self.write().portfolios.insert(portfolio.id.clone(), portfolio);
    }

    /// Number of option lots across all portfolios.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.read().options.len()
    }

    /// Number of rollover records across all portfolios.
    #[must_use]
    pub fn rollover_count(&self) -> usize {
        self.read().rollovers.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl HoldingsStore for InMemoryHoldingsStore {
    async fn get_portfolio(&self, id: &PortfolioId) -> Result<Portfolio, StoreError> {
        self.read()
            .portfolios
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Portfolio", id))
    }

    async fn get_stock_holdings(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Vec<StockHolding>, StoreError> {
        Ok(self
            .read()
            .stocks
            .iter()
            .filter(|s| &s.portfolio_id == portfolio_id)
            .cloned()
            .collect())
    }

    async fn create_stock_holding(
        &self,
        holding: StockHolding,
    ) -> Result<StockHolding, StoreError> {
        self.write().stocks.push(holding.clone());
        Ok(holding)
    }

    async fn delete_stock_holding(&self, id: &HoldingId) -> Result<(), StoreError> {
        let mut tables = self.write();
        let before = tables.stocks.len();
        tables.stocks.retain(|s| &s.id != id);
        if tables.stocks.len() == before {
            return Err(StoreError::not_found("StockHolding", id));
        }
        Ok(())
    }

    async fn get_option_holdings(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Vec<OptionHolding>, StoreError> {
        Ok(self
            .read()
            .options
            .iter()
            .filter(|o| &o.portfolio_id == portfolio_id)
            .cloned()
            .collect())
    }

    async fn get_option_holding(&self, id: &HoldingId) -> Result<OptionHolding, StoreError> {
        self.read()
            .options
            .iter()
            .find(|o| &o.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("OptionHolding", id))
    }

    async fn create_option_holding(
        &self,
        holding: OptionHolding,
    ) -> Result<OptionHolding, StoreError> {
        self.write().options.push(holding.clone());
        Ok(holding)
    }

    async fn update_option_holding(
        &self,
        id: &HoldingId,
        patch: OptionHoldingPatch,
    ) -> Result<OptionHolding, StoreError> {
        let mut tables = self.write();
        let holding = tables
            .options
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| StoreError::not_found("OptionHolding", id))?;
        patch.apply(holding);
        Ok(holding.clone())
    }

    async fn delete_option_holding(&self, id: &HoldingId) -> Result<(), StoreError> {
        let mut tables = self.write();
        let before = tables.options.len();
        tables.options.retain(|o| &o.id != id);
        if tables.options.len() == before {
            return Err(StoreError::not_found("OptionHolding", id));
        }
        Ok(())
    }

    async fn create_rollover_record(
        &self,
        record: RolloverRecord,
    ) -> Result<RolloverRecord, StoreError> {
        self.write().rollovers.push(record.clone());
        Ok(record)
    }

    async fn list_rollover_records(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Vec<RolloverRecord>, StoreError> {
        Ok(self
            .read()
            .rollovers
            .iter()
            .filter(|r| &r.portfolio_id == portfolio_id)
            .cloned()
            .collect())
    }

    async fn save_risk_snapshot(&self, snapshot: RiskMetrics) -> Result<(), StoreError> {
        self.write()
            .snapshots
            .insert(snapshot.portfolio_id.clone(), snapshot);
        Ok(())
    }

    async fn latest_risk_snapshot(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Option<RiskMetrics>, StoreError> {
        Ok(self.read().snapshots.get(portfolio_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holdings::{Direction, OptionStatus, OptionType};
    use crate::domain::shared::UserId;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn option(pid: &PortfolioId) -> OptionHolding {
        OptionHolding::new(
            pid.clone(),
            "SPY250321P00500000",
            "SPY",
            OptionType::Put,
            Direction::Sell,
            1,
            dec!(500),
            NaiveDate::from_ymd_opt(2025, 3, 21).unwrap(),
            dec!(6),
        )
    }

    #[tokio::test]
    async fn missing_portfolio_is_not_found() {
        let store = InMemoryHoldingsStore::new();
        let err = store.get_portfolio(&PortfolioId::new("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn holdings_are_scoped_by_portfolio() {
        let store = InMemoryHoldingsStore::new();
        let a = PortfolioId::new("a");
        let b = PortfolioId::new("b");
        store
            .create_stock_holding(StockHolding::new(a.clone(), "AAPL", 1, dec!(1)))
            .await
            .unwrap();
        store.create_option_holding(option(&b)).await.unwrap();

        assert_eq!(store.get_stock_holdings(&a).await.unwrap().len(), 1);
        assert!(store.get_stock_holdings(&b).await.unwrap().is_empty());
        assert!(store.get_option_holdings(&a).await.unwrap().is_empty());
        assert_eq!(store.get_option_holdings(&b).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_applies_patch() {
        let store = InMemoryHoldingsStore::new();
        let pid = PortfolioId::new("a");
        let created = store.create_option_holding(option(&pid)).await.unwrap();

        let at = Utc::now();
        let mut rolled = created.clone();
        rolled.mark_rolled(at).unwrap();
        let updated = store
            .update_option_holding(&created.id, OptionHoldingPatch::status_of(&rolled))
            .await
            .unwrap();
        assert_eq!(updated.status, OptionStatus::Rolled);
        assert_eq!(
            store.get_option_holding(&created.id).await.unwrap().closed_at,
            Some(at)
        );
    }

    #[tokio::test]
    async fn delete_missing_option_is_not_found() {
        let store = InMemoryHoldingsStore::new();
        let err = store
            .delete_option_holding(&HoldingId::new("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn portfolio_round_trip() {
        let store = InMemoryHoldingsStore::new();
        let portfolio =
            Portfolio::new(PortfolioId::new("pf-1"), UserId::new("user-1"), dec!(1000));
        store.insert_portfolio(portfolio.clone());
        assert_eq!(store.get_portfolio(&portfolio.id).await.unwrap(), portfolio);
    }
}
