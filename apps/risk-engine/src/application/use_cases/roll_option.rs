//! Roll Option Use Case
//!
//! Closes an active option lot and opens its replacement as a saga over the
//! holdings store. The store offers no multi-row transaction, so each write
//! after the first has a compensating action, run in reverse order on
//! failure. Callers never observe a half-applied rollover.
//!
//! | Step | Write | Compensation on failure |
//! |------|-------|-------------------------|
//! | 1 | insert replacement lot | none needed |
//! | 2 | mark old lot `ROLLED` | delete replacement |
//! | 3 | append rollover record | reactivate old lot, delete replacement |
//!
//! Concurrent rollovers of the same lot must be serialized by the caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::access::owned_portfolio;
use crate::application::dto::RolloverCommand;
use crate::application::ports::{HoldingsStore, OptionHoldingPatch};
use crate::domain::holdings::OptionHolding;
use crate::domain::option_rollover::RolloverPlan;
use crate::domain::shared::{HoldingId, Money, RolloverId};
use crate::error::{EngineError, ErrorCode};
use crate::observability::{record_compensation, record_rollover};

/// Result of a completed rollover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverOutcome {
    /// Ledger entry created.
    pub rollover_id: RolloverId,
    /// Old lot, now `ROLLED`.
    pub old_holding: OptionHolding,
    /// Replacement lot, `ACTIVE`.
    pub new_holding: OptionHolding,
    /// P&L locked in on the closed contracts.
    pub realized_pnl: Money,
    /// When the rollover took effect.
    pub rollover_date: DateTime<Utc>,
    /// Fewer contracts were closed than held.
    pub partial_close: bool,
}

/// Use case for rolling an option lot into a new one.
pub struct RollOptionUseCase<S>
where
    S: HoldingsStore,
{
    store: Arc<S>,
}

impl<S> RollOptionUseCase<S>
where
    S: HoldingsStore,
{
    /// Create a new `RollOptionUseCase`.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Execute the rollover.
    ///
    /// Preconditions are checked before anything is written: terms must be
    /// valid, the caller must own the portfolio, the lot must belong to it
    /// and be `ACTIVE`.
    ///
    /// # Errors
    ///
    /// - `Validation` for malformed terms
    /// - `NotFound` if the portfolio or lot is absent
    /// - `Forbidden` if the caller does not own the portfolio or the lot is elsewhere
    /// - `InvalidState` if the lot is not active
    /// - `DependencyFailure` if a store write fails; state is rolled back first
    pub async fn execute(&self, command: RolloverCommand) -> Result<RolloverOutcome, EngineError> {
        let result = self.run(&command).await;
        if let Err(err) = &result
            && err.code() != ErrorCode::DependencyFailure
        {
            tracing::info!(
                holding_id = %command.old_holding_id,
                code = %err.code(),
                error = %err,
                "Rollover rejected"
            );
            record_rollover("rejected");
        }
        result
    }

    async fn run(&self, command: &RolloverCommand) -> Result<RolloverOutcome, EngineError> {
        let terms = command.to_terms()?;
        let portfolio =
            owned_portfolio(&*self.store, &command.user_id, &command.portfolio_id).await?;

        let old = self
            .store
            .get_option_holding(&command.old_holding_id)
            .await
            .map_err(|e| EngineError::from_store("load option holding", e))?;

        if old.portfolio_id != portfolio.id {
            return Err(EngineError::Forbidden {
                portfolio_id: portfolio.id.to_string(),
                user_id: command.user_id.to_string(),
            });
        }
        if !old.status.is_active() {
            return Err(EngineError::InvalidState {
                message: format!("option holding {} is {}, expected ACTIVE", old.id, old.status),
            });
        }

        let plan = RolloverPlan::build(&old, &terms, Utc::now())?;
        if plan.partial_close {
            tracing::warn!(
                holding_id = %old.id,
                held = old.contracts,
                closed = terms.close_contracts,
                "Partial close: remaining contracts are marked rolled with the lot"
            );
        }

        tracing::debug!(holding_id = %old.id, "Rollover step 1: insert replacement");
        let new_holding = self
            .store
            .create_option_holding(plan.replacement.clone())
            .await
            .map_err(|e| {
                tracing::error!(holding_id = %old.id, error = %e, "Failed to insert replacement holding");
                record_rollover("failed");
                EngineError::dependency("create replacement holding", &e)
            })?;

        tracing::debug!(holding_id = %old.id, "Rollover step 2: mark old holding rolled");
        let rolled = match self
            .store
            .update_option_holding(&old.id, OptionHoldingPatch::status_of(&plan.rolled))
            .await
        {
            Ok(h) => h,
            Err(e) => {
                tracing::error!(holding_id = %old.id, error = %e, "Failed to mark holding rolled");
                self.delete_replacement(&new_holding.id).await;
                record_rollover("rolled_back");
                return Err(EngineError::dependency("mark holding rolled", &e));
            }
        };

        tracing::debug!(holding_id = %old.id, "Rollover step 3: append rollover record");
        let record = plan.record.with_replacement(&new_holding);
        let record = match self.store.create_rollover_record(record).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(holding_id = %old.id, error = %e, "Failed to append rollover record");
                self.reactivate_old(&rolled).await;
                self.delete_replacement(&new_holding.id).await;
                record_rollover("rolled_back");
                return Err(EngineError::dependency("create rollover record", &e));
            }
        };

        tracing::info!(
            rollover_id = %record.id,
            old_holding_id = %old.id,
            new_holding_id = %new_holding.id,
            realized_pnl = %plan.realized_pnl,
            "Option rolled"
        );
        record_rollover("completed");

        Ok(RolloverOutcome {
            rollover_id: record.id,
            old_holding: rolled,
            new_holding,
            realized_pnl: plan.realized_pnl,
            rollover_date: plan.rollover_date,
            partial_close: plan.partial_close,
        })
    }

    async fn delete_replacement(&self, id: &HoldingId) {
        match self.store.delete_option_holding(id).await {
            Ok(()) => {
                tracing::warn!(holding_id = %id, "Compensated: replacement holding deleted");
                record_compensation("delete_new_holding", true);
            }
            Err(e) => {
                tracing::error!(
                    holding_id = %id,
                    error = %e,
                    "Compensation failed: replacement holding left behind"
                );
                record_compensation("delete_new_holding", false);
            }
        }
    }

    async fn reactivate_old(&self, rolled: &OptionHolding) {
        let id = &rolled.id;
        let mut reverted = rolled.clone();
        let result = match reverted.revert_roll() {
            Ok(()) => self
                .store
                .update_option_holding(id, OptionHoldingPatch::status_of(&reverted))
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match result {
            Ok(_) => {
                tracing::warn!(holding_id = %id, "Compensated: old holding reactivated");
                record_compensation("reactivate_old_holding", true);
            }
            Err(error) => {
                tracing::error!(
                    holding_id = %id,
                    error = %error,
                    "Compensation failed: old holding left rolled"
                );
                record_compensation("reactivate_old_holding", false);
            }
        }
    }
}
