//! Portfolio ownership check shared by use cases.

use crate::application::ports::HoldingsStore;
use crate::domain::holdings::Portfolio;
use crate::domain::shared::{PortfolioId, UserId};
use crate::error::EngineError;

/// Load `portfolio_id` and make sure `user_id` owns it.
pub(super) async fn owned_portfolio<S: HoldingsStore + ?Sized>(
    store: &S,
    user_id: &UserId,
    portfolio_id: &PortfolioId,
) -> Result<Portfolio, EngineError> {
    let portfolio = store
        .get_portfolio(portfolio_id)
        .await
        .map_err(|e| EngineError::from_store("load portfolio", e))?;

    if !portfolio.is_owned_by(user_id) {
        tracing::warn!(
            portfolio_id = %portfolio_id,
            user_id = %user_id,
            "Portfolio access denied"
        );
        return Err(EngineError::Forbidden {
            portfolio_id: portfolio_id.to_string(),
            user_id: user_id.to_string(),
        });
    }
    Ok(portfolio)
}
