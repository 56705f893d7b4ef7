// src/lib.rs
pub mod adapters;
pub mod asset;
pub mod error;
pub mod event;
pub mod market;
pub mod settlement;

pub use asset::Asset;
pub use error::MarketError;
pub use event::MarketEvent;
pub use market::MarketLedger;
pub use settlement::{SettlementPlan, Transfer};

use async_trait::async_trait;
use uuid::Uuid;

/// Funds substrate trait
///
/// Stands in for whatever holds the parties' spendable balances. The market
/// never moves money itself; it stages a [`SettlementPlan`] and hands it here.
#[async_trait]
pub trait FundsAdapter: Send + Sync {
    /// Execute the staged transfers atomically.
    /// Implementors MUST:
    /// 1. Aggregate the required debits (from `plan.calculate_locks()`)
    /// 2. Verify each debtor's balance covers its aggregate debit — return
    ///    InsufficientFunds if not
    /// 3. Apply every transfer
    /// 4. Commit on success; on any error leave every account untouched
    async fn execute_plan(&self, plan: &SettlementPlan) -> Result<(), MarketError>;

    // READ OPERATIONS
    async fn balance_of(&self, owner: Uuid) -> Result<u64, MarketError>;

    /// Credit external funds to an account (deposits, test funding).
    async fn deposit(&self, owner: Uuid, amount: u64) -> Result<(), MarketError>;
}
