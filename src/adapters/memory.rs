// src/adapters/memory.rs
use crate::{FundsAdapter, MarketError, SettlementPlan};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory funds substrate: one spendable balance per account.
///
/// All accounts live behind a single lock, so plan execution is a genuine
/// all-or-nothing commit: coverage is verified for every debtor before the
/// first account is touched.
pub struct MemoryAdapter {
    accounts: Mutex<HashMap<Uuid, u64>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl FundsAdapter for MemoryAdapter {
    async fn execute_plan(&self, plan: &SettlementPlan) -> Result<(), MarketError> {
        let mut accounts = self.accounts.lock().unwrap();

        // Step 1: verify every aggregated debit is covered
        let locks = plan.calculate_locks();
        for (debtor, required) in &locks {
            let available = accounts.get(debtor).copied().unwrap_or(0);
            if available < *required {
                return Err(MarketError::InsufficientFunds);
            }
        }

        // Step 2: debit each debtor its aggregate, then apply the credits
        for (debtor, required) in &locks {
            *accounts.entry(*debtor).or_insert(0) -= required;
        }
        for transfer in plan.transfers() {
            *accounts.entry(transfer.to).or_insert(0) += transfer.amount;
        }

        Ok(())
    }

    async fn balance_of(&self, owner: Uuid) -> Result<u64, MarketError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.get(&owner).copied().unwrap_or(0))
    }

    async fn deposit(&self, owner: Uuid, amount: u64) -> Result<(), MarketError> {
        let mut accounts = self.accounts.lock().unwrap();
        *accounts.entry(owner).or_insert(0) += amount;
        Ok(())
    }
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}
