// src/settlement.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single staged fund movement inside an atomic settlement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transfer {
    pub from: Uuid,
    pub to: Uuid,
    pub amount: u64,
}

/// The complete set of fund movements for one market transition.
///
/// A plan is staged in memory and executed by a [`crate::FundsAdapter`] as a
/// unit: either every transfer applies or none does.
#[derive(Debug, Clone, Default)]
pub struct SettlementPlan {
    transfers: Vec<Transfer>,
}

impl SettlementPlan {
    pub fn new() -> Self {
        Self {
            transfers: Vec::new(),
        }
    }

    pub fn add(&mut self, transfer: Transfer) {
        self.transfers.push(transfer);
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Aggregate debit required from each debtor, for up-front coverage
    /// checks before any account is touched.
    pub fn calculate_locks(&self) -> Vec<(Uuid, u64)> {
        use std::collections::HashMap;
        let mut locks: HashMap<Uuid, u64> = HashMap::new();

        for transfer in &self.transfers {
            *locks.entry(transfer.from).or_insert(0) += transfer.amount;
        }

        locks.into_iter().collect()
    }
}
