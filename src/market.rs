// src/market.rs
use crate::event::EventSink;
use crate::{Asset, FundsAdapter, MarketError, MarketEvent, SettlementPlan, Transfer};
use metrics::{counter, histogram};
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use uuid::Uuid;

struct MarketState {
    assets: Vec<Asset>,
    balance: u64,
}

/// The marketplace ledger: an append-only asset registry plus the market's
/// own fee balance, driven through atomic transitions.
///
/// All mutable state sits behind one lock, held for the whole of every
/// transition including settlement. Callers are strictly serialized: each
/// observes only fully-committed prior state, and nothing reached from a
/// settlement can re-enter the ledger while a transition is in flight.
pub struct MarketLedger {
    owner: Uuid,
    account: Uuid,
    share_percent: u8,
    funds: Arc<dyn FundsAdapter>,
    state: Mutex<MarketState>,
    events: EventSink,
}

impl MarketLedger {
    /// Create a market owned by `owner`, retaining `share_percent`% of each
    /// sale. Rejects percentages above 100.
    pub fn new(
        owner: Uuid,
        share_percent: u8,
        funds: Arc<dyn FundsAdapter>,
    ) -> Result<Self, MarketError> {
        if share_percent > 100 {
            return Err(MarketError::InvalidSharePercent(share_percent));
        }

        Ok(Self {
            owner,
            account: Uuid::now_v7(),
            share_percent,
            funds,
            state: Mutex::new(MarketState {
                assets: Vec::new(),
                balance: 0,
            }),
            events: EventSink::new(),
        })
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }

    /// The market's own account in the funds substrate. Fees accumulate
    /// here, so `balance_of(account)` reconciles with [`Self::balance`].
    pub fn account(&self) -> Uuid {
        self.account
    }

    pub fn share_percent(&self) -> u8 {
        self.share_percent
    }

    /// Accumulated fees not yet withdrawn.
    pub async fn balance(&self) -> u64 {
        self.state.lock().await.balance
    }

    /// Number of assets ever registered.
    pub async fn assets_count(&self) -> u64 {
        self.state.lock().await.assets.len() as u64
    }

    /// Subscribe to market notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
        self.events.subscribe()
    }

    /// Register a new listing. The caller becomes the seller; the assigned
    /// id is sequential and also carried by the emitted `NewAsset` event.
    pub async fn add_asset(
        &self,
        caller: Uuid,
        name: &str,
        price: u64,
    ) -> Result<u64, MarketError> {
        if price == 0 {
            return Err(MarketError::InvalidPrice);
        }

        let mut state = self.state.lock().await;
        let id = state.assets.len() as u64;
        state.assets.push(Asset::new(id, name, price, caller));
        drop(state);

        self.events.emit(MarketEvent::NewAsset {
            seller: caller,
            name: name.to_string(),
            id,
        });

        Ok(id)
    }

    /// Raw asset data, owner-only.
    pub async fn asset_data(
        &self,
        caller: Uuid,
        id: u64,
    ) -> Result<(String, u64, u64), MarketError> {
        if caller != self.owner {
            return Err(MarketError::Unauthorized);
        }

        let state = self.state.lock().await;
        let asset = state
            .assets
            .get(id as usize)
            .ok_or(MarketError::NotFound)?;

        Ok((asset.name.clone(), asset.price, asset.id))
    }

    /// Purchase a listed asset by paying exactly its price.
    ///
    /// Either the whole transition commits — asset marked sold, fee
    /// retained, seller share transferred — or nothing does.
    pub async fn buy(&self, caller: Uuid, id: u64, payment: u64) -> Result<(), MarketError> {
        let result = self.buy_inner(caller, id, payment).await;

        counter!("market.transactions.total",
            "op" => "buy",
            "status" => if result.is_ok() { "success" } else { "failed" }
        )
        .increment(1);

        result
    }

    async fn buy_inner(&self, caller: Uuid, id: u64, payment: u64) -> Result<(), MarketError> {
        let mut state = self.state.lock().await;

        // All checks run before any funds move
        let asset = state
            .assets
            .get(id as usize)
            .ok_or(MarketError::InvalidReference)?;
        if asset.is_sold() {
            return Err(MarketError::NotForSale);
        }
        if asset.seller == caller {
            return Err(MarketError::SelfTradeForbidden);
        }
        if payment != asset.price {
            return Err(MarketError::ValueMismatch);
        }

        let price = asset.price;
        let seller = asset.seller;
        let (fee, seller_share) = split_price(price, self.share_percent);

        let mut plan = SettlementPlan::new();
        if fee > 0 {
            plan.add(Transfer {
                from: caller,
                to: self.account,
                amount: fee,
            });
        }
        if seller_share > 0 {
            plan.add(Transfer {
                from: caller,
                to: seller,
                amount: seller_share,
            });
        }

        // The state lock stays held across settlement, so a failure here
        // rolls the whole transition back: the asset stays unsold and no
        // fee accrues.
        self.funds.execute_plan(&plan).await?;

        let asset = &mut state.assets[id as usize];
        asset.buyer = Some(caller);
        state.balance += fee;

        histogram!("market.sale.amount").record(price as f64);

        Ok(())
    }

    /// Withdraw accumulated fees to the owner, owner-only.
    pub async fn withdraw(&self, caller: Uuid, amount: u64) -> Result<(), MarketError> {
        let result = self.withdraw_inner(caller, amount).await;

        counter!("market.transactions.total",
            "op" => "withdraw",
            "status" => if result.is_ok() { "success" } else { "failed" }
        )
        .increment(1);

        result
    }

    async fn withdraw_inner(&self, caller: Uuid, amount: u64) -> Result<(), MarketError> {
        if caller != self.owner {
            return Err(MarketError::Unauthorized);
        }

        let mut state = self.state.lock().await;
        if amount == 0 || amount > state.balance {
            return Err(MarketError::InvalidAmount);
        }

        let mut plan = SettlementPlan::new();
        plan.add(Transfer {
            from: self.account,
            to: self.owner,
            amount,
        });

        // Balance is decremented only after the outward transfer commits
        self.funds.execute_plan(&plan).await?;
        state.balance -= amount;

        Ok(())
    }
}

/// Split a sale price into (fee, seller share). Integer floor division for
/// the fee; any remainder rides with the seller's share, so the two parts
/// always sum to the price exactly.
pub(crate) fn split_price(price: u64, share_percent: u8) -> (u64, u64) {
    let fee = (price as u128 * share_percent as u128 / 100) as u64;
    (fee, price - fee)
}
