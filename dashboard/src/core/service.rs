//! # Service Traits
//!
//! Traits for dependency injection, so the stores and quoting logic can be
//! exercised against in-memory fakes.

use async_trait::async_trait;
use lib_core::Result;
use lib_thorchain::ThorchainClients;
use shared::dto::midgard::{MemberPool, PoolDetail};
use shared::dto::thornode::{InboundAddress, TxStatusResponse};
use tokio_util::sync::CancellationToken;

/// Read-only protocol data the dashboard consumes.
#[async_trait]
pub trait IndexerService: Send + Sync {
    async fn pools(&self, cancel: &CancellationToken) -> Result<Vec<PoolDetail>>;

    /// Pool memberships of `address`; empty when it never provided liquidity.
    async fn member_pools(&self, address: &str, cancel: &CancellationToken)
        -> Result<Vec<MemberPool>>;

    async fn tx_status(&self, tx_id: &str, cancel: &CancellationToken) -> Result<TxStatusResponse>;

    async fn inbound_addresses(&self, cancel: &CancellationToken) -> Result<Vec<InboundAddress>>;

    async fn rune_price_usd(&self, cancel: &CancellationToken) -> Result<f64>;

    /// Native RUNE outbound fee in 1e8 base units.
    async fn native_outbound_fee(&self, cancel: &CancellationToken) -> Result<u128>;
}

#[async_trait]
impl IndexerService for ThorchainClients {
    async fn pools(&self, cancel: &CancellationToken) -> Result<Vec<PoolDetail>> {
        self.midgard.get_pools(None, cancel).await
    }

    async fn member_pools(
        &self,
        address: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<MemberPool>> {
        self.midgard.get_member(address, cancel).await
    }

    async fn tx_status(&self, tx_id: &str, cancel: &CancellationToken) -> Result<TxStatusResponse> {
        self.thornode.get_tx_status(tx_id, cancel).await
    }

    async fn inbound_addresses(&self, cancel: &CancellationToken) -> Result<Vec<InboundAddress>> {
        self.thornode.get_inbound_addresses(cancel).await
    }

    async fn rune_price_usd(&self, cancel: &CancellationToken) -> Result<f64> {
        self.midgard.get_rune_price_usd(cancel).await
    }

    async fn native_outbound_fee(&self, cancel: &CancellationToken) -> Result<u128> {
        self.thornode.get_native_outbound_fee(cancel).await
    }
}
