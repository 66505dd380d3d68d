//! # Dashboard Console
//!
//! `dashboard [ADDRESS...]`
//!
//! Prints available pools by APY, then positions and withdraw cost estimates
//! for each address given (or remembered in the address book). Ctrl-C cancels
//! in-flight requests.

use anyhow::Context;
use dashboard::app::{quote_withdraw_cost, AppStore, Position, PositionsStore};
use dashboard::services::{InjectedWallets, JsonFileAddressBook, KnownAddress};
use dashboard::IndexerService;
use futures::future::join_all;
use lib_core::config::init_config;
use lib_core::{Chain, Config};
use lib_thorchain::{ThorchainClients, WithdrawType};
use lib_utils::{format_time, now_utc};
use shared::utils::{base_to_units, format_address};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let _log_guard = dashboard::debug::init();

    let config = init_config().context("Invalid configuration")?;
    let clients = ThorchainClients::from_config(config)?;

    let store = AppStore::new(
        Arc::new(JsonFileAddressBook::new(&config.address_book_path)),
        Arc::new(InjectedWallets::new()),
        config.walletconnect_project_id.clone(),
    );
    if let Err(e) = store.mount() {
        store.report_error(&e);
        eprintln!("Address book unavailable: {}", e.user_message());
    }

    let shutdown = store.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling requests");
            shutdown.shutdown();
        }
    });

    let addresses = resolve_addresses(&store);
    let result = run(&clients, config, &store, &addresses).await;
    store.shutdown();

    match result {
        Err(e) if e.is_cancelled() => {
            eprintln!("Cancelled");
            Ok(())
        }
        Err(e) => {
            store.report_error(&e);
            Err(e.into())
        }
        Ok(()) => Ok(()),
    }
}

/// Addresses from the command line, remembered for next time; otherwise the
/// address book.
fn resolve_addresses(store: &AppStore) -> Vec<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return store
            .known_addresses()
            .into_iter()
            .map(|known| known.address)
            .collect();
    }

    for address in &args {
        match Chain::from_address(address) {
            Some(chain) => {
                if let Err(e) = store.remember_address(KnownAddress::new(chain, address.as_str(), None)) {
                    tracing::warn!(error = %e, "Failed to remember address");
                }
            }
            None => tracing::warn!(address = %address, "Unrecognized address format"),
        }
    }
    args
}

async fn run(
    clients: &ThorchainClients,
    config: &Config,
    store: &AppStore,
    addresses: &[String],
) -> lib_core::Result<()> {
    let cancel = store.root_token();

    let mut pools = clients.pools(&cancel).await?;
    pools.retain(|p| p.is_available());
    pools.sort_by(|a, b| b.pool_apy.total_cmp(&a.pool_apy));

    println!("{:<48} {:>9} {:>18}", "POOL", "APY", "RUNE DEPTH");
    for pool in &pools {
        println!(
            "{:<48} {:>8.2}% {:>18.2}",
            pool.asset,
            pool.pool_apy * 100.0,
            base_to_units(pool.rune_depth)
        );
    }

    if addresses.is_empty() {
        return Ok(());
    }

    let positions = PositionsStore::from_config(config);
    let report = positions
        .refresh(clients, addresses, &cancel, now_utc())
        .await?;
    tracing::debug!(?report, "Positions refreshed");
    if let Some(at) = positions.refreshed_at() {
        println!();
        println!("positions as of {}", format_time(at));
    }

    for address in addresses {
        println!();
        let wallet = store
            .known_addresses()
            .into_iter()
            .find(|known| known.address.eq_ignore_ascii_case(address))
            .and_then(|known| known.wallet);
        match wallet {
            Some(kind) => println!("{} ({})", format_address(address, 10, 6), kind.label()),
            None => println!("{}", format_address(address, 10, 6)),
        }
        let held = positions.positions_for(address);
        if held.is_empty() {
            println!("  no liquidity positions");
        }
        print_positions(clients, &held, &cancel).await;
        print_native_balance(clients, address, &cancel).await;
    }
    Ok(())
}

async fn print_positions(clients: &ThorchainClients, held: &[Position], cancel: &CancellationToken) {
    let pools: BTreeSet<&str> = held.iter().map(|p| p.pool.as_str()).collect();
    let quotes = join_all(
        pools
            .iter()
            .map(|pool| quote_withdraw_cost(clients, pool, WithdrawType::Split, cancel)),
    )
    .await;

    for (pool, quote) in pools.iter().zip(quotes) {
        let units: u128 = held
            .iter()
            .filter(|p| p.pool == *pool)
            .map(Position::liquidity_units)
            .sum();
        let cost = match quote {
            Ok(quote) if quote.lp_paused => format!("${:.2} (LP actions paused)", quote.total_usd),
            Ok(quote) => format!("${:.2}", quote.total_usd),
            Err(e) => format!("unavailable ({})", e.user_message()),
        };
        println!("  {:<44} units {:>16}  withdraw ~{}", pool, units, cost);
    }
}

async fn print_native_balance(clients: &ThorchainClients, address: &str, cancel: &CancellationToken) {
    if Chain::from_address(address) != Some(Chain::Eth) || !clients.infura.has_endpoint(Chain::Eth) {
        return;
    }
    match clients.infura.get_native_balance(Chain::Eth, address, cancel).await {
        Ok(wei) => println!("  ETH balance {:.6}", wei as f64 / 1e18),
        Err(e) => tracing::warn!(error = %e, "Balance lookup failed"),
    }

    if clients.balances.is_configured() {
        match clients
            .balances
            .get_balance_per_chain_and_address(Chain::Eth, address, cancel)
            .await
        {
            Ok(entries) => {
                for entry in entries.iter().filter(|e| !e.is_native()) {
                    let symbol = entry.asset.symbol.as_deref().unwrap_or("?");
                    println!("  {:<8} {}", symbol, entry.amount.value);
                }
            }
            Err(e) => tracing::warn!(error = %e, "Token balances unavailable"),
        }
    }
}
