use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};
use tracing_subscriber::filter::LevelFilter;

use auction_core::app::{AUCTION_DURATION_ENV, AuctionRepository, ExpiryConfig, resolve_lifetime};
use auction_core::domain::{Auction, ProductCondition};
use auction_core::impls::InMemoryAuctionStore;
use auction_core::ports::{Clock, FixedClock, ProcessEnv, SystemClock, UlidGenerator};

fn init_tracing() -> Result<()> {
    let fmt_builder = tracing_subscriber::fmt()
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal());

    // compact on a terminal, JSON otherwise
    if std::io::stderr().is_terminal() {
        tracing::subscriber::set_global_default(fmt_builder.compact().finish())?;
    } else {
        tracing::subscriber::set_global_default(fmt_builder.json().finish())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    // (A) store と repository を用意（expiry loop はここで起動する）
    let store = Arc::new(InMemoryAuctionStore::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let repo = AuctionRepository::new(
        store.clone(),
        clock.clone(),
        Arc::new(ProcessEnv),
        ExpiryConfig::default(),
    );
    let ids = UlidGenerator::new(SystemClock);

    let lifetime = resolve_lifetime(&ProcessEnv);
    tracing::info!(
        lifetime_minutes = lifetime.num_minutes(),
        "set {AUCTION_DURATION_ENV} to change the auction lifetime"
    );

    // (B) 期限切れの auction（lifetime + 1 分前に作成）と新しい auction を投入
    let stale_created_at = lifetime
        .checked_add(&TimeDelta::minutes(1))
        .and_then(|age| clock.now().checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let backdated = FixedClock::new(stale_created_at);
    let stale = Auction::new(&ids, &backdated, "Vintage camera", "Electronics", "Film SLR", ProductCondition::Used);
    let fresh = Auction::new(&ids, &*clock, "Desk lamp", "Home", "LED", ProductCondition::New);
    repo.create_auction(&stale).await?;
    repo.create_auction(&fresh).await?;

    // (C) 1 cycle を即時実行（バックグラウンドでも 30 秒ごとに走る）
    let report = repo.run_expiration_cycle().await;
    tracing::info!(?report, "manual expiration cycle");

    for id in [stale.id(), fresh.id()] {
        let auction = repo.get_auction_by_id(id).await?;
        println!("{} {:?} created_at={}", auction.id(), auction.status(), auction.created_at());
    }

    // (D) Ctrl-C まで loop を動かし続け、その後 graceful shutdown
    println!("expiry loop running; press Ctrl-C to stop");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = tokio::time::sleep(Duration::from_secs(24 * 60 * 60)) => {}
    }
    repo.shutdown().await;
    println!("auctions in store: {}", store.len().await);
    Ok(())
}
