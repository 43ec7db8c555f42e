//! ExpiryLoop - 期限切れ auction の定期回収
//!
//! # フロー
//! 1. 固定周期（既定 30 秒）の ticker を待つ（Idle）
//! 2. `ExpirationSweeper::run_cycle()` を実行（Scanning）
//! 3. 結果に関係なく Idle に戻る（cycle 内のエラーでループは止まらない）
//!
//! 周期より長い cycle の間に来た tick は吸収され、cycle 終了後に 1 回だけ即座に発火する。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{info, warn};

use super::ExpirationSweeper;

const MIN_CHECK_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to the background expiry task.
/// - `shutdown_and_join()` で実行中の cycle の終了を待って止める
/// - handle を drop した場合はループは切り離され、プロセス終了まで動き続ける
pub struct ExpiryLoop {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl ExpiryLoop {
    /// Spawn the loop on the current tokio runtime.
    pub fn spawn(sweeper: Arc<ExpirationSweeper>, check_interval: Duration) -> Self {
        let period = if check_interval < MIN_CHECK_INTERVAL {
            warn!(?check_interval, "check interval too small, clamping");
            MIN_CHECK_INTERVAL
        } else {
            check_interval
        };

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(expiry_loop(sweeper, period, shutdown_rx));
        Self { shutdown_tx, join }
    }

    /// Ask the loop to stop once the in-flight cycle (if any) is done.
    pub fn request_shutdown(&self) {
        // ignore send error: the loop may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        let _ = self.join.await;
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

async fn expiry_loop(
    sweeper: Arc<ExpirationSweeper>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!(period_secs = period.as_secs_f64(), "auction expiry loop started");

    // 最初の tick は 1 周期後
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut can_stop = true;

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        if can_stop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    // sender が drop された = もう止められる人がいない
                    if changed.is_err() {
                        can_stop = false;
                    }
                    continue;
                }
                _ = ticker.tick() => {}
            }
        } else {
            ticker.tick().await;
        }

        sweeper.run_cycle().await;
    }

    info!("auction expiry loop stopped");
}
