use crate::controller::RemoteController;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Polls the relay's log buffer every `every` for as long as the runtime lives.
///
/// Each tick spawns its own fetch, so a slow poll never delays the next one.
/// Overlapping polls are harmless because merging is idempotent.
pub fn start_log_polling(controller: Arc<RemoteController>, every: Duration) -> JoinHandle<()> {
    info!("Polling relay logs every {:?}", every);
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the first poll waits a full period.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let controller = Arc::clone(&controller);
            tokio::spawn(async move {
                controller.poll_logs_once().await;
            });
        }
    })
}
