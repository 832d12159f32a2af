use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{sheet_store::SheetStore, storage::StorageError},
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Keep a sheet store installed in `state`, toggling degraded mode while it is unreachable.
///
/// Never returns; spawn it next to the HTTP server.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn SheetStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        match connect().await {
            Ok(store) => {
                state.set_sheet_store(store.clone()).await;
                info!("sheet store connected; leaving degraded mode");
                delay = INITIAL_DELAY;

                watch(&state, store.as_ref()).await;

                warn!("dropping sheet store after failed reconnects");
                state.clear_sheet_store().await;
            }
            Err(err) => warn!(error = %err, "sheet store connection attempt failed"),
        }

        sleep(delay).await;
        delay = next_delay(delay);
    }
}

/// Poll the store until it stays unreachable through every reconnect attempt.
async fn watch(state: &SharedState, store: &dyn SheetStore) {
    loop {
        match store.health_check().await {
            Ok(()) => {
                if state.is_degraded().await {
                    info!("sheet store healthy again; leaving degraded mode");
                    state.update_degraded(false).await;
                }
            }
            Err(err) => {
                warn!(error = %err, "sheet store health check failed; entering degraded mode");
                state.update_degraded(true).await;
                if !reconnect(store).await {
                    return;
                }
                state.update_degraded(false).await;
            }
        }
        sleep(HEALTH_POLL_INTERVAL).await;
    }
}

async fn reconnect(store: &dyn SheetStore) -> bool {
    let mut delay = INITIAL_DELAY;
    for attempt in 1..=MAX_RECONNECT_ATTEMPTS {
        match store.try_reconnect().await {
            Ok(()) => {
                info!(attempt, "sheet store reconnected");
                return true;
            }
            Err(err) => {
                warn!(attempt, error = %err, "sheet store reconnect attempt failed");
                sleep(delay).await;
                delay = next_delay(delay);
            }
        }
    }
    false
}

fn next_delay(delay: Duration) -> Duration {
    (delay * 2).min(MAX_DELAY)
}
