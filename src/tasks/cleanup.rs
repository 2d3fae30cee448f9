//! Expired Code Sweep
//!
//! Background task that periodically drops expired codes from memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::verify::VerificationManager;

/// Spawns a background task that periodically purges expired codes.
///
/// Expiry is always enforced at read time; the sweep only reclaims memory
/// held by codes nobody read after they expired.
///
/// # Arguments
/// * `manager` - Shared verification manager
/// * `interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cleanup_handle = spawn_cleanup_task(state.manager.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(manager: Arc<VerificationManager>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expired code sweep with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = manager.purge_expired().await;

            if removed > 0 {
                info!("Code sweep: removed {} expired codes", removed);
            } else {
                debug!("Code sweep: no expired codes found");
            }
        }
    })
}
