//! Background maintenance tasks

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use std::time::Duration;

/// Sweep interval relative to the configured expiry
const SWEEP_DIVISOR: u64 = 4;

/// Periodically delete unpaid pending orders older than the configured
/// expiry. Disabled when `stale_order_expiry_minutes` is 0; unpaid orders
/// then remain pending indefinitely.
///
/// Deleting a never-paid order has no settlement side effects, so the
/// sweep cannot touch inventory, enrollments, or promo usage.
pub fn spawn_stale_order_sweep(state: ServerState) {
    let expiry_minutes = state.config.stale_order_expiry_minutes;
    if expiry_minutes == 0 {
        tracing::debug!("Stale order sweep disabled");
        return;
    }

    let repo = OrderRepository::new(state.db.clone());
    let period = Duration::from_secs(expiry_minutes * 60 / SWEEP_DIVISOR.max(1)).max(
        Duration::from_secs(60),
    );

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let cutoff = shared::util::now_millis() - (expiry_minutes * 60_000) as i64;
            match repo.delete_stale_pending(cutoff).await {
                Ok(0) => {}
                Ok(n) => tracing::info!(deleted = n, "Swept stale pending orders"),
                Err(e) => tracing::error!(error = %e, "Stale order sweep failed"),
            }
        }
    });
}
