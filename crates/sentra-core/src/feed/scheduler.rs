// ── Auto-refresh scheduler ──
//
// Self-rescheduling single-shot timer: each firing consults a visibility
// predicate, runs the tick action if visible, and re-arms immediately
// either way. A hidden consumer still "ticks" on schedule but skips the
// work — missed ticks never accumulate. Cancellation wins over a due
// timer, so nothing fires after teardown.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Run the scheduler loop until `cancel` fires.
///
/// `tick` is expected to dispatch its work without blocking (the feed
/// spawns its refresh); a slow tick therefore cannot stretch the period,
/// and overlapping refreshes are tolerated rather than prevented —
/// request supersession inside the fetchers handles the races.
pub(crate) async fn run<V, F>(interval: Duration, visible: V, cancel: CancellationToken, mut tick: F)
where
    V: Fn() -> bool + Send + 'static,
    F: FnMut() + Send + 'static,
{
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(interval) => {
                if visible() {
                    tick();
                } else {
                    trace!("consumer hidden; skipping scheduled refresh");
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use super::*;

    const PERIOD: Duration = Duration::from_secs(30);

    struct Harness {
        ticks: Arc<AtomicU32>,
        visible: Arc<AtomicBool>,
        cancel: CancellationToken,
    }

    async fn spawn_scheduler() -> Harness {
        let ticks = Arc::new(AtomicU32::new(0));
        let visible = Arc::new(AtomicBool::new(true));
        let cancel = CancellationToken::new();

        let tick_counter = Arc::clone(&ticks);
        let vis = Arc::clone(&visible);
        tokio::spawn(run(
            PERIOD,
            move || vis.load(Ordering::SeqCst),
            cancel.clone(),
            move || {
                tick_counter.fetch_add(1, Ordering::SeqCst);
            },
        ));
        // Let the task reach its first sleep before the test advances time.
        tokio::task::yield_now().await;

        Harness {
            ticks,
            visible,
            cancel,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_fire_each_period() {
        let h = spawn_scheduler().await;

        tokio::time::sleep(PERIOD + Duration::from_millis(1)).await;
        assert_eq!(h.ticks.load(Ordering::SeqCst), 1);

        tokio::time::sleep(PERIOD).await;
        assert_eq!(h.ticks.load(Ordering::SeqCst), 2);

        h.cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn hidden_skips_work_but_stays_armed() {
        let h = spawn_scheduler().await;

        h.visible.store(false, Ordering::SeqCst);
        tokio::time::sleep(PERIOD * 3).await;
        assert_eq!(h.ticks.load(Ordering::SeqCst), 0);

        // Becoming visible again requires no re-arm from the caller:
        // the next scheduled tick does the work.
        h.visible.store(true, Ordering::SeqCst);
        tokio::time::sleep(PERIOD + Duration::from_millis(1)).await;
        assert_eq!(h.ticks.load(Ordering::SeqCst), 1);

        h.cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_future_ticks() {
        let h = spawn_scheduler().await;

        tokio::time::sleep(PERIOD + Duration::from_millis(1)).await;
        assert_eq!(h.ticks.load(Ordering::SeqCst), 1);

        h.cancel.cancel();
        tokio::time::sleep(PERIOD * 4).await;
        assert_eq!(h.ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_before_first_tick_fires_nothing() {
        let h = spawn_scheduler().await;

        h.cancel.cancel();
        tokio::time::sleep(PERIOD * 2).await;
        assert_eq!(h.ticks.load(Ordering::SeqCst), 0);
    }
}
