// ── Activity feed orchestrator ──
//
// Owns the combined fetch/pagination/filter state and the full lifecycle:
// initial load, explicit refresh, page navigation, filter changes, and
// the background auto-refresh scheduler.

pub(crate) mod cache;
pub(crate) mod scheduler;
pub mod state;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use sentra_api::{ActivityClient, HistoricalQuery, Severity, TransportConfig};

use crate::config::FeedConfig;
use crate::error::CoreError;
use crate::stream::FeedStream;
use cache::{CacheKey, FullRangeCache};
use state::FeedSnapshot;

/// The historical activity feed.
///
/// Cheaply cloneable via `Arc<FeedInner>`. All operations mutate one
/// shared [`FeedSnapshot`] behind a watch channel; consumers read it via
/// [`snapshot()`](Self::snapshot) or subscribe with
/// [`subscribe()`](Self::subscribe).
///
/// The feed is strictly read-only toward the backend: every side effect
/// is an HTTP GET.
#[derive(Clone)]
pub struct ActivityFeed {
    inner: Arc<FeedInner>,
}

struct FeedInner {
    client: ActivityClient,
    config: FeedConfig,
    cache: FullRangeCache,
    snapshot: watch::Sender<FeedSnapshot>,
    /// Generation counter for paginated fetches. Each fetch takes the next
    /// generation; a completion whose generation is no longer current
    /// applies nothing — superseded requests are silently discarded,
    /// success and failure alike.
    page_generation: AtomicU64,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl ActivityFeed {
    /// Create a feed from configuration. Does NOT fetch anything —
    /// call [`refresh()`](Self::refresh) or use [`start()`](Self::start).
    pub fn new(config: FeedConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let transport = TransportConfig {
            tls: config.tls.to_tls_mode(),
            timeout: config.timeout,
        };
        let client = ActivityClient::new(config.base_url.clone(), &transport)?;

        let (snapshot, _) = watch::channel(FeedSnapshot::initial(&config));
        let cache = FullRangeCache::new(config.cache_ttl);

        Ok(Self {
            inner: Arc::new(FeedInner {
                client,
                config,
                cache,
                snapshot,
                page_generation: AtomicU64::new(0),
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Create a feed, perform the initial load, and spawn the auto-refresh
    /// scheduler if enabled. The scheduler treats the consumer as always
    /// visible; use [`start_with_visibility()`](Self::start_with_visibility)
    /// to gate ticks.
    pub async fn start(config: FeedConfig) -> Result<Self, CoreError> {
        Self::start_with_visibility(config, || true).await
    }

    /// Like [`start()`](Self::start), but scheduled refreshes only run
    /// while `visible()` returns `true`. Skipped ticks still re-arm the
    /// timer, so the schedule never stalls.
    pub async fn start_with_visibility<V>(config: FeedConfig, visible: V) -> Result<Self, CoreError>
    where
        V: Fn() -> bool + Send + 'static,
    {
        let feed = Self::new(config)?;
        feed.refresh().await;
        if feed.inner.config.auto_refresh {
            feed.spawn_auto_refresh(visible);
        }
        Ok(feed)
    }

    /// Access the feed configuration.
    pub fn config(&self) -> &FeedConfig {
        &self.inner.config
    }

    /// Current state (cheap clone — the heavy fields are `Arc`s).
    pub fn snapshot(&self) -> FeedSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> FeedStream {
        FeedStream::new(self.inner.snapshot.subscribe())
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Clear the cache and run all three fetchers concurrently.
    ///
    /// Resolves when all have settled. Individual failures follow each
    /// fetcher's own semantics (error string for the paginated fetch,
    /// silent degradation for full-range and stats) — `refresh()` itself
    /// never fails.
    pub async fn refresh(&self) {
        self.inner.cache.clear();
        self.refetch_cycle().await;
    }

    async fn refetch_cycle(&self) {
        let page = self.inner.snapshot.borrow().current_page;
        tokio::join!(self.fetch_page(page), self.fetch_all(), self.fetch_stats());
    }

    // ── Pagination ───────────────────────────────────────────────────

    /// Navigate to a page. No-op unless `1 <= page <= total_pages` and
    /// the page actually changes.
    ///
    /// `current_page` moves when the fetch lands, in the same state update
    /// as the page data — subscribers never see a page number ahead of its
    /// records.
    pub async fn go_to_page(&self, page: u32) {
        {
            let snap = self.inner.snapshot.borrow();
            if page < 1 || page > snap.total_pages || page == snap.current_page {
                return;
            }
        }
        self.fetch_page(page).await;
    }

    /// Navigate forward if a next page exists.
    pub async fn next_page(&self) {
        let snap = self.snapshot();
        if snap.has_next_page() {
            self.go_to_page(snap.current_page + 1).await;
        }
    }

    /// Navigate backward if a previous page exists.
    pub async fn prev_page(&self) {
        let snap = self.snapshot();
        if snap.has_prev_page() {
            self.go_to_page(snap.current_page - 1).await;
        }
    }

    // ── Filters ──────────────────────────────────────────────────────

    /// Change the severity filter and re-run the full fetch cycle.
    ///
    /// The current page is deliberately kept: if it lies beyond the
    /// filtered set's range the server answers with an empty page and the
    /// new totals, and the snapshot reflects both.
    pub async fn set_status_filter(&self, status: Option<Severity>) {
        self.inner.snapshot.send_modify(|s| s.status_filter = status);
        self.refetch_cycle().await;
    }

    /// Change the source filter and re-run the full fetch cycle.
    /// Empty strings count as unset.
    pub async fn set_source_filter(&self, source: Option<String>) {
        let source = source.filter(|s| !s.is_empty());
        self.inner.snapshot.send_modify(|s| s.source_filter = source);
        self.refetch_cycle().await;
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Spawn the auto-refresh scheduler with a visibility predicate.
    pub fn spawn_auto_refresh<V>(&self, visible: V)
    where
        V: Fn() -> bool + Send + 'static,
    {
        let cancel = self.inner.cancel.child_token();
        let interval = self.inner.config.refresh_interval;
        let feed = self.clone();

        let handle = tokio::spawn(scheduler::run(interval, visible, cancel, move || {
            // Dispatch without awaiting: the re-arm must not wait on a slow
            // refresh. Overlap is tolerated; fetch supersession sorts it out.
            let feed = feed.clone();
            tokio::spawn(async move { feed.refresh().await });
        }));

        self.inner
            .task_handles
            .lock()
            .expect("task handle lock poisoned")
            .push(handle);
    }

    /// Cancel background tasks and wait for them to exit. No scheduled
    /// refresh fires after this returns.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let handles: Vec<JoinHandle<()>> = self
            .inner
            .task_handles
            .lock()
            .expect("task handle lock poisoned")
            .drain(..)
            .collect();
        for handle in handles {
            let _ = handle.await;
        }
    }

    // ── Ad-hoc queries ───────────────────────────────────────────────

    /// One-shot statistics query for non-reactive consumers (CLI listings).
    ///
    /// Unlike the background stats fetcher this surfaces the failure; on
    /// success the snapshot is updated as usual.
    pub async fn fetch_statistics(&self) -> Result<sentra_api::ActivityStats, CoreError> {
        let stats = self.inner.client.stats(self.inner.config.days).await?;
        self.inner
            .snapshot
            .send_modify(|s| s.stats = Some(Arc::new(stats.clone())));
        Ok(stats)
    }

    // ── Fetchers ─────────────────────────────────────────────────────

    /// Fetch one table page. On success the pagination fields are replaced
    /// wholesale from the server envelope in a single state update; on
    /// failure the error string is surfaced and the page empties. A
    /// superseded request applies nothing at all.
    async fn fetch_page(&self, page: u32) {
        let generation = self.inner.page_generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.inner.snapshot.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let query = {
            let snap = self.inner.snapshot.borrow();
            HistoricalQuery::page(self.inner.config.days, page, self.inner.config.page_size)
                .with_status(snap.status_filter)
                .with_source(snap.source_filter.clone())
        };

        let result = self.inner.client.historical(&query).await;

        if self.inner.page_generation.load(Ordering::SeqCst) != generation {
            debug!(page, "paginated fetch superseded; discarding result");
            return;
        }

        match result {
            Ok(envelope) => {
                let current_page = if envelope.page == 0 {
                    page
                } else {
                    envelope.page
                };
                self.inner.snapshot.send_modify(|s| {
                    s.activities = Arc::new(envelope.data);
                    s.current_page = current_page;
                    s.total_pages = envelope.pages;
                    s.total_activities = envelope.total;
                    s.page_stats = envelope.stats;
                    s.page_source = Some(envelope.source).filter(|src| !src.is_empty());
                    s.loading = false;
                    s.error = None;
                });
            }
            Err(e) => {
                warn!(error = %e, page, "paginated activity fetch failed");
                self.inner.snapshot.send_modify(|s| {
                    s.error = Some(e.to_string());
                    s.activities = Arc::new(Vec::new());
                    s.loading = false;
                });
            }
        }
    }

    /// Fetch the capped full range for aggregate consumption, through the
    /// TTL cache. Failures degrade to an empty sequence and never touch
    /// the page-level error — this feed is best-effort.
    async fn fetch_all(&self) {
        let (key, query) = {
            let snap = self.inner.snapshot.borrow();
            let key = CacheKey::new(
                self.inner.config.days,
                snap.status_filter,
                snap.source_filter.clone(),
            );
            let query = HistoricalQuery::full_range(self.inner.config.days)
                .with_status(snap.status_filter)
                .with_source(snap.source_filter.clone());
            (key, query)
        };

        if let Some(data) = self.inner.cache.get(&key) {
            debug!("full-range cache hit");
            self.inner.snapshot.send_modify(|s| {
                s.all_activities = data;
                s.all_loading = false;
            });
            return;
        }

        self.inner.snapshot.send_modify(|s| s.all_loading = true);

        match self.inner.client.historical(&query).await {
            Ok(envelope) => {
                let data = Arc::new(envelope.data);
                self.inner.cache.insert(key, Arc::clone(&data));
                self.inner.snapshot.send_modify(|s| {
                    s.all_activities = data;
                    s.all_loading = false;
                });
            }
            Err(e) => {
                warn!(error = %e, "full-range activity fetch failed");
                self.inner.snapshot.send_modify(|s| {
                    s.all_activities = Arc::new(Vec::new());
                    s.all_loading = false;
                });
            }
        }
    }

    /// Fetch aggregate statistics. On failure the previous snapshot is
    /// kept — stale-but-available beats cleared.
    async fn fetch_stats(&self) {
        match self.inner.client.stats(self.inner.config.days).await {
            Ok(stats) => {
                self.inner
                    .snapshot
                    .send_modify(|s| s.stats = Some(Arc::new(stats)));
            }
            Err(e) => {
                debug!(error = %e, "stats fetch failed; keeping previous snapshot");
            }
        }
    }
}
