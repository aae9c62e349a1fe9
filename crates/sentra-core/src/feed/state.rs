// ── Feed snapshot ──
//
// One immutable struct for everything a dashboard view needs. Published
// through a single watch channel; every mutation is one `send_modify`,
// so `activities`/`current_page`/`total_pages` can never be observed
// mid-transition.

use std::sync::Arc;

use sentra_api::{Activity, ActivityStats, Severity, SeverityCounts};

use crate::config::FeedConfig;

/// Point-in-time state of the activity feed.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// The current table page of activities.
    pub activities: Arc<Vec<Activity>>,
    /// Whether a paginated fetch is in flight.
    pub loading: bool,
    /// Error from the most recent paginated fetch, if it failed.
    /// Best-effort fetches (full-range, stats) never set this.
    pub error: Option<String>,

    /// Full-range records for aggregate/chart consumption (capped at 1000).
    pub all_activities: Arc<Vec<Activity>>,
    /// Whether a full-range fetch is in flight.
    pub all_loading: bool,

    // Pagination, taken from the server's page envelope.
    pub current_page: u32,
    pub total_pages: u32,
    pub total_activities: u64,

    /// Per-page severity counts reported by the backend.
    pub page_stats: Option<SeverityCounts>,
    /// Where the backend sourced the page ("database" or "simulator").
    pub page_source: Option<String>,

    /// Latest aggregate statistics. Kept stale rather than cleared when a
    /// stats fetch fails.
    pub stats: Option<Arc<ActivityStats>>,

    // Active filters.
    pub status_filter: Option<Severity>,
    pub source_filter: Option<String>,
}

impl FeedSnapshot {
    /// Initial state before any fetch has completed.
    pub(crate) fn initial(config: &FeedConfig) -> Self {
        Self {
            activities: Arc::new(Vec::new()),
            loading: false,
            error: None,
            all_activities: Arc::new(Vec::new()),
            all_loading: false,
            current_page: 1,
            total_pages: 0,
            total_activities: 0,
            page_stats: None,
            page_source: None,
            stats: None,
            status_filter: config.status_filter,
            source_filter: config
                .source_filter
                .clone()
                .filter(|s| !s.is_empty()),
        }
    }

    /// Whether a later page exists.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether an earlier page exists.
    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    /// Severity distribution for the active range.
    ///
    /// Uses the backend-computed distribution when available; otherwise
    /// tallies `all_activities`, ignoring severities outside the three
    /// canonical buckets.
    pub fn status_distribution(&self) -> SeverityCounts {
        if let Some(stats) = &self.stats {
            if let Some(dist) = stats.status_distribution {
                return dist;
            }
        }

        let mut counts = SeverityCounts::default();
        for activity in self.all_activities.iter() {
            counts.record(activity.status);
        }
        counts
    }
}
