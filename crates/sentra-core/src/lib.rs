//! Reactive data layer between `sentra-api` and UI consumers.
//!
//! This crate owns the historical-activity feed logic for the sentra
//! workspace:
//!
//! - **[`ActivityFeed`]** — Central facade managing the feed lifecycle:
//!   [`start()`](ActivityFeed::start) performs the initial load and spawns
//!   the auto-refresh scheduler; pagination, filter, and refresh operations
//!   all go through it.
//!
//! - **[`FeedSnapshot`]** — One immutable state struct (activities,
//!   pagination, filters, stats) published through a `watch` channel.
//!   Related fields always change together in a single send, so consumers
//!   can never observe a half-applied page transition.
//!
//! - **[`FeedStream`]** — Subscription handle vended by the feed. Exposes
//!   `current()` / `latest()` / `changed()` for reactive rendering.
//!
//! - **[`FeedConfig`]** — Runtime configuration (backend URL, day range,
//!   page size, refresh cadence). Built by the CLI from profiles; this
//!   crate never reads config files.
//!
//! The feed issues only read-only HTTP GETs — there is no write-back to
//! the backend from this layer.

pub mod config;
pub mod error;
pub mod feed;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{FeedConfig, TlsVerification};
pub use error::CoreError;
pub use feed::ActivityFeed;
pub use feed::state::FeedSnapshot;
pub use stream::FeedStream;

// Re-export wire types at the crate root for ergonomics.
pub use sentra_api::{
    Activity, ActivityPage, ActivityStats, DailyStat, DatabaseStats, Severity, SeverityCounts,
};
