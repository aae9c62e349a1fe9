// sentra-api: Async HTTP client for the sentra telemetry backend.
//
// Two read-only JSON endpoints: /api/activities/historical (paginated
// activity records) and /api/activities/stats (precomputed aggregates).

pub mod client;
pub mod error;
pub mod model;
pub mod transport;

pub use client::{ActivityClient, HistoricalQuery, FULL_RANGE_LIMIT, MAX_DAYS, MAX_PAGE_LIMIT};
pub use error::Error;
pub use model::{Activity, ActivityPage, ActivityStats, DailyStat, DatabaseStats, Severity, SeverityCounts};
pub use transport::{TlsMode, TransportConfig};
