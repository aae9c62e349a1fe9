// ── Wire types for the telemetry backend ──
//
// Everything here is deserialization-tolerant: missing envelope fields
// default rather than fail, and unrecognized severity strings land in
// `Severity::Unknown` instead of aborting the whole page.

use serde::{Deserialize, Serialize};

/// Severity bucket of an activity record.
///
/// The backend emits free-form strings; anything outside the three
/// canonical buckets deserializes to `Unknown` and is excluded from
/// severity tallies.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    Low,
    Medium,
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// The three canonical buckets, in ascending order.
    pub const BUCKETS: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Whether this is one of the canonical low/medium/high buckets.
    pub fn is_bucketed(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Per-severity counts, as attached to page envelopes and stats payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub low: u64,
}

impl SeverityCounts {
    /// Count one record. `Unknown` severities increment no bucket.
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
            Severity::Unknown => {}
        }
    }

    /// Sum across all three buckets.
    pub fn total(&self) -> u64 {
        self.high + self.medium + self.low
    }
}

/// A single logged security/network event.
///
/// Immutable once received — the client only reads and displays these.
/// Required fields carry defaults so a sparse record from the backend's
/// sample generator still parses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    #[serde(default)]
    pub message: String,
    /// ISO-8601 timestamp, passed through verbatim.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub threat_score: f64,
    #[serde(default)]
    pub status: Severity,
    #[serde(default)]
    pub alert_level: String,

    // Device metadata
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub os_name: Option<String>,
    #[serde(default)]
    pub device_category: Option<String>,
    #[serde(default)]
    pub src_mac: Option<String>,

    // IPs and countries
    #[serde(default)]
    pub src_ip: Option<String>,
    #[serde(default)]
    pub dst_ip: Option<String>,
    #[serde(default)]
    pub src_country: Option<String>,
    #[serde(default)]
    pub dst_country: Option<String>,

    // Ports and services
    #[serde(default)]
    pub src_port: Option<String>,
    #[serde(default)]
    pub dst_port: Option<String>,
    #[serde(default)]
    pub service: Option<String>,

    // Protocol and firewall action
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub action: Option<String>,

    // Network interfaces and policy
    #[serde(default)]
    pub src_interface: Option<String>,
    #[serde(default)]
    pub dst_interface: Option<String>,
    #[serde(default)]
    pub src_interface_role: Option<String>,
    #[serde(default)]
    pub dst_interface_role: Option<String>,
    #[serde(default)]
    pub policy_id: Option<String>,
    #[serde(default)]
    pub policy_type: Option<String>,

    // Traffic counters (the log source reports these as strings)
    #[serde(default)]
    pub bytes_sent: Option<String>,
    #[serde(default)]
    pub bytes_received: Option<String>,
    #[serde(default)]
    pub packets_sent: Option<String>,
    #[serde(default)]
    pub packets_received: Option<String>,
    #[serde(default)]
    pub session_duration: Option<String>,
    #[serde(default)]
    pub translation_type: Option<String>,
}

/// Paginated envelope from `/api/activities/historical`.
///
/// Every field defaults when absent: a partial response degrades to an
/// empty page, never a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityPage {
    #[serde(default)]
    pub data: Vec<Activity>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub pages: u32,
    /// Where the backend sourced the page ("database" or "simulator").
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub timestamp: String,
    /// Per-page severity counts computed by the backend.
    #[serde(default)]
    pub stats: Option<SeverityCounts>,
    #[serde(default)]
    pub days_range: Option<u32>,
}

/// Aggregate statistics from `/api/activities/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityStats {
    #[serde(default)]
    pub total_activities: u64,
    #[serde(default)]
    pub status_distribution: Option<SeverityCounts>,
    #[serde(default)]
    pub days_range: u32,
    #[serde(default)]
    pub daily_stats: Vec<DailyStat>,
    #[serde(default)]
    pub database_stats: Option<DatabaseStats>,
    #[serde(default)]
    pub last_sync: Option<i64>,
}

/// One day's threat breakdown within `ActivityStats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyStat {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub high_threats: u64,
    #[serde(default)]
    pub medium_threats: u64,
    #[serde(default)]
    pub low_threats: u64,
    #[serde(default)]
    pub total_logs: u64,
}

/// Totals reported straight from the backend's database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub low: u64,
}
