// Hand-crafted async HTTP client for the telemetry backend.
//
// Two endpoints, both read-only GETs:
//   /api/activities/historical — paginated activity records
//   /api/activities/stats      — precomputed aggregates

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::model::{ActivityPage, ActivityStats, Severity};
use crate::transport::TransportConfig;

/// Hard cap on a full-range fetch. The backend never returns more than
/// this many records in one response regardless of the requested limit.
pub const FULL_RANGE_LIMIT: u32 = 1000;

/// Largest page size the backend accepts for table pages.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Largest day range the backend accepts; larger values are clamped
/// server-side.
pub const MAX_DAYS: u32 = 30;

// ── Error response shape ─────────────────────────────────────────────

/// The backend wraps failures as `{"error": "..."}` with a non-2xx status.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

// ── Query parameters ─────────────────────────────────────────────────

/// Query parameters for the historical-activities endpoint.
///
/// `status` and `source` are omitted from the query string entirely when
/// unset — the backend treats an absent parameter as "unfiltered".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalQuery {
    pub days: u32,
    pub page: u32,
    pub limit: u32,
    pub status: Option<Severity>,
    pub source: Option<String>,
}

impl HistoricalQuery {
    /// Query for a single table page.
    pub fn page(days: u32, page: u32, limit: u32) -> Self {
        Self {
            days,
            page,
            limit,
            status: None,
            source: None,
        }
    }

    /// Query for the capped full range (chart/aggregate consumption).
    pub fn full_range(days: u32) -> Self {
        Self {
            days,
            page: 1,
            limit: FULL_RANGE_LIMIT,
            status: None,
            source: None,
        }
    }

    /// Set the severity filter.
    pub fn with_status(mut self, status: Option<Severity>) -> Self {
        self.status = status;
        self
    }

    /// Set the source filter. Empty strings count as unset.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source.filter(|s| !s.is_empty());
        self
    }

    /// Render as query-string pairs.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("days", self.days.to_string()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(ref source) = self.source {
            params.push(("source", source.clone()));
        }
        params
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the telemetry backend.
///
/// Cheap to clone; all requests share one `reqwest::Client`.
#[derive(Clone)]
pub struct ActivityClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ActivityClient {
    /// Create a client from a backend base URL and transport config.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::from_reqwest(http, base_url))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(http: reqwest::Client, mut base_url: Url) -> Self {
        // Normalize so relative joins below always work.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join a relative endpoint path onto the base URL.
    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .expect("endpoint path should be a valid relative URL")
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch one page (or the capped full range) of historical activities.
    pub async fn historical(&self, query: &HistoricalQuery) -> Result<ActivityPage, Error> {
        self.get_with_params("api/activities/historical", &query.params())
            .await
    }

    /// Fetch precomputed aggregate statistics for the given day range.
    pub async fn stats(&self, days: u32) -> Result<ActivityStats, Error> {
        self.get_with_params("api/activities/stats", &[("days", days.to_string())])
            .await
    }

    // ── Request plumbing ─────────────────────────────────────────────

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map_or_else(|| status.to_string(), ToOwned::to_owned)
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
