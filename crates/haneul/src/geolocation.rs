//! One-shot IP geolocation.
//!
//! Looks the observer up once at startup in a background thread and writes
//! the result into the shared [`LocationCell`]. Until it lands (or if it
//! fails) the sky keeps rendering for the fallback location.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use haneul_core::Location;
use haneul_sky::{LocationCell, LocationSource};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Errors from a geolocation lookup.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lookup rejected: {0}")]
    Rejected(String),

    #[error("response has no coordinates")]
    MissingCoordinates,

    #[error("coordinates out of range: lat {lat}, lng {lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
}

/// Geolocation JSON response (partial - only fields we need).
///
/// Accepts both the `latitude`/`longitude` and `lat`/`lon` spellings.
#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lon")]
    longitude: Option<f64>,
    /// `"success"` or `"fail"` on services that report a status.
    status: Option<String>,
    /// Set on services that flag failures with a boolean.
    #[serde(default)]
    error: bool,
    #[serde(alias = "message")]
    reason: Option<String>,
}

/// Parse a geolocation response body.
pub fn parse_location(body: &str) -> Result<Location, GeoError> {
    let response: GeoResponse = serde_json::from_str(body)?;

    let failed = response.error
        || response
            .status
            .as_deref()
            .is_some_and(|s| !s.eq_ignore_ascii_case("success"));
    if failed {
        return Err(GeoError::Rejected(
            response.reason.unwrap_or_else(|| "unknown reason".to_string()),
        ));
    }

    let (Some(lat), Some(lng)) = (response.latitude, response.longitude) else {
        return Err(GeoError::MissingCoordinates);
    };
    let location = Location::new(lat, lng);
    if !location.is_valid() {
        return Err(GeoError::InvalidCoordinates { lat, lng });
    }
    Ok(location)
}

/// Fetch the location from `endpoint` with a global request timeout.
fn fetch_location(endpoint: &str, timeout: Duration) -> Result<Location, GeoError> {
    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .new_agent();

    let body = agent.get(endpoint).call()?.body_mut().read_to_string()?;
    parse_location(&body)
}

/// Resolves a [`LocationCell`] from an IP geolocation service.
#[derive(Debug, Clone)]
pub struct GeoLocator {
    cell: LocationCell,
    endpoint: String,
    timeout: Duration,
}

impl GeoLocator {
    pub fn new(cell: LocationCell, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            cell,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Start the lookup thread. Does nothing if the cell is already resolved.
    pub fn start(self) -> Option<JoinHandle<()>> {
        if self.cell.is_resolved() {
            debug!("location already resolved, skipping geolocation");
            return None;
        }
        match thread::Builder::new()
            .name("geolocation".to_string())
            .spawn(move || self.run())
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "failed to spawn geolocation thread");
                None
            }
        }
    }

    /// Perform the lookup on the current thread. No retries.
    pub fn run(&self) {
        match fetch_location(&self.endpoint, self.timeout) {
            Ok(location) => {
                if self.cell.resolve(location, LocationSource::Geolocated) {
                    info!(%location, "geolocation resolved");
                } else {
                    debug!(%location, "geolocation result ignored; location already set");
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = %self.cell.get(),
                    "geolocation failed; keeping fallback location"
                );
            }
        }
    }
}
