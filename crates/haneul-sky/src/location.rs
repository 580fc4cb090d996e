//! Shared observer location.

use std::sync::{Arc, RwLock};

use haneul_core::{DEFAULT_LOCATION, Location};

/// Where the current location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationSource {
    /// Built-in default; geolocation has not resolved (or failed).
    #[default]
    Fallback,
    /// Fixed coordinates from the config file or command line.
    Configured,
    /// Resolved by a geolocation lookup.
    Geolocated,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LocationState {
    location: Location,
    source: LocationSource,
}

/// Process-wide current location with single-writer-at-startup semantics.
///
/// Cloning yields another handle to the same state. The first successful
/// [`resolve`](Self::resolve) wins; later calls are ignored. Readers never
/// block: a contended read falls back to the last cached value.
#[derive(Debug, Clone)]
pub struct LocationCell {
    /// Current state written by the resolver.
    state: Arc<RwLock<LocationState>>,
    /// Copy of the state for when the lock is contended.
    cached: Arc<RwLock<LocationState>>,
}

impl Default for LocationCell {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION)
    }
}

impl LocationCell {
    /// Create a cell holding a fallback location.
    pub fn new(fallback: Location) -> Self {
        let state = LocationState {
            location: fallback,
            source: LocationSource::Fallback,
        };
        Self {
            state: Arc::new(RwLock::new(state)),
            cached: Arc::new(RwLock::new(state)),
        }
    }

    /// Create a cell that is already resolved to a configured location.
    pub fn configured(location: Location) -> Self {
        let cell = Self::new(location);
        cell.resolve(location, LocationSource::Configured);
        cell
    }

    /// Store a resolved location. Returns `false` if the cell was already
    /// resolved or the location is invalid.
    pub fn resolve(&self, location: Location, source: LocationSource) -> bool {
        if !location.is_valid() || source == LocationSource::Fallback {
            return false;
        }
        let next = LocationState { location, source };
        {
            let Ok(mut state) = self.state.write() else {
                return false;
            };
            if state.source != LocationSource::Fallback {
                return false;
            }
            *state = next;
        }
        if let Ok(mut cached) = self.cached.write() {
            *cached = next;
        }
        true
    }

    fn snapshot(&self) -> LocationState {
        if let Ok(state) = self.state.try_read() {
            return *state;
        }
        if let Ok(cached) = self.cached.read() {
            return *cached;
        }
        LocationState {
            location: DEFAULT_LOCATION,
            source: LocationSource::Fallback,
        }
    }

    /// Current location.
    pub fn get(&self) -> Location {
        self.snapshot().location
    }

    /// Where the current location came from.
    pub fn source(&self) -> LocationSource {
        self.snapshot().source
    }

    pub fn is_resolved(&self) -> bool {
        self.source() != LocationSource::Fallback
    }
}
