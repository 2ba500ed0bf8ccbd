//! # Geocode Module
//!
//! Durable coordinate→label cache in front of the external
//! reverse-geocoding collaborator, with bounded retries and graceful
//! degradation.
//!
//! ## Contract
//! `resolve` never fails: on a cache hit it returns the cached label;
//! on a miss it attempts the external lookup up to 3 times with a
//! fixed backoff, persists a success, and otherwise degrades to the
//! literal `Unknown_Location`. A failed lookup is never a
//! pipeline-halting condition.

mod provider;
mod store;

pub use provider::{Address, ReverseGeocoder};
pub use store::GeocodeStore;

use crate::core::metadata::Coordinates;
use crate::error::GeocodeError;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Label substituted when geocoding fails or no coordinates exist
pub const UNKNOWN_LOCATION: &str = "Unknown_Location";

/// Lookup attempts per cache miss
const RETRY_ATTEMPTS: u32 = 3;

/// Fixed pause between lookup attempts
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// A location label plus whether geocoding actually succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// Human-readable place label
    pub label: String,
    /// True when the label came from the cache or a successful lookup
    pub found: bool,
}

impl ResolvedLocation {
    /// The degraded "no location" value
    pub fn unknown() -> Self {
        Self {
            label: UNKNOWN_LOCATION.to_string(),
            found: false,
        }
    }
}

/// Cache in front of a reverse-geocoding provider.
///
/// Owns the durable store for the run's duration.
pub struct GeocodeCache {
    provider: Box<dyn ReverseGeocoder>,
    store: GeocodeStore,
    attempts: u32,
    backoff: Duration,
}

impl GeocodeCache {
    /// Create a cache over a provider and an opened store
    pub fn new(provider: Box<dyn ReverseGeocoder>, store: GeocodeStore) -> Self {
        Self {
            provider,
            store,
            attempts: RETRY_ATTEMPTS,
            backoff: RETRY_BACKOFF,
        }
    }

    /// A cache with no provider behind it. Cache hits still resolve;
    /// every miss degrades to `Unknown_Location` without retrying.
    pub fn offline(store: GeocodeStore) -> Self {
        struct Offline;
        impl ReverseGeocoder for Offline {
            fn reverse(&self, _coordinates: Coordinates) -> Result<Address, GeocodeError> {
                Err(GeocodeError::Service(
                    "no geocoding provider configured".to_string(),
                ))
            }
        }

        Self::new(Box::new(Offline), store).with_retry_policy(1, Duration::ZERO)
    }

    /// Override the retry policy (tests use a zero backoff)
    pub fn with_retry_policy(mut self, attempts: u32, backoff: Duration) -> Self {
        self.attempts = attempts.max(1);
        self.backoff = backoff;
        self
    }

    /// Resolve coordinates to a location label. Total; never fails.
    pub fn resolve(&mut self, coordinates: Option<Coordinates>) -> ResolvedLocation {
        let Some(coordinates) = coordinates else {
            return ResolvedLocation::unknown();
        };

        let key = cache_key(coordinates);

        if let Some(label) = self.store.get(&key) {
            debug!(%key, label, "geocode cache hit");
            return ResolvedLocation {
                label: label.to_string(),
                found: true,
            };
        }

        match self.lookup_with_retry(coordinates) {
            Some(address) => {
                let label = address
                    .label()
                    .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

                // Persist before returning so the label stays stable
                // for the rest of the process and across runs
                if let Err(e) = self.store.insert(key, label.clone()) {
                    warn!(error = %e, "failed to persist geocode cache entry");
                }

                ResolvedLocation { label, found: true }
            }
            None => ResolvedLocation::unknown(),
        }
    }

    /// Number of entries currently in the durable store
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the durable store is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn lookup_with_retry(&self, coordinates: Coordinates) -> Option<Address> {
        for attempt in 1..=self.attempts {
            match self.provider.reverse(coordinates) {
                Ok(address) => return Some(address),
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts = self.attempts,
                        error = %e,
                        "reverse-geocode attempt failed"
                    );
                    if attempt < self.attempts {
                        thread::sleep(self.backoff);
                    }
                }
            }
        }
        None
    }
}

/// Round a coordinate pair to 5 decimal places and stringify it
fn cache_key(coordinates: Coordinates) -> String {
    format!("{:.5},{:.5}", coordinates.latitude, coordinates.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Provider that counts calls and replays a scripted response
    struct ScriptedGeocoder {
        calls: Arc<AtomicUsize>,
        response: Result<Address, ()>,
        /// Fail this many times before the scripted response applies
        failures_first: usize,
    }

    impl ScriptedGeocoder {
        fn succeeding(address: Address) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: calls.clone(),
                    response: Ok(address),
                    failures_first: 0,
                },
                calls,
            )
        }

        fn failing() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: calls.clone(),
                    response: Err(()),
                    failures_first: 0,
                },
                calls,
            )
        }
    }

    impl ReverseGeocoder for ScriptedGeocoder {
        fn reverse(&self, _coordinates: Coordinates) -> Result<Address, GeocodeError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_first {
                return Err(GeocodeError::Timeout);
            }
            match &self.response {
                Ok(address) => Ok(address.clone()),
                Err(()) => Err(GeocodeError::Service("unavailable".to_string())),
            }
        }
    }

    fn lincoln() -> Address {
        Address {
            city: Some("Lincoln".to_string()),
            country: Some("USA".to_string()),
            ..Default::default()
        }
    }

    fn coords() -> Coordinates {
        Coordinates {
            latitude: 40.8109,
            longitude: -96.6901,
        }
    }

    fn fast_cache(provider: Box<dyn ReverseGeocoder>) -> GeocodeCache {
        GeocodeCache::new(provider, GeocodeStore::in_memory())
            .with_retry_policy(3, Duration::ZERO)
    }

    #[test]
    fn no_coordinates_skips_external_call() {
        let (provider, calls) = ScriptedGeocoder::succeeding(lincoln());
        let mut cache = fast_cache(Box::new(provider));

        let resolved = cache.resolve(None);

        assert_eq!(resolved, ResolvedLocation::unknown());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn successful_lookup_is_cached() {
        let (provider, calls) = ScriptedGeocoder::succeeding(lincoln());
        let mut cache = fast_cache(Box::new(provider));

        let first = cache.resolve(Some(coords()));
        assert_eq!(first.label, "Lincoln, USA");
        assert!(first.found);

        // Second lookup with the same rounded key: no new external call
        let second = cache.resolve(Some(coords()));
        assert_eq!(second.label, first.label);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn nearby_coordinates_share_a_rounded_key() {
        let (provider, calls) = ScriptedGeocoder::succeeding(lincoln());
        let mut cache = fast_cache(Box::new(provider));

        cache.resolve(Some(Coordinates {
            latitude: 40.810900001,
            longitude: -96.690100002,
        }));
        cache.resolve(Some(Coordinates {
            latitude: 40.810900009,
            longitude: -96.690100008,
        }));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn persistent_failure_degrades_to_unknown() {
        let (provider, calls) = ScriptedGeocoder::failing();
        let mut cache = fast_cache(Box::new(provider));

        let resolved = cache.resolve(Some(coords()));

        assert_eq!(resolved, ResolvedLocation::unknown());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Failures are never cached
        assert!(cache.is_empty());
    }

    #[test]
    fn transient_failure_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = ScriptedGeocoder {
            calls: calls.clone(),
            response: Ok(lincoln()),
            failures_first: 2,
        };
        let mut cache = fast_cache(Box::new(provider));

        let resolved = cache.resolve(Some(coords()));

        assert!(resolved.found);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn cache_key_rounds_to_five_decimals() {
        let key = cache_key(Coordinates {
            latitude: 40.810936111,
            longitude: -96.690051234,
        });
        assert_eq!(key, "40.81094,-96.69005");
    }
}
