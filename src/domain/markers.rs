//! Fixed marker catalogue
//!
//! The markers shown on the map come from a literal list compiled into the
//! binary. The registry is seeded once at startup and never mutated for the
//! rest of the session; malformed literal data is a build-time concern, not a
//! runtime error path.

use crate::domain::geo::LocationFix;

/// A labeled point rendered on the map surface
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub title: String,
    pub snippet: String,
    pub coordinate: LocationFix,
}

impl MarkerSpec {
    fn new(title: &str, snippet: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            title: title.to_string(),
            snippet: snippet.to_string(),
            coordinate: LocationFix::new(latitude, longitude),
        }
    }
}

/// Immutable marker list for the session
#[derive(Debug, Clone)]
pub struct MarkerRegistry {
    specs: Vec<MarkerSpec>,
}

impl MarkerRegistry {
    /// Loads the default marker set from the built-in literal list
    ///
    /// Deterministic and infallible: the same specs come back on every call.
    pub fn with_defaults() -> Self {
        Self {
            specs: vec![
                MarkerSpec::new("stuff", "stuff caption", 40.852651, -73.877160),
                MarkerSpec::new("stuff 2", "stuff caption", 40.824718, -73.870377),
                MarkerSpec::new("stuff 3", "stuff caption", 40.821302, -73.844189),
            ],
        }
    }

    /// All marker specs, in load order
    pub fn specs(&self) -> &[MarkerSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
