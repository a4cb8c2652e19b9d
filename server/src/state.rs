use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use simulation::{NullSink, SessionSink};

use crate::db::PgSessionStore;

/// Shared application state handed to every request
pub struct AppState {
    pub store: Option<PgSessionStore>,
    pub seed: Option<u64>,
}

impl AppState {
    /// Where session records go; discarded without a store
    pub fn sink(&self) -> &dyn SessionSink {
        match &self.store {
            Some(store) => store as &dyn SessionSink,
            None => &NullSink,
        }
    }

    /// Fresh random source for one simulation run
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

// -- Serializable types returned by commands --

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PartnersResponse {
    /// `null` when the average is not a number (an empty population)
    pub average_partners: Option<f64>,
}

impl From<f64> for PartnersResponse {
    fn from(average: f64) -> Self {
        Self {
            average_partners: average.is_finite().then_some(average),
        }
    }
}
