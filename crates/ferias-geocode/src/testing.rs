//! In-memory geocoder for unit tests.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Mutex;

use ferias_core::Coordinate;

use crate::error::GeocodeError;
use crate::resolver::Geocoder;

/// Answers from a fixed address book, optionally preceded by a queue of
/// scripted errors. Records every query it receives.
#[derive(Default)]
pub(crate) struct FakeGeocoder {
    places: HashMap<String, Coordinate>,
    failures: Mutex<VecDeque<GeocodeError>>,
    pub(crate) queries: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub(crate) fn with_place(mut self, query: &str, latitude: f64, longitude: f64) -> Self {
        self.places
            .insert(query.to_owned(), Coordinate::new(latitude, longitude));
        self
    }

    /// Queues `n` rate-limit responses served before any lookup.
    pub(crate) fn rate_limited(self, n: usize) -> Self {
        {
            let mut failures = self.failures.lock().unwrap();
            for _ in 0..n {
                failures.push_back(GeocodeError::RateLimited {
                    query: "scripted".to_owned(),
                });
            }
        }
        self
    }

    pub(crate) fn then_fail(self, err: GeocodeError) -> Self {
        self.failures.lock().unwrap().push_back(err);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Coordinate, GeocodeError>> + Send {
        self.queries.lock().unwrap().push(query.to_owned());
        let result = match self.failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => self
                .places
                .get(query)
                .copied()
                .ok_or_else(|| GeocodeError::NotFound {
                    query: query.to_owned(),
                }),
        };
        async move { result }
    }
}
