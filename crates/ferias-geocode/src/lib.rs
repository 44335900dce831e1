pub mod client;
pub mod error;
pub mod locate;
pub mod midpoint;
pub mod query;
pub mod resolver;
pub mod retry;

#[cfg(test)]
mod testing;

pub use client::NominatimClient;
pub use error::GeocodeError;
pub use locate::{resolve_all, resolve_all_with, resolve_record, ResolveSummary};
pub use midpoint::midpoint;
pub use query::clean_street;
pub use resolver::{AddressResolver, Geocoder};
pub use retry::RetryPolicy;
