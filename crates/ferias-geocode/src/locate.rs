//! Places whole feria records on the map.
//!
//! A range is placed at the midpoint of its two end intersections. A corner
//! is placed at its intersection, a street-only feria at the street itself.
//! Every lookup is tried with the barrio in the query first and without it
//! second. When a range endpoint or a corner cannot be found, the street
//! alone is tried as a last resort.

use ferias_core::{
    Coordinate, FeriaRecord, GeocodeStatus, GeocodedRecord, Placement, Stretch,
};

use crate::error::GeocodeError;
use crate::midpoint::midpoint;
use crate::query::clean_street;
use crate::resolver::{AddressResolver, Geocoder};

/// Outcome counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    pub resolved: usize,
    pub failed: usize,
}

/// Resolves one record. Never fails: an unplaceable record comes back with
/// [`GeocodeStatus::Failed`].
pub async fn resolve_record<G: Geocoder>(
    resolver: &mut AddressResolver<G>,
    record: FeriaRecord,
) -> GeocodedRecord {
    let status = match locate(resolver, &record).await {
        Ok((coordinate, placement)) => GeocodeStatus::Resolved {
            coordinate,
            placement,
        },
        Err(err) => {
            tracing::warn!(
                barrio = %record.barrio,
                street = %record.street,
                day = %record.day,
                error = %err,
                "could not place feria"
            );
            GeocodeStatus::Failed {
                reason: err.failure(),
            }
        }
    };
    GeocodedRecord { record, status }
}

/// Resolves every record in order, one request at a time.
pub async fn resolve_all<G, I>(
    resolver: &mut AddressResolver<G>,
    records: I,
) -> (Vec<GeocodedRecord>, ResolveSummary)
where
    G: Geocoder,
    I: IntoIterator<Item = FeriaRecord>,
{
    resolve_all_with(resolver, records, |_| {}).await
}

/// Like [`resolve_all`], calling `on_record` after each record is placed or
/// given up on.
pub async fn resolve_all_with<G, I, F>(
    resolver: &mut AddressResolver<G>,
    records: I,
    mut on_record: F,
) -> (Vec<GeocodedRecord>, ResolveSummary)
where
    G: Geocoder,
    I: IntoIterator<Item = FeriaRecord>,
    F: FnMut(&GeocodedRecord),
{
    let mut summary = ResolveSummary::default();
    let mut out = Vec::new();

    for record in records {
        let geocoded = resolve_record(resolver, record).await;
        match geocoded.status {
            GeocodeStatus::Resolved { .. } => summary.resolved += 1,
            GeocodeStatus::Failed { .. } => summary.failed += 1,
        }
        on_record(&geocoded);
        out.push(geocoded);
    }

    tracing::info!(
        resolved = summary.resolved,
        failed = summary.failed,
        "geocoding complete"
    );
    (out, summary)
}

async fn locate<G: Geocoder>(
    resolver: &mut AddressResolver<G>,
    record: &FeriaRecord,
) -> Result<(Coordinate, Placement), GeocodeError> {
    let street = clean_street(&record.street);
    let barrio = record.barrio.as_str();

    let exact = match &record.stretch {
        Stretch::Range { from, to } => {
            match intersection(resolver, &street, &clean_street(from), barrio).await {
                Ok(start) => intersection(resolver, &street, &clean_street(to), barrio)
                    .await
                    .map(|end| (midpoint(start, end), Placement::Midpoint)),
                Err(e) => Err(e),
            }
        }
        Stretch::Corner { cross } => {
            intersection(resolver, &street, &clean_street(cross), barrio)
                .await
                .map(|c| (c, Placement::Point))
        }
        Stretch::Street => {
            return with_barrio_fallback(resolver, &street, barrio)
                .await
                .map(|c| (c, Placement::Point));
        }
    };

    match exact {
        Err(GeocodeError::NotFound { .. }) => {
            tracing::debug!(
                street = %street,
                barrio,
                "cross streets not found, placing at street"
            );
            with_barrio_fallback(resolver, &street, barrio)
                .await
                .map(|c| (c, Placement::Point))
        }
        other => other,
    }
}

async fn intersection<G: Geocoder>(
    resolver: &mut AddressResolver<G>,
    street: &str,
    cross: &str,
    barrio: &str,
) -> Result<Coordinate, GeocodeError> {
    with_barrio_fallback(resolver, &format!("{street} y {cross}"), barrio).await
}

/// Tries `"<description>, <barrio>"`, then `description` alone on not-found.
async fn with_barrio_fallback<G: Geocoder>(
    resolver: &mut AddressResolver<G>,
    description: &str,
    barrio: &str,
) -> Result<Coordinate, GeocodeError> {
    match resolver.resolve(&format!("{description}, {barrio}")).await {
        Err(GeocodeError::NotFound { .. }) => resolver.resolve(description).await,
        other => other,
    }
}
