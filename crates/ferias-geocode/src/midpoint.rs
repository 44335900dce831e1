use ferias_core::Coordinate;

/// Arithmetic mean of two coordinates.
///
/// A planar approximation; at city scale the error against the geodesic
/// midpoint is well under a metre.
#[must_use]
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::new(
        (a.latitude + b.latitude) / 2.0,
        (a.longitude + b.longitude) / 2.0,
    )
}
