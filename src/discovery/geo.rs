//! Great-circle distance and input validation.

use super::types::{DiscoveryError, GeoPoint, PointOfInterest};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

pub fn validate_point(point: GeoPoint) -> Result<GeoPoint, DiscoveryError> {
    if !point.latitude.is_finite() || !(-90.0..=90.0).contains(&point.latitude) {
        return Err(DiscoveryError::InvalidArgument(format!(
            "latitude {} outside -90..90",
            point.latitude
        )));
    }
    if !point.longitude.is_finite() || !(-180.0..=180.0).contains(&point.longitude) {
        return Err(DiscoveryError::InvalidArgument(format!(
            "longitude {} outside -180..180",
            point.longitude
        )));
    }
    Ok(point)
}

pub fn validate_radius(radius_km: f64) -> Result<f64, DiscoveryError> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(DiscoveryError::InvalidArgument(format!(
            "radius must be a positive number of kilometers, got {}",
            radius_km
        )));
    }
    Ok(radius_km)
}

/// Annotate each place with its distance from `reference`, keep those within
/// `radius_km` (inclusive) and order them nearest first.
pub fn rank_within(
    places: impl IntoIterator<Item = PointOfInterest>,
    reference: GeoPoint,
    radius_km: f64,
) -> Vec<PointOfInterest> {
    let mut ranked: Vec<PointOfInterest> = places
        .into_iter()
        .map(|mut place| {
            place.distance_km = Some(haversine_km(reference, place.location));
            place
        })
        .filter(|place| place.distance_km.is_some_and(|d| d <= radius_km))
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}
