//! Discovery service — orchestrates the fallback chain.
//!
//! Flow:  place name → geocode (optional) → live venue search → seed dataset
//!
//! Upstream failures never reach the caller; only invalid input does.

use super::geo::{rank_within, validate_point, validate_radius};
use super::providers::{venue_to_poi, Geocoder, NominatimGeocoder, OverpassPoiSource, PoiSource};
use super::seed::seed_places;
use super::types::{Discovery, DiscoveryError, DiscoverySource, GeoPoint, PointOfInterest};
use crate::config::DiscoveryConfig;
use tracing::{debug, warn};

pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Finds venues near a point, falling back to built-in data when the live
/// provider is unreachable or has nothing to offer.
///
/// Holds no mutable state, so one instance can serve concurrent callers.
pub struct GeoDiscoveryService {
    geocoder: Box<dyn Geocoder>,
    poi_source: Box<dyn PoiSource>,
    offline: bool,
}

impl GeoDiscoveryService {
    /// Service backed by Nominatim and Overpass as configured.
    pub fn new(config: &DiscoveryConfig) -> Self {
        let mut service = Self::with_providers(
            NominatimGeocoder::new(config),
            OverpassPoiSource::new(config),
        );
        service.set_offline(config.offline);
        service
    }

    pub fn with_providers(
        geocoder: impl Geocoder + 'static,
        poi_source: impl PoiSource + 'static,
    ) -> Self {
        Self {
            geocoder: Box::new(geocoder),
            poi_source: Box::new(poi_source),
            offline: false,
        }
    }

    /// Set offline mode — skip network calls.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Ranked venues near `reference` (or near the geocoded `place_name`).
    pub fn discover(
        &self,
        reference: Option<GeoPoint>,
        radius_km: f64,
        place_name: Option<&str>,
    ) -> Result<Vec<PointOfInterest>, DiscoveryError> {
        self.discover_with_source(reference, radius_km, place_name)
            .map(|d| d.places)
    }

    /// Like [`discover`](Self::discover), also reporting which source
    /// answered and the reference point actually used.
    pub fn discover_with_source(
        &self,
        reference: Option<GeoPoint>,
        radius_km: f64,
        place_name: Option<&str>,
    ) -> Result<Discovery, DiscoveryError> {
        let radius_km = validate_radius(radius_km)?;
        let reference = reference.map(validate_point).transpose()?;

        let reference = match (reference, place_name.map(str::trim)) {
            (Some(point), _) => Some(point),
            (None, Some(name)) if !name.is_empty() => self.geocode(name),
            (None, _) => None,
        };

        let Some(reference) = reference else {
            debug!("no reference point, serving full seed dataset");
            return Ok(Discovery {
                source: DiscoverySource::Seed,
                reference: None,
                places: seed_places(),
            });
        };

        if let Some(places) = self.live_nearby(reference, radius_km) {
            debug!(count = places.len(), %reference, radius_km, "serving live venues");
            return Ok(Discovery {
                source: DiscoverySource::Live,
                reference: Some(reference),
                places,
            });
        }

        let places = rank_within(seed_places(), reference, radius_km);
        debug!(count = places.len(), %reference, radius_km, "serving seed venues");
        Ok(Discovery {
            source: DiscoverySource::Seed,
            reference: Some(reference),
            places,
        })
    }

    fn geocode(&self, name: &str) -> Option<GeoPoint> {
        if self.offline {
            return None;
        }
        match self.geocoder.geocode(name).map(validate_point) {
            Ok(Ok(point)) => Some(point),
            Ok(Err(e)) => {
                warn!(place = name, error = %e, "geocoder returned an unusable point");
                None
            }
            Err(e) => {
                warn!(place = name, error = %e, "geocoding failed, continuing without a reference");
                None
            }
        }
    }

    /// Live venues within range, nearest first, or `None` when the provider
    /// failed or nothing usable came back.
    fn live_nearby(&self, reference: GeoPoint, radius_km: f64) -> Option<Vec<PointOfInterest>> {
        if self.offline {
            return None;
        }
        let raw = match self.poi_source.nearby(reference, radius_km) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "venue search failed, using seed data");
                return None;
            }
        };

        let places = rank_within(raw.iter().filter_map(venue_to_poi), reference, radius_km);
        if places.is_empty() {
            debug!(raw = raw.len(), "venue search returned nothing within range, using seed data");
            return None;
        }
        Some(places)
    }
}
