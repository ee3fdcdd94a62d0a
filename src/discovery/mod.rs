//! Restaurant discovery subsystem for DishDirect.
//!
//! Resolves a reference point (directly or by geocoding a place name),
//! queries OpenStreetMap for nearby restaurants and falls back to a
//! built-in seed dataset whenever the live lookup cannot answer.

pub mod geo;
pub mod providers;
pub mod refine;
pub mod seed;
pub mod service;
pub mod types;

pub use geo::haversine_km;
pub use providers::{Geocoder, PoiSource, RawVenue};
pub use refine::{cuisines, refine, ListingQuery, SortKey};
pub use seed::seed_places;
pub use service::{GeoDiscoveryService, DEFAULT_RADIUS_KM};
pub use types::{Discovery, DiscoveryError, DiscoverySource, GeoPoint, PointOfInterest, UpstreamError};
