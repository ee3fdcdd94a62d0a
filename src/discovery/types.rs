//! Core types for the discovery subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A discoverable venue.
///
/// Built fresh for every discovery call; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    /// Seed id (`viz-N`) or a provider id namespaced as `osm-<id>`.
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub address: String,
    /// Cuisine or venue type tag.
    pub category: String,
    /// `None` when the provider carries no rating.
    pub rating: Option<f64>,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    pub donations_received: u32,
    pub tokens_available: u32,
    /// Great-circle distance from the reference point; unset without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Where a discovery result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoverySource {
    Live,
    Seed,
}

impl fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "OpenStreetMap"),
            Self::Seed => write!(f, "Built-in"),
        }
    }
}

/// A discovery result with its provenance.
#[derive(Debug, Clone, Serialize)]
pub struct Discovery {
    pub source: DiscoverySource,
    /// The reference point used for ranking, after geocoding.
    pub reference: Option<GeoPoint>,
    pub places: Vec<PointOfInterest>,
}

/// Errors surfaced to callers of the discovery service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiscoveryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failures of an outbound collaborator.
///
/// The service absorbs every one of these and falls back to seed data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpstreamError {
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
    #[error("Upstream returned no results")]
    EmptyResult,
}
