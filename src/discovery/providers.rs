//! Outbound collaborators: Nominatim geocoding and Overpass venue search.

use super::types::{GeoPoint, PointOfInterest, UpstreamError};
use crate::config::DiscoveryConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Resolves a free-text place name to its best-matching coordinate.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, place: &str) -> Result<GeoPoint, UpstreamError>;
}

/// Lists raw venues within `radius_km` of `center`.
pub trait PoiSource: Send + Sync {
    fn nearby(&self, center: GeoPoint, radius_km: f64) -> Result<Vec<RawVenue>, UpstreamError>;
}

fn build_agent(config: &DiscoveryConfig) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(&config.user_agent)
        .build()
}

// ─── Nominatim geocoder ─────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
struct NominatimResult {
    lat: String,
    lon: String,
}

pub struct NominatimGeocoder {
    agent: ureq::Agent,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            agent: build_agent(config),
            endpoint: config.nominatim_url.clone(),
        }
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, place: &str) -> Result<GeoPoint, UpstreamError> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("format", "json")
            .query("q", place)
            .query("limit", "1")
            .call()
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        let results: Vec<NominatimResult> = response
            .into_json()
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        let top = results.into_iter().next().ok_or(UpstreamError::EmptyResult)?;
        parse_nominatim_point(&top)
    }
}

fn parse_nominatim_point(result: &NominatimResult) -> Result<GeoPoint, UpstreamError> {
    let latitude: f64 = result
        .lat
        .trim()
        .parse()
        .map_err(|_| UpstreamError::InvalidResponse(format!("bad latitude '{}'", result.lat)))?;
    let longitude: f64 = result
        .lon
        .trim()
        .parse()
        .map_err(|_| UpstreamError::InvalidResponse(format!("bad longitude '{}'", result.lon)))?;
    Ok(GeoPoint::new(latitude, longitude))
}

// ─── Overpass venue search ──────────────────────────────────────

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RawCenter {
    pub lat: f64,
    pub lon: f64,
}

/// One element of an Overpass `out center` response.
///
/// Nodes carry `lat`/`lon`; ways and relations carry `center`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawVenue {
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<RawCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl RawVenue {
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some(GeoPoint::new(lat, lon)),
            (_, _, Some(c)) => Some(GeoPoint::new(c.lat, c.lon)),
            _ => None,
        }
    }

    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Deserialize, Debug)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<RawVenue>,
}

pub struct OverpassPoiSource {
    agent: ureq::Agent,
    endpoint: String,
}

impl OverpassPoiSource {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            agent: build_agent(config),
            endpoint: config.overpass_url.clone(),
        }
    }
}

impl PoiSource for OverpassPoiSource {
    fn nearby(&self, center: GeoPoint, radius_km: f64) -> Result<Vec<RawVenue>, UpstreamError> {
        let query = overpass_query(center, radius_km);
        let response = self
            .agent
            .post(&self.endpoint)
            .send_form(&[("data", query.as_str())])
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        let body: OverpassResponse = response
            .into_json()
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;
        Ok(body.elements)
    }
}

/// Overpass QL selecting restaurants (nodes, ways, relations) around a point.
pub fn overpass_query(center: GeoPoint, radius_km: f64) -> String {
    let around = format!("(around:{},{},{})", radius_km * 1000.0, center.latitude, center.longitude);
    format!(
        "[out:json][timeout:25];\n(\n  node[\"amenity\"=\"restaurant\"]{around};\n  way[\"amenity\"=\"restaurant\"]{around};\n  relation[\"amenity\"=\"restaurant\"]{around};\n);\nout center meta;\n"
    )
}

// ─── Raw venue mapping ──────────────────────────────────────────

pub const UNKNOWN_NAME: &str = "Unknown Restaurant";
pub const DEFAULT_CATEGORY: &str = "Restaurant";
pub const UNKNOWN_ADDRESS: &str = "Address not available";

const ADDRESS_PARTS: &[&str] = &[
    "addr:housenumber",
    "addr:street",
    "addr:suburb",
    "addr:city",
    "addr:state",
];

/// Best-effort address: structured parts (house number, street, suburb, city,
/// state), then `addr:full`, then a placeholder. A lone street is covered by
/// the structured parts.
pub fn assemble_address(venue: &RawVenue) -> String {
    let parts: Vec<&str> = ADDRESS_PARTS.iter().filter_map(|k| venue.tag(k)).collect();
    if !parts.is_empty() {
        return parts.join(", ");
    }
    if let Some(full) = venue.tag("addr:full") {
        return full.to_string();
    }
    UNKNOWN_ADDRESS.to_string()
}

/// Map a raw venue into a point of interest, or `None` if it has no
/// coordinates. Provider-unknown fields stay unknown; distance is left unset.
pub fn venue_to_poi(venue: &RawVenue) -> Option<PointOfInterest> {
    let location = venue.coordinates()?;
    Some(PointOfInterest {
        id: format!("osm-{}", venue.id),
        name: venue.tag("name").unwrap_or(UNKNOWN_NAME).to_string(),
        location,
        address: assemble_address(venue),
        category: venue.tag("cuisine").unwrap_or(DEFAULT_CATEGORY).to_string(),
        rating: None,
        verified: false,
        contact: venue.tag("phone").map(str::to_string),
        hours: venue.tag("opening_hours").map(str::to_string),
        donations_received: 0,
        tokens_available: 0,
        distance_km: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue_with_tags(tags: &[(&str, &str)]) -> RawVenue {
        RawVenue {
            id: 42,
            lat: Some(18.11),
            lon: Some(83.39),
            center: None,
            tags: tags.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[test]
    fn test_parse_overpass_payload() {
        let json = r#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 101, "lat": 18.11, "lon": 83.39,
                 "tags": {"name": "Dosa Hut", "cuisine": "indian", "phone": "+91 1"}},
                {"type": "way", "id": 202, "center": {"lat": 18.12, "lon": 83.40},
                 "tags": {"amenity": "restaurant"}},
                {"type": "relation", "id": 303}
            ]
        }"#;
        let body: OverpassResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.elements.len(), 3);
        assert_eq!(body.elements[0].coordinates(), Some(GeoPoint::new(18.11, 83.39)));
        assert_eq!(body.elements[1].coordinates(), Some(GeoPoint::new(18.12, 83.40)));
        assert_eq!(body.elements[2].coordinates(), None);
    }

    #[test]
    fn test_parse_overpass_without_elements() {
        let body: OverpassResponse = serde_json::from_str(r#"{"remark": "timeout"}"#).unwrap();
        assert!(body.elements.is_empty());
    }

    #[test]
    fn test_address_structured_parts() {
        let v = venue_with_tags(&[
            ("addr:housenumber", "12"),
            ("addr:street", "MG Road"),
            ("addr:city", "Vizianagaram"),
            ("addr:state", "Andhra Pradesh"),
            ("addr:full", "ignored"),
        ]);
        assert_eq!(assemble_address(&v), "12, MG Road, Vizianagaram, Andhra Pradesh");
    }

    #[test]
    fn test_address_full_fallback() {
        let v = venue_with_tags(&[("addr:full", "Near Fort, Vizianagaram")]);
        assert_eq!(assemble_address(&v), "Near Fort, Vizianagaram");
    }

    #[test]
    fn test_address_street_only() {
        let v = venue_with_tags(&[("addr:street", "Station Road"), ("addr:full", "ignored")]);
        assert_eq!(assemble_address(&v), "Station Road");
    }

    #[test]
    fn test_address_unknown() {
        let v = venue_with_tags(&[("name", "Nameless"), ("addr:city", " ")]);
        assert_eq!(assemble_address(&v), UNKNOWN_ADDRESS);
    }

    #[test]
    fn test_venue_to_poi_defaults() {
        let v = venue_with_tags(&[]);
        let poi = venue_to_poi(&v).unwrap();
        assert_eq!(poi.id, "osm-42");
        assert_eq!(poi.name, UNKNOWN_NAME);
        assert_eq!(poi.category, DEFAULT_CATEGORY);
        assert_eq!(poi.address, UNKNOWN_ADDRESS);
        assert_eq!(poi.rating, None);
        assert!(!poi.verified);
        assert_eq!(poi.donations_received, 0);
        assert_eq!(poi.tokens_available, 0);
        assert_eq!(poi.distance_km, None);
    }

    #[test]
    fn test_venue_to_poi_tags() {
        let v = venue_with_tags(&[
            ("name", "Bawarchi"),
            ("cuisine", "biryani"),
            ("phone", "+91 8942 000000"),
            ("opening_hours", "Mo-Su 11:00-23:00"),
        ]);
        let poi = venue_to_poi(&v).unwrap();
        assert_eq!(poi.name, "Bawarchi");
        assert_eq!(poi.category, "biryani");
        assert_eq!(poi.contact.as_deref(), Some("+91 8942 000000"));
        assert_eq!(poi.hours.as_deref(), Some("Mo-Su 11:00-23:00"));
    }

    #[test]
    fn test_venue_without_coordinates_is_skipped() {
        let v = RawVenue { id: 7, ..Default::default() };
        assert!(venue_to_poi(&v).is_none());
    }

    #[test]
    fn test_overpass_query_radius_in_meters() {
        let q = overpass_query(GeoPoint::new(18.1124, 83.3956), 2.5);
        assert!(q.starts_with("[out:json][timeout:25];"));
        assert!(q.contains("node[\"amenity\"=\"restaurant\"](around:2500,18.1124,83.3956);"));
        assert!(q.contains("relation[\"amenity\"=\"restaurant\"](around:2500,18.1124,83.3956);"));
        assert!(q.trim_end().ends_with("out center meta;"));
    }

    #[test]
    fn test_parse_nominatim_point() {
        let json = r#"[{"lat": "18.1066", "lon": "83.3956", "display_name": "Vizianagaram, India"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();
        let p = parse_nominatim_point(&results[0]).unwrap();
        assert_eq!(p, GeoPoint::new(18.1066, 83.3956));

        let bad = NominatimResult { lat: "north".into(), lon: "1".into() };
        assert!(matches!(parse_nominatim_point(&bad), Err(UpstreamError::InvalidResponse(_))));
    }
}
