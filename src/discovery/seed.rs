//! Built-in seed dataset: hand-curated venues around Vizianagaram.
//!
//! Read-only. Served whenever no reference point is known or the live
//! provider cannot answer.

use super::types::{GeoPoint, PointOfInterest};

struct SeedVenue {
    id: &'static str,
    name: &'static str,
    lat: f64,
    lon: f64,
    address: &'static str,
    cuisine: &'static str,
    rating: f64,
    verified: bool,
    phone: &'static str,
    hours: &'static str,
    donations_received: u32,
    tokens_available: u32,
}

const SEED_VENUES: &[SeedVenue] = &[
    SeedVenue {
        id: "viz-1",
        name: "Annapurna Restaurant",
        lat: 18.1124,
        lon: 83.3956,
        address: "Main Road, Vizianagaram",
        cuisine: "South Indian",
        rating: 4.2,
        verified: true,
        phone: "+91 8942 123456",
        hours: "6:00 AM - 10:00 PM",
        donations_received: 156,
        tokens_available: 45,
    },
    SeedVenue {
        id: "viz-2",
        name: "Sai Krishna Tiffins",
        lat: 18.1089,
        lon: 83.3912,
        address: "Station Road, Vizianagaram",
        cuisine: "South Indian",
        rating: 4.0,
        verified: true,
        phone: "+91 8942 234567",
        hours: "5:30 AM - 11:00 AM",
        donations_received: 89,
        tokens_available: 23,
    },
    SeedVenue {
        id: "viz-3",
        name: "Hotel Rajdhani",
        lat: 18.1156,
        lon: 83.3978,
        address: "Clock Tower, Vizianagaram",
        cuisine: "North Indian",
        rating: 3.8,
        verified: false,
        phone: "+91 8942 345678",
        hours: "11:00 AM - 11:00 PM",
        donations_received: 67,
        tokens_available: 18,
    },
    SeedVenue {
        id: "viz-4",
        name: "Bawarchi Biryani",
        lat: 18.1067,
        lon: 83.3889,
        address: "Cantonment, Vizianagaram",
        cuisine: "Biryani",
        rating: 4.5,
        verified: true,
        phone: "+91 8942 456789",
        hours: "12:00 PM - 10:00 PM",
        donations_received: 234,
        tokens_available: 67,
    },
    SeedVenue {
        id: "viz-5",
        name: "Cafe Coffee Day",
        lat: 18.1134,
        lon: 83.3967,
        address: "RTC Complex, Vizianagaram",
        cuisine: "Cafe",
        rating: 3.9,
        verified: true,
        phone: "+91 8942 567890",
        hours: "8:00 AM - 11:00 PM",
        donations_received: 45,
        tokens_available: 12,
    },
    SeedVenue {
        id: "viz-6",
        name: "Dosa Point",
        lat: 18.1098,
        lon: 83.3934,
        address: "Bus Stand Road, Vizianagaram",
        cuisine: "South Indian",
        rating: 4.1,
        verified: false,
        phone: "+91 8942 678901",
        hours: "6:00 AM - 9:00 PM",
        donations_received: 78,
        tokens_available: 29,
    },
];

fn seed_to_poi(venue: &SeedVenue) -> PointOfInterest {
    PointOfInterest {
        id: venue.id.to_string(),
        name: venue.name.to_string(),
        location: GeoPoint::new(venue.lat, venue.lon),
        address: venue.address.to_string(),
        category: venue.cuisine.to_string(),
        rating: Some(venue.rating),
        verified: venue.verified,
        contact: Some(venue.phone.to_string()),
        hours: Some(venue.hours.to_string()),
        donations_received: venue.donations_received,
        tokens_available: venue.tokens_available,
        distance_km: None,
    }
}

/// The full seed dataset in table order, without distances.
pub fn seed_places() -> Vec<PointOfInterest> {
    SEED_VENUES.iter().map(seed_to_poi).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_table_order() {
        let ids: Vec<String> = seed_places().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["viz-1", "viz-2", "viz-3", "viz-4", "viz-5", "viz-6"]);
    }

    #[test]
    fn test_seed_ids_unique() {
        let places = seed_places();
        let ids: HashSet<&str> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), places.len());
    }

    #[test]
    fn test_seed_has_no_distance() {
        assert!(seed_places().iter().all(|p| p.distance_km.is_none()));
    }

    #[test]
    fn test_seed_values_in_range() {
        for p in seed_places() {
            let rating = p.rating.unwrap();
            assert!((3.0..=5.0).contains(&rating), "{} rating {}", p.id, rating);
            assert!((-90.0..=90.0).contains(&p.location.latitude));
            assert!((-180.0..=180.0).contains(&p.location.longitude));
        }
    }

    #[test]
    fn test_annapurna_is_city_center() {
        let first = &seed_places()[0];
        assert_eq!(first.name, "Annapurna Restaurant");
        assert_eq!(first.location, GeoPoint::new(18.1124, 83.3956));
        assert_eq!(first.contact.as_deref(), Some("+91 8942 123456"));
    }
}
