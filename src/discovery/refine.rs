//! Listing refinement applied on top of a discovery result: name search,
//! cuisine filter and alternative orderings.

use super::types::PointOfInterest;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Distance,
    Rating,
    Donations,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance => write!(f, "distance"),
            Self::Rating => write!(f, "rating"),
            Self::Donations => write!(f, "donations"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "rating" => Ok(Self::Rating),
            "donations" => Ok(Self::Donations),
            other => Err(format!(
                "Unknown sort '{}'. Use 'distance', 'rating' or 'donations'.",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// Case-insensitive substring of the venue name.
    pub search: Option<String>,
    /// Exact category; `"all"` matches everything.
    pub cuisine: Option<String>,
    pub sort: SortKey,
}

impl ListingQuery {
    fn matches(&self, place: &PointOfInterest) -> bool {
        let name_ok = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => place.name.to_lowercase().contains(&term.to_lowercase()),
            _ => true,
        };
        let cuisine_ok = match self.cuisine.as_deref() {
            None | Some("all") => true,
            Some(cuisine) => place.category == cuisine,
        };
        name_ok && cuisine_ok
    }
}

/// Filter and reorder `places`. The sort is stable, so ties keep their
/// discovery order.
pub fn refine(places: Vec<PointOfInterest>, query: &ListingQuery) -> Vec<PointOfInterest> {
    let mut kept: Vec<PointOfInterest> = places.into_iter().filter(|p| query.matches(p)).collect();

    match query.sort {
        SortKey::Distance => kept.sort_by(|a, b| {
            let (da, db) = (a.distance_km.unwrap_or(0.0), b.distance_km.unwrap_or(0.0));
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        }),
        // Unknown ratings sink to the bottom.
        SortKey::Rating => kept.sort_by(|a, b| match (a.rating, b.rating) {
            (Some(ra), Some(rb)) => rb.partial_cmp(&ra).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::Donations => kept.sort_by(|a, b| b.donations_received.cmp(&a.donations_received)),
    }
    kept
}

/// Distinct categories in first-seen order.
pub fn cuisines(places: &[PointOfInterest]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for place in places {
        if !seen.contains(&place.category) {
            seen.push(place.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::seed::seed_places;

    fn names(places: &[PointOfInterest]) -> Vec<&str> {
        places.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_query_keeps_everything() {
        let places = seed_places();
        let refined = refine(places.clone(), &ListingQuery::default());
        // No distances: every key ties at zero and the stable sort keeps order.
        assert_eq!(refined, places);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let q = ListingQuery { search: Some("DOSA".into()), ..Default::default() };
        assert_eq!(names(&refine(seed_places(), &q)), vec!["Dosa Point"]);
    }

    #[test]
    fn test_cuisine_filter() {
        let q = ListingQuery { cuisine: Some("South Indian".into()), ..Default::default() };
        let refined = refine(seed_places(), &q);
        assert_eq!(names(&refined), vec!["Annapurna Restaurant", "Sai Krishna Tiffins", "Dosa Point"]);

        let all = ListingQuery { cuisine: Some("all".into()), ..Default::default() };
        assert_eq!(refine(seed_places(), &all).len(), 6);
    }

    #[test]
    fn test_sort_by_rating_unknown_last() {
        let mut places = seed_places();
        places[2].rating = None; // Hotel Rajdhani
        let q = ListingQuery { sort: SortKey::Rating, ..Default::default() };
        let refined = refine(places, &q);
        assert_eq!(refined[0].name, "Bawarchi Biryani");
        assert_eq!(refined.last().unwrap().name, "Hotel Rajdhani");
    }

    #[test]
    fn test_sort_by_donations() {
        let q = ListingQuery { sort: SortKey::Donations, ..Default::default() };
        let refined = refine(seed_places(), &q);
        let counts: Vec<u32> = refined.iter().map(|p| p.donations_received).collect();
        assert_eq!(counts, vec![234, 156, 89, 78, 67, 45]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("Rating".parse::<SortKey>(), Ok(SortKey::Rating));
        assert_eq!("donations".parse::<SortKey>(), Ok(SortKey::Donations));
        assert!("price".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_cuisines_first_seen_order() {
        assert_eq!(
            cuisines(&seed_places()),
            vec!["South Indian", "North Indian", "Biryani", "Cafe"]
        );
    }
}
