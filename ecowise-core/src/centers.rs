//! Distance ranking and filtering for the recycling-center list.

use crate::model::{CenterKind, RecyclingCenter};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometers.
#[must_use]
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();
    let chord = sin_lat * sin_lat + lat1_rad.cos() * lat2_rad.cos() * sin_lng * sin_lng;
    let arc = 2.0 * chord.sqrt().atan2((1.0 - chord).sqrt());

    EARTH_RADIUS_KM * arc
}

/// Pair every center with its distance from the given position, closest
/// first.
#[must_use]
pub fn nearest_centers(
    lat: f64,
    lng: f64,
    centers: &[RecyclingCenter],
) -> Vec<(RecyclingCenter, f64)> {
    let mut ranked: Vec<(RecyclingCenter, f64)> = centers
        .iter()
        .map(|center| {
            let distance = haversine_km(lat, lng, center.lat, center.lng);
            (center.clone(), distance)
        })
        .collect();

    ranked.sort_by(|left, right| left.1.total_cmp(&right.1));
    ranked
}

/// Filter by kind and by a case-insensitive substring query over name,
/// services, and address. An empty query matches everything.
#[must_use]
pub fn filter_centers<'c>(
    centers: &'c [RecyclingCenter],
    kind: Option<&CenterKind>,
    query: &str,
) -> Vec<&'c RecyclingCenter> {
    let needle = query.trim().to_lowercase();

    centers
        .iter()
        .filter(|center| kind.is_none_or(|wanted| center.kind == *wanted))
        .filter(|center| {
            needle.is_empty()
                || center.name.to_lowercase().contains(&needle)
                || center.address.to_lowercase().contains(&needle)
                || center
                    .services
                    .iter()
                    .any(|service| service.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CenterId;

    fn center(id: u32, name: &str, kind: CenterKind, lat: f64, lng: f64) -> RecyclingCenter {
        RecyclingCenter {
            id: CenterId(id),
            name: name.to_owned(),
            kind,
            address: format!("{name} street"),
            phone: None,
            hours: None,
            services: vec![String::from("Plastic"), String::from("Glass")],
            rating: Some(4.0),
            lat,
            lng,
            website: None,
        }
    }

    #[test]
    fn haversine_is_zero_for_identical_points() {
        let distance = haversine_km(13.0069, 76.0991, 13.0069, 76.0991);
        assert!(distance.abs() < 1e-9, "same point has distance zero");
    }

    #[test]
    fn haversine_matches_a_known_city_distance() {
        // Hassan bus stand to the railway station area, roughly 400 m.
        let distance = haversine_km(13.0069, 76.0991, 13.0072, 76.1028);
        assert!(
            distance > 0.3 && distance < 0.5,
            "expected a few hundred meters, got {distance} km"
        );
    }

    #[test]
    fn nearest_centers_sorts_by_distance() {
        let centers = vec![
            center(1, "Far", CenterKind::Recycling, 13.1, 76.3),
            center(2, "Near", CenterKind::Recycling, 13.0073, 76.1029),
            center(3, "Mid", CenterKind::Recycling, 13.02, 76.15),
        ];

        let ranked = nearest_centers(13.0072, 76.1028, &centers);
        let ids: Vec<u32> = ranked.iter().map(|(entry, _)| entry.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1], "closest first");
    }

    #[test]
    fn filtering_by_kind_and_query_combines() {
        let centers = vec![
            center(1, "Municipal Waste", CenterKind::Recycling, 13.0, 76.1),
            center(2, "Book Donation", CenterKind::Donation, 13.0, 76.1),
            center(3, "Glass Collection", CenterKind::Recycling, 13.0, 76.1),
        ];

        let recycling = filter_centers(&centers, Some(&CenterKind::Recycling), "");
        assert_eq!(recycling.len(), 2, "kind filter alone");

        let glass = filter_centers(&centers, Some(&CenterKind::Recycling), "glass");
        let ids: Vec<u32> = glass.iter().map(|entry| entry.id.0).collect();
        // "glass" matches center 3 by name and center 1 by its services list.
        assert_eq!(ids, vec![1, 3], "query matches name and services");

        let none = filter_centers(&centers, Some(&CenterKind::Donation), "glass");
        assert!(none.is_empty(), "filters are conjunctive");
    }
}
