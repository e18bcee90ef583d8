use super::models::{Capability, Hub, HubMatch};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Regional hub directory. Radii reflect how far out each station's
/// feeds stay representative.
pub const HUBS: &[Hub] = &[
    Hub {
        id: "istanbul",
        name: "İstanbul",
        latitude: 41.0082,
        longitude: 28.9784,
        capabilities: &[
            Capability::Forecast,
            Capability::Marine,
            Capability::Traffic,
            Capability::AirQuality,
        ],
        radius_km: 150.0,
    },
    Hub {
        id: "ankara",
        name: "Ankara",
        latitude: 39.9334,
        longitude: 32.8597,
        capabilities: &[
            Capability::Forecast,
            Capability::Traffic,
            Capability::AirQuality,
        ],
        radius_km: 180.0,
    },
    Hub {
        id: "izmir",
        name: "İzmir",
        latitude: 38.4237,
        longitude: 27.1428,
        capabilities: &[
            Capability::Forecast,
            Capability::Marine,
            Capability::Traffic,
        ],
        radius_km: 120.0,
    },
    Hub {
        id: "antalya",
        name: "Antalya",
        latitude: 36.8969,
        longitude: 30.7133,
        capabilities: &[Capability::Forecast, Capability::Marine],
        radius_km: 80.0,
    },
    Hub {
        id: "trabzon",
        name: "Trabzon",
        latitude: 41.0027,
        longitude: 39.7168,
        capabilities: &[Capability::Forecast, Capability::Marine],
        radius_km: 140.0,
    },
];

/// Great-circle distance between two coordinates (haversine).
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Find the nearest hub that supports the capability and whose service
/// radius covers the point. Deterministic and side-effect-free; `None`
/// when no hub qualifies.
pub fn resolve(lat: f64, lon: f64, capability: Capability) -> Option<HubMatch> {
    HUBS.iter()
        .filter(|hub| hub.capabilities.contains(&capability))
        .map(|hub| (hub, haversine_km(lat, lon, hub.latitude, hub.longitude)))
        .filter(|(hub, distance)| *distance <= hub.radius_km)
        .min_by(|a, b| a.1.partial_cmp(&b.1).expect("distances are finite"))
        .map(|(hub, distance)| HubMatch {
            id: hub.id.to_string(),
            name: hub.name.to_string(),
            distance_km: (distance * 10.0).round() / 10.0,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(haversine_km(41.0082, 28.9784, 41.0082, 28.9784), 0.0);
    }

    #[test]
    fn test_known_distance_istanbul_ankara() {
        // İstanbul to Ankara is roughly 350 km as the crow flies.
        let d = haversine_km(41.0082, 28.9784, 39.9334, 32.8597);
        assert!((349.0..=355.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_point_at_hub_resolves_with_zero_distance() {
        let hit = resolve(36.8969, 30.7133, Capability::Marine).unwrap();
        assert_eq!(hit.id, "antalya");
        assert_eq!(hit.distance_km, 0.0);
    }

    #[test]
    fn test_coastal_point_resolves_to_antalya_marine() {
        // East of the city but well inside the 80 km service radius.
        let hit = resolve(36.8625, 31.0556, Capability::Marine).unwrap();
        assert_eq!(hit.id, "antalya");
        assert!(hit.distance_km < 80.0);
        assert!((25.0..=45.0).contains(&hit.distance_km), "got {}", hit.distance_km);
    }

    #[test]
    fn test_capability_filter_excludes_nearest_hub() {
        // Antalya is closest but has no traffic feed; no other hub is in
        // range either.
        assert_eq!(resolve(36.8969, 30.7133, Capability::Traffic), None);
    }

    #[test]
    fn test_out_of_radius_resolves_to_none() {
        // Mid-Mediterranean, far from every hub.
        assert_eq!(resolve(34.0, 25.0, Capability::Marine), None);
    }

    #[test]
    fn test_nearest_of_multiple_candidates_wins() {
        // A point between İstanbul and İzmir, inside both radii? İzmir's
        // 120 km radius does not reach İstanbul; pick a point near İzmir.
        let hit = resolve(38.6, 27.0, Capability::Marine).unwrap();
        assert_eq!(hit.id, "izmir");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let a = resolve(36.8625, 31.0556, Capability::Marine);
        let b = resolve(36.8625, 31.0556, Capability::Marine);
        assert_eq!(a, b);
    }
}
