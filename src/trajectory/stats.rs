use serde::Serialize;
use utoipa::ToSchema;

use crate::geodesy::distance_km;
use crate::trajectory::PathPoint;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FlightStats {
    pub total_distance_km: f64,
    pub avg_speed_kmh: f64,
    pub min_altitude_km: f64,
    pub avg_altitude_km: f64,
    pub max_altitude_km: f64,
}

impl FlightStats {
    pub fn from_path(path_data: &[PathPoint]) -> Option<Self> {
        if path_data.is_empty() {
            return None;
        }

        let total_distance_km: f64 = path_data
            .windows(2)
            .map(|pair| {
                let [lat1, lon1] = pair[0].position;
                let [lat2, lon2] = pair[1].position;
                distance_km(lat1, lon1, lat2, lon2)
            })
            .sum();

        let samples = path_data.len() as f64;
        let altitudes = path_data.iter().map(|p| p.altitude_km);
        let min_altitude_km = altitudes.clone().fold(f64::INFINITY, f64::min);
        let max_altitude_km = altitudes.clone().fold(f64::NEG_INFINITY, f64::max);
        let avg_altitude_km = altitudes.sum::<f64>() / samples;

        // One sample per hour; divides by samples rather than segments.
        let avg_speed_kmh = total_distance_km / samples;

        Some(FlightStats {
            total_distance_km,
            avg_speed_kmh,
            min_altitude_km,
            avg_altitude_km,
            max_altitude_km,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64, alt: f64, hours_ago: usize) -> PathPoint {
        PathPoint {
            position: [lat, lon],
            altitude_km: alt,
            hours_ago,
        }
    }

    #[test]
    fn test_empty_path_has_no_stats() {
        assert_eq!(FlightStats::from_path(&[]), None);
    }

    #[test]
    fn test_stationary_path() {
        let path = [
            point(40.0, -100.0, 5.0, 0),
            point(40.0, -100.0, 15.0, 1),
            point(40.0, -100.0, 25.0, 2),
        ];
        let stats = FlightStats::from_path(&path).unwrap();
        assert_eq!(stats.min_altitude_km, 5.0);
        assert_eq!(stats.max_altitude_km, 25.0);
        assert!((stats.avg_altitude_km - 15.0).abs() < 1e-9);
        assert_eq!(stats.total_distance_km, 0.0);
        assert_eq!(stats.avg_speed_kmh, 0.0);
    }

    #[test]
    fn test_speed_divides_by_sample_count() {
        let path = [
            point(0.0, 0.0, 10.0, 0),
            point(0.0, 1.0, 10.0, 1),
            point(0.0, 2.0, 10.0, 2),
            point(0.0, 3.0, 10.0, 3),
        ];
        let stats = FlightStats::from_path(&path).unwrap();
        let expected = 3.0 * distance_km(0.0, 0.0, 0.0, 1.0);
        assert!((stats.total_distance_km - expected).abs() < 1e-6);
        assert!((stats.avg_speed_kmh - expected / 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_independent_of_direction() {
        let forward = [
            point(10.0, 10.0, 1.0, 0),
            point(12.0, 13.0, 1.0, 1),
            point(15.0, 11.0, 1.0, 2),
        ];
        let mut backward = forward.clone();
        backward.reverse();
        let a = FlightStats::from_path(&forward).unwrap();
        let b = FlightStats::from_path(&backward).unwrap();
        assert!((a.total_distance_km - b.total_distance_km).abs() < 1e-9);
    }
}
