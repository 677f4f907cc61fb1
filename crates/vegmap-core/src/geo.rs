//! Great-circle geometry helpers.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Haversine great-circle distance between two points in kilometers.
///
/// Symmetric and non-negative; returns `0.0` for identical inputs. The
/// square root of the haversine term is clamped to `[-1, 1]` before the
/// inverse sine, since floating-point rounding can push it past 1 for
/// identical or antipodal points and `asin` would return NaN.
#[must_use]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().clamp(-1.0, 1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        let atlanta = GeoPoint::new(33.7490, -84.3880);
        assert_eq!(distance_km(atlanta, atlanta), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(33.7490, -84.3880);
        let b = GeoPoint::new(33.7756, -84.3963);
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }

    #[test]
    fn sf_to_oakland_is_about_13km() {
        let sf = GeoPoint::new(37.7749, -122.4194);
        let oakland = GeoPoint::new(37.8044, -122.2712);
        let dist = distance_km(sf, oakland);
        assert!(
            (dist - 13.0).abs() < 2.0,
            "SF to Oakland should be ~13km, got {dist}"
        );
    }

    #[test]
    fn sf_to_la_is_about_559km() {
        let sf = GeoPoint::new(37.7749, -122.4194);
        let la = GeoPoint::new(34.0522, -118.2437);
        let dist = distance_km(sf, la);
        assert!(
            (dist - 559.0).abs() < 10.0,
            "SF to LA should be ~559km, got {dist}"
        );
    }

    #[test]
    fn hundred_meters_resolves_below_dedup_scale() {
        // Two points ~0.05km apart along a meridian (1 deg lat ≈ 111.2km).
        let a = GeoPoint::new(33.7490, -84.3880);
        let b = GeoPoint::new(33.74945, -84.3880);
        let dist = distance_km(a, b);
        assert!(
            dist > 0.04 && dist < 0.06,
            "expected ~0.05km, got {dist}"
        );
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let dist = distance_km(a, b);
        assert!(dist.is_finite(), "antipodal distance should be finite");
        assert!(
            (dist - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1.0,
            "antipodal distance should be half the circumference, got {dist}"
        );
    }
}
