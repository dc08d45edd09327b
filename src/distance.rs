//! Great-circle distance via the spherical law of cosines.
//!
//! The arc length is converted through statute miles
//! (`arc-minutes × 1.1515 × 1609.344`), so the implied Earth radius is
//! ~6370.7 km rather than a WGS84 figure. Results are stable across
//! releases; do not swap in haversine or Vincenty here.

use std::f64::consts::PI;

const MILES_PER_ARC_MINUTE: f64 = 1.1515;
const METERS_PER_MILE: f64 = 1609.344;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad / PI * 180.0
}

/// Central angle between two points, in degrees.
fn arc_degrees(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // sin² + cos² can land a hair under 1, which would leave a few
    // centimeters of noise for a point and itself.
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    let theta = lon1 - lon2;
    let cos_term = deg_to_rad(lat1).sin() * deg_to_rad(lat2).sin()
        + deg_to_rad(lat1).cos() * deg_to_rad(lat2).cos() * deg_to_rad(theta).cos();
    // Rounding can push the term just past ±1, where acos is NaN.
    rad_to_deg(cos_term.clamp(-1.0, 1.0).acos())
}

/// Distance in meters between `(lat1, lon1)` and `(lat2, lon2)`, all in degrees.
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    arc_degrees(lat1, lon1, lat2, lon2) * 60.0 * MILES_PER_ARC_MINUTE * METERS_PER_MILE
}

/// Distance in kilometers. Same formula as [`distance_m`].
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance_m(lat1, lon1, lat2, lon2) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    #[test]
    fn test_identical_points_zero() {
        assert_eq!(distance_km(1.304833, 103.831833, 1.304833, 103.831833), 0.0);
        assert_eq!(distance_m(59.3293, 18.0686, 59.3293, 18.0686), 0.0);
        assert_eq!(distance_km(90.0, 0.0, 90.0, 0.0), 0.0);
    }

    #[test]
    fn test_singapore_campuses() {
        // NTU and NUS
        let d = distance_km(1.304833, 103.831833, 1.346479, 103.683478);
        assert!(d > 0.0 && d < 20.0, "got {d}");
        assert_abs_diff_eq!(d, 17.1289, epsilon = 1e-3);
    }

    #[test]
    fn test_stockholm_oslo() {
        assert_abs_diff_eq!(distance_km(59.3293, 18.0686, 59.9139, 10.7522), 416.278, epsilon = 1e-2);
    }

    #[test]
    fn test_antipodal_half_circumference() {
        let expected = 180.0 * 60.0 * MILES_PER_ARC_MINUTE * METERS_PER_MILE / 1000.0;
        assert_relative_eq!(distance_km(0.0, 0.0, 0.0, 180.0), expected, max_relative = 1e-12);
        assert_relative_eq!(distance_km(90.0, 0.0, -90.0, 0.0), expected, max_relative = 1e-12);
        assert_abs_diff_eq!(expected, 20014.12385, epsilon = 1e-3);
    }

    #[test]
    fn test_clamped_near_antipode_is_finite() {
        let d = distance_km(45.0, 45.0, -45.0, -135.0);
        assert!(d.is_finite());
        let d = distance_km(0.1, 0.1, 0.1, 0.1 + 1e-13);
        assert!(d.is_finite() && d >= 0.0);
    }

    #[test]
    fn test_deg_rad_helpers() {
        assert_relative_eq!(deg_to_rad(180.0), PI);
        assert_relative_eq!(rad_to_deg(PI / 2.0), 90.0);
    }

    fn lat() -> impl Strategy<Value = f64> {
        -90.0..=90.0f64
    }

    fn lon() -> impl Strategy<Value = f64> {
        -180.0..=180.0f64
    }

    proptest! {
        #[test]
        fn same_point_is_zero(a in lat(), b in lon()) {
            prop_assert_eq!(distance_km(a, b, a, b), 0.0);
        }

        #[test]
        fn meters_is_thousand_km(a in lat(), b in lon(), c in lat(), d in lon()) {
            let m = distance_m(a, b, c, d);
            let km = distance_km(a, b, c, d);
            prop_assert!((m - 1000.0 * km).abs() <= 1e-6 * m.max(1.0));
        }

        #[test]
        fn symmetric(a in lat(), b in lon(), c in lat(), d in lon()) {
            let ab = distance_km(a, b, c, d);
            let ba = distance_km(c, d, a, b);
            prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
        }

        #[test]
        fn bounded_and_real(a in lat(), b in lon(), c in lat(), d in lon()) {
            let km = distance_km(a, b, c, d);
            prop_assert!(km.is_finite());
            prop_assert!((0.0..=20014.2).contains(&km));
        }
    }
}
