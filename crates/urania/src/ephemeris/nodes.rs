//! Mean lunar node longitudes.
//!
//! The mean ascending node is a fourth-degree polynomial in Julian centuries
//! since J2000.0 (Meeus eq. 47.7). The descending node is always the
//! ascending node + 180°.

use super::types::normalize_degrees;

/// Mean North Node ecliptic longitude in degrees [0, 360).
///
/// Ω = 125.0445479 − 1934.1362891·T + 0.0020754·T² + T³/467441 − T⁴/60616000
pub fn mean_north_node(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    normalize_degrees(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t2 + t3 / 467_441.0
            - t4 / 60_616_000.0,
    )
}

/// Mean South Node ecliptic longitude in degrees [0, 360)
pub fn mean_south_node(t: f64) -> f64 {
    south_node_from(mean_north_node(t))
}

/// The descending node opposite a given ascending node longitude
pub fn south_node_from(north_node: f64) -> f64 {
    normalize_degrees(north_node + 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_north_node_at_j2000() {
        assert!((mean_north_node(0.0) - 125.0445479).abs() < 1e-12);
    }

    #[test]
    fn mean_north_node_meeus_47a() {
        // 1992 April 12, 0h TD: T = -0.077221081451
        let omega = mean_north_node(-0.077_221_081_451);
        assert!((omega - 274.400656).abs() < 1e-5, "omega = {omega}");
    }

    #[test]
    fn south_node_is_exact_opposite() {
        for i in 0..200 {
            let t = -1.0 + i as f64 * 0.01;
            let north = mean_north_node(t);
            assert_eq!(mean_south_node(t), normalize_degrees(north + 180.0));
        }
    }

    #[test]
    fn nodes_move_backward() {
        let a = mean_north_node(0.0);
        let b = mean_north_node(1.0 / 36_525.0);
        assert!(b < a);
    }
}
