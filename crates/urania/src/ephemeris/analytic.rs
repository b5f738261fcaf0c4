//! Built-in analytic ephemeris.
//!
//! Planets: JPL "Approximate Positions of the Planets" Keplerian elements
//! (Standish, table 1, valid 1800–2050 AD) propagated with their per-century
//! rates. Geocentric vectors are planet − Earth/Moon barycenter in the J2000
//! ecliptic; general precession refers them to the equinox of date.
//!
//! Moon: principal periodic terms of Meeus, "Astronomical Algorithms"
//! (2nd ed), chapter 47, which already give the longitude of date.
//!
//! Accuracy is in the arcminute range for the planets over the table's
//! validity span, which is well inside every orb in the aspect policy.

use super::adapter::{EphemerisBackend, EphemerisError};
use super::time::julian_centuries;
use super::types::{normalize_degrees, Body};

/// General precession in longitude, degrees per Julian century
const PRECESSION_PER_CENTURY: f64 = 1.396_971;

/// Orbital elements at J2000 and their rates per Julian century.
#[derive(Debug, Clone, Copy)]
struct KeplerElements {
    /// Semi-major axis (AU)
    a: [f64; 2],
    /// Eccentricity
    e: [f64; 2],
    /// Inclination (deg)
    i: [f64; 2],
    /// Mean longitude (deg)
    l: [f64; 2],
    /// Longitude of perihelion (deg)
    peri: [f64; 2],
    /// Longitude of the ascending node (deg)
    node: [f64; 2],
}

#[rustfmt::skip]
const MERCURY: KeplerElements = KeplerElements {
    a: [0.387_099_27, 0.000_000_37], e: [0.205_635_93, 0.000_019_06], i: [7.004_979_02, -0.005_947_49],
    l: [252.250_323_50, 149_472.674_111_75], peri: [77.457_796_28, 0.160_476_89], node: [48.330_765_93, -0.125_340_81],
};
#[rustfmt::skip]
const VENUS: KeplerElements = KeplerElements {
    a: [0.723_335_66, 0.000_003_90], e: [0.006_776_72, -0.000_041_07], i: [3.394_676_05, -0.000_788_90],
    l: [181.979_099_50, 58_517.815_387_29], peri: [131.602_467_18, 0.002_683_29], node: [76.679_842_55, -0.277_694_18],
};
#[rustfmt::skip]
const EARTH_MOON_BARYCENTER: KeplerElements = KeplerElements {
    a: [1.000_002_61, 0.000_005_62], e: [0.016_711_23, -0.000_043_92], i: [-0.000_015_31, -0.012_946_68],
    l: [100.464_571_66, 35_999.372_449_81], peri: [102.937_681_93, 0.323_273_64], node: [0.0, 0.0],
};
#[rustfmt::skip]
const MARS: KeplerElements = KeplerElements {
    a: [1.523_710_34, 0.000_018_47], e: [0.093_394_10, 0.000_078_82], i: [1.849_691_42, -0.008_131_31],
    l: [-4.553_432_05, 19_140.302_684_99], peri: [-23.943_629_59, 0.444_410_88], node: [49.559_538_91, -0.292_573_43],
};
#[rustfmt::skip]
const JUPITER: KeplerElements = KeplerElements {
    a: [5.202_887_00, -0.000_116_07], e: [0.048_386_24, -0.000_132_53], i: [1.304_396_95, -0.001_837_14],
    l: [34.396_440_51, 3_034.746_127_75], peri: [14.728_479_83, 0.212_526_68], node: [100.473_909_09, 0.204_691_06],
};
#[rustfmt::skip]
const SATURN: KeplerElements = KeplerElements {
    a: [9.536_675_94, -0.001_250_60], e: [0.053_861_79, -0.000_509_91], i: [2.485_991_87, 0.001_936_09],
    l: [49.954_244_23, 1_222.493_622_01], peri: [92.598_878_31, -0.418_972_16], node: [113.662_424_48, -0.288_677_94],
};
#[rustfmt::skip]
const URANUS: KeplerElements = KeplerElements {
    a: [19.189_164_64, -0.001_961_76], e: [0.047_257_44, -0.000_043_97], i: [0.772_637_83, -0.002_429_39],
    l: [313.238_104_51, 428.482_027_85], peri: [170.954_276_30, 0.408_052_81], node: [74.016_925_03, 0.042_405_89],
};
#[rustfmt::skip]
const NEPTUNE: KeplerElements = KeplerElements {
    a: [30.069_922_76, 0.000_262_91], e: [0.008_590_48, 0.000_051_05], i: [1.770_043_47, 0.000_353_72],
    l: [-55.120_029_69, 218.459_453_25], peri: [44.964_762_27, -0.322_414_64], node: [131.784_225_74, -0.005_086_64],
};
#[rustfmt::skip]
const PLUTO: KeplerElements = KeplerElements {
    a: [39.482_116_75, -0.000_315_96], e: [0.248_827_30, 0.000_051_70], i: [17.140_012_06, 0.000_048_18],
    l: [238.929_038_33, 145.207_805_15], peri: [224.068_916_29, -0.040_629_42], node: [110.303_936_84, -0.011_834_82],
};

impl KeplerElements {
    /// Heliocentric position in the J2000 ecliptic frame (AU)
    fn heliocentric(&self, t: f64) -> [f64; 3] {
        let at = |p: [f64; 2]| p[0] + p[1] * t;
        let a = at(self.a);
        let e = at(self.e);
        let incl = at(self.i).to_radians();
        let mean_lon = at(self.l);
        let peri = at(self.peri);
        let node = at(self.node);

        let arg_peri = (peri - node).to_radians();
        let node = node.to_radians();
        let mean_anomaly = signed_degrees(mean_lon - peri).to_radians();
        let ecc_anomaly = solve_kepler(mean_anomaly, e);

        let xp = a * (ecc_anomaly.cos() - e);
        let yp = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

        let (sw, cw) = arg_peri.sin_cos();
        let (so, co) = node.sin_cos();
        let (si, ci) = incl.sin_cos();

        [
            (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
            (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
            (sw * si) * xp + (cw * si) * yp,
        ]
    }
}

/// Angle mapped into [-180, 180)
fn signed_degrees(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Solve Kepler's equation `M = E − e·sin E` by Newton iteration (radians)
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..30 {
        let delta = (mean_anomaly - (ecc - e * ecc.sin())) / (1.0 - e * ecc.cos());
        ecc += delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ecc
}

/// Periodic terms for the Moon's longitude: multiples of D, M, M', F and
/// the coefficient in 1e-6 degrees.
#[rustfmt::skip]
const MOON_LONGITUDE_TERMS: &[(i8, i8, i8, i8, f64)] = &[
    (0, 0, 1, 0, 6_288_774.0), (2, 0, -1, 0, 1_274_027.0), (2, 0, 0, 0, 658_314.0),
    (0, 0, 2, 0, 213_618.0), (0, 1, 0, 0, -185_116.0), (0, 0, 0, 2, -114_332.0),
    (2, 0, -2, 0, 58_793.0), (2, -1, -1, 0, 57_066.0), (2, 0, 1, 0, 53_322.0),
    (2, -1, 0, 0, 45_758.0), (0, 1, -1, 0, -40_923.0), (1, 0, 0, 0, -34_720.0),
    (0, 1, 1, 0, -30_383.0), (2, 0, 0, -2, 15_327.0), (0, 0, 1, 2, -12_528.0),
    (0, 0, 1, -2, 10_980.0), (4, 0, -1, 0, 10_675.0), (0, 0, 3, 0, 10_034.0),
    (4, 0, -2, 0, 8_548.0), (2, 1, -1, 0, -7_888.0), (2, 1, 0, 0, -6_766.0),
    (1, 0, -1, 0, -5_163.0), (1, 1, 0, 0, 4_987.0), (2, -1, 1, 0, 4_036.0),
    (2, 0, 2, 0, 3_994.0), (4, 0, 0, 0, 3_861.0), (2, 0, -3, 0, 3_665.0),
    (0, 1, -2, 0, -2_689.0), (2, 0, -1, 2, -2_602.0), (2, -1, -2, 0, 2_390.0),
    (1, 0, 1, 0, -2_348.0), (2, -2, 0, 0, 2_236.0), (0, 1, 2, 0, -2_120.0),
    (0, 2, 0, 0, -2_069.0), (2, -2, -1, 0, 2_048.0), (2, 0, 1, -2, -1_773.0),
    (2, 0, 0, 2, -1_595.0), (4, -1, -1, 0, 1_215.0), (0, 0, 2, 2, -1_110.0),
    (3, 0, -1, 0, -892.0), (2, 1, 1, 0, -810.0), (4, -1, -2, 0, 759.0),
    (0, 2, -1, 0, -713.0), (2, 2, -1, 0, -700.0), (2, 1, -2, 0, 691.0),
    (2, -1, 0, -2, 596.0), (4, 0, 1, 0, 549.0), (0, 0, 4, 0, 537.0),
    (4, -1, 0, 0, 520.0), (1, 0, -2, 0, -487.0), (2, 1, 0, -2, -399.0),
    (0, 0, 2, -2, -381.0), (1, 1, 1, 0, 351.0), (3, 0, -2, 0, -340.0),
    (4, 0, -3, 0, 330.0), (2, -1, 2, 0, 327.0), (0, 2, 1, 0, -323.0),
    (1, 1, -1, 0, 299.0), (2, 0, 3, 0, 294.0),
];

/// Geocentric ecliptic longitude of the Moon, degrees of date
pub fn moon_longitude(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean_lon = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let elongation = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let sun_anomaly = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let moon_anomaly = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let latitude_arg = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let ecc = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let mut sum = 0.0;
    for &(d, m, mp, f, coeff) in MOON_LONGITUDE_TERMS {
        let arg = d as f64 * elongation
            + m as f64 * sun_anomaly
            + mp as f64 * moon_anomaly
            + f as f64 * latitude_arg;
        sum += coeff * ecc.powi(m.unsigned_abs() as i32) * arg.to_radians().sin();
    }
    sum += 3_958.0 * a1.to_radians().sin()
        + 1_962.0 * (mean_lon - latitude_arg).to_radians().sin()
        + 318.0 * a2.to_radians().sin();

    normalize_degrees(mean_lon + sum / 1_000_000.0)
}

/// Ephemeris backend computed entirely from closed-form series
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    fn elements(body: Body) -> Option<&'static KeplerElements> {
        match body {
            Body::Mercury => Some(&MERCURY),
            Body::Venus => Some(&VENUS),
            Body::Mars => Some(&MARS),
            Body::Jupiter => Some(&JUPITER),
            Body::Saturn => Some(&SATURN),
            Body::Uranus => Some(&URANUS),
            Body::Neptune => Some(&NEPTUNE),
            Body::Pluto => Some(&PLUTO),
            _ => None,
        }
    }

    /// Geocentric longitude of a Keplerian body (or the Sun), degrees of date
    fn vector_longitude(body: Body, t: f64) -> Option<f64> {
        let earth = EARTH_MOON_BARYCENTER.heliocentric(t);
        let (x, y) = if body == Body::Sun {
            (-earth[0], -earth[1])
        } else {
            let planet = Self::elements(body)?.heliocentric(t);
            (planet[0] - earth[0], planet[1] - earth[1])
        };
        Some(normalize_degrees(
            y.atan2(x).to_degrees() + PRECESSION_PER_CENTURY * t,
        ))
    }
}

impl EphemerisBackend for AnalyticEphemeris {
    fn name(&self) -> &str {
        "analytic"
    }

    fn ecliptic_longitude(&self, body: Body, jd: f64) -> Result<f64, EphemerisError> {
        let t = julian_centuries(jd);
        let longitude = match body {
            Body::Moon => Some(moon_longitude(t)),
            Body::NorthNode | Body::SouthNode => None,
            _ => Self::vector_longitude(body, t),
        };
        longitude.ok_or(EphemerisError::UnsupportedBody {
            body,
            backend: self.name().to_string(),
        })
    }
}
