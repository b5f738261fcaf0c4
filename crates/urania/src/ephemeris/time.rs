//! Julian dates, sidereal time and obliquity.
//!
//! Instants are taken as UTC and used directly as the dynamical time
//! argument; ΔT (about a minute in this era) is not applied.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), chapters 7, 12, 22.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT)
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC)
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date for a UTC instant
pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// UTC instant for a Julian Date, rounded to the millisecond
pub fn julian_day_to_datetime(jd: f64) -> Option<DateTime<Utc>> {
    let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Julian centuries since J2000.0
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Julian centuries since J2000.0 for a UTC instant
pub fn centuries_since_j2000(instant: DateTime<Utc>) -> f64 {
    julian_centuries(julian_day(instant))
}

/// Greenwich Mean Sidereal Time in hours [0, 24).
///
/// θ0 = 280.46061837 + 360.98564736629·(JD − 2451545) + 0.000387933·T² − T³/38710000
///
/// Source: Meeus eq. 12.4.
pub fn gmst_hours(instant: DateTime<Utc>) -> f64 {
    let jd = julian_day(instant);
    let t = julian_centuries(jd);
    let theta = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    theta.rem_euclid(360.0) / 15.0
}

/// Local sidereal time in degrees [0, 360), east-positive longitude.
///
/// This is the right ascension of the midheaven (RAMC).
pub fn local_sidereal_degrees(gmst_hours: f64, longitude_east: f64) -> f64 {
    (gmst_hours * 15.0 + longitude_east).rem_euclid(360.0)
}

/// Mean obliquity of the ecliptic in degrees.
///
/// ε = 23.4392911 − 0.0130042·T − 0.00000016·T² + 0.000000504·T³
pub fn mean_obliquity(t: f64) -> f64 {
    23.439_291_1 - 0.013_004_2 * t - 0.000_000_16 * t * t + 0.000_000_504 * t * t * t
}

/// UTC instant at `hour`:00 on `date`
pub fn instant_on(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)) + Duration::hours(hour as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_julian_day_j2000() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_day(dt) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn test_julian_day_meeus_7a() {
        // 1957 October 4.81 -> JD 2436116.31
        let dt = Utc.with_ymd_and_hms(1957, 10, 4, 19, 26, 24).unwrap();
        assert!((julian_day(dt) - 2_436_116.31).abs() < 1e-6);
    }

    #[test]
    fn test_julian_day_round_trip() {
        let dt = Utc.with_ymd_and_hms(2024, 4, 8, 18, 21, 0).unwrap();
        let back = julian_day_to_datetime(julian_day(dt)).unwrap();
        assert_eq!(back, dt);
    }

    #[test]
    fn test_gmst_meeus_12a() {
        // 1987 April 10, 0h UT -> 13h10m46.3668s
        let dt = Utc.with_ymd_and_hms(1987, 4, 10, 0, 0, 0).unwrap();
        let expected = 13.0 + 10.0 / 60.0 + 46.3668 / 3600.0;
        assert!((gmst_hours(dt) - expected).abs() < 1e-5, "gmst = {}", gmst_hours(dt));
    }

    #[test]
    fn test_local_sidereal_wraps() {
        assert!((local_sidereal_degrees(23.0, 30.0) - 15.0).abs() < 1e-12);
        assert!((local_sidereal_degrees(1.0, -30.0) - 345.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_obliquity_j2000() {
        assert!((mean_obliquity(0.0) - 23.4392911).abs() < 1e-12);
        assert!(mean_obliquity(1.0) < mean_obliquity(0.0));
    }
}
