//! Angle helpers and the NOAA low-precision solar position algorithm.
//!
//! Valid for 1900-2099 with roughly 0.01° accuracy. All inputs and outputs are
//! degrees; radians only appear inside the trigonometry.

use chrono::{DateTime, Timelike, Utc};

use crate::types::SolarPosition;

pub const JULIAN_DAY_UNIX_EPOCH: f64 = 2_440_587.5;
pub const JULIAN_DAY_J2000: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
pub const MINUTES_PER_DAY: f64 = 1440.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Smallest angle between two bearings, in [0, 180].
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_angle(a - b);
    d.min(360.0 - d)
}

pub fn julian_day(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp_millis() as f64 / 86_400_000.0 + JULIAN_DAY_UNIX_EPOCH
}

pub fn julian_century(jd: f64) -> f64 {
    (jd - JULIAN_DAY_J2000) / DAYS_PER_JULIAN_CENTURY
}

pub fn geometric_mean_longitude(t: f64) -> f64 {
    normalize_angle(280.46646 + t * (36000.76983 + t * 0.0003032))
}

pub fn mean_anomaly(t: f64) -> f64 {
    normalize_angle(357.52911 + t * (35999.05029 - 0.0001537 * t))
}

pub fn eccentricity(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

pub fn equation_of_center(t: f64) -> f64 {
    let m = deg_to_rad(mean_anomaly(t));
    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

pub fn true_longitude(t: f64) -> f64 {
    geometric_mean_longitude(t) + equation_of_center(t)
}

/// Longitude of the moon's ascending node, used for the nutation terms.
pub fn ascending_node(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

pub fn apparent_longitude(t: f64) -> f64 {
    let omega = deg_to_rad(ascending_node(t));
    true_longitude(t) - 0.00569 - 0.00478 * omega.sin()
}

pub fn mean_obliquity(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.8150 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

pub fn obliquity_corrected(t: f64) -> f64 {
    let omega = deg_to_rad(ascending_node(t));
    mean_obliquity(t) + 0.00256 * omega.cos()
}

pub fn solar_declination(t: f64) -> f64 {
    let eps = deg_to_rad(obliquity_corrected(t));
    let lambda = deg_to_rad(apparent_longitude(t));
    rad_to_deg((eps.sin() * lambda.sin()).asin())
}

/// Equation of time in minutes.
pub fn equation_of_time(t: f64) -> f64 {
    let eps = deg_to_rad(obliquity_corrected(t));
    let l0 = deg_to_rad(geometric_mean_longitude(t));
    let m = deg_to_rad(mean_anomaly(t));
    let e = eccentricity(t);
    let y = (eps / 2.0).tan().powi(2);

    let eot = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    4.0 * rad_to_deg(eot)
}

/// True solar time in minutes, [0, 1440).
pub fn true_solar_time(utc_minutes: f64, eot: f64, longitude: f64) -> f64 {
    (utc_minutes + eot + 4.0 * longitude).rem_euclid(MINUTES_PER_DAY)
}

pub fn hour_angle(true_solar_time: f64) -> f64 {
    let quarter = true_solar_time / 4.0;
    if quarter < 0.0 {
        quarter + 180.0
    } else {
        quarter - 180.0
    }
}

pub fn solar_elevation(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_elev = lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(sin_elev.clamp(-1.0, 1.0).asin())
}

/// Azimuth from North, clockwise, [0, 360).
pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let y = -ha_rad.sin();
    let x = dec_rad.tan() * lat_rad.cos() - lat_rad.sin() * ha_rad.cos();
    normalize_angle(rad_to_deg(y.atan2(x)))
}

pub fn solar_position(latitude: f64, longitude: f64, dt: &DateTime<Utc>) -> SolarPosition {
    let jd = julian_day(dt);
    let t = julian_century(jd);
    let utc_minutes =
        dt.num_seconds_from_midnight() as f64 / 60.0 + dt.nanosecond() as f64 / 60e9;

    let decl = solar_declination(t);
    let eot = equation_of_time(t);
    let tst = true_solar_time(utc_minutes, eot, longitude);
    let ha = hour_angle(tst);
    let elevation = solar_elevation(latitude, decl, ha);
    let azimuth = solar_azimuth(latitude, decl, ha);

    SolarPosition {
        julian_day: jd,
        declination: decl,
        equation_of_time: eot,
        true_solar_time: tst,
        hour_angle: ha,
        zenith: 90.0 - elevation,
        elevation,
        azimuth,
    }
}
