//! Heuristic rainbow likelihood for one viewing direction.
//!
//! A primary bow sits ~42° from the antisolar point, so it can only appear
//! above the horizon while the sun is between 0° and 42° elevation. Inside
//! that band the score is a weighted geometric mean of five factors in [0, 1]:
//!
//! | factor    | peaks when                                   | exponent |
//! |-----------|----------------------------------------------|----------|
//! | `w_azi`   | bearing points at the antisolar azimuth      | 0.4      |
//! | `w_sun`   | sun is low                                   | 0.8      |
//! | `w_rain`  | rain rate reaches 2 mm/h                     | 1.2      |
//! | `w_cloud` | cloud cover is around 50%                    | 0.6      |
//! | `w_vis`   | visibility reaches 10 km                     | 0.4      |

use serde::{Deserialize, Serialize};

use crate::angles::{angular_distance, normalize_angle};
use crate::geo::bearing_degrees;
use crate::types::{GeoPoint, SolarPosition};
use crate::weather::{RainMeasurement, WeatherSample};

/// Sun elevation at or above which no primary bow clears the horizon.
pub const MAX_SUN_ELEVATION: f64 = 42.0;

/// Rate assumed when only a drizzle or rain condition code is reported.
/// A tunable heuristic, not a measured quantity.
pub const CONDITION_RAIN_RATE: f64 = 0.2;

pub const AZIMUTH_SIGMA: f64 = 18.0;
pub const SATURATING_RAIN_RATE: f64 = 2.0;
pub const IDEAL_CLOUD_COVER: f64 = 50.0;
pub const CLOUD_SIGMA: f64 = 30.0;
pub const FULL_VISIBILITY_METERS: f64 = 10_000.0;

const EXP_AZI: f64 = 0.4;
const EXP_SUN: f64 = 0.8;
const EXP_RAIN: f64 = 1.2;
const EXP_CLOUD: f64 = 0.6;
const EXP_VIS: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainbowFactors {
    pub antisolar_azimuth: f64,
    pub delta_theta: f64,
    pub w_azi: f64,
    pub w_sun: f64,
    pub w_rain: f64,
    pub w_cloud: f64,
    pub w_vis: f64,
}

impl RainbowFactors {
    pub fn combined(&self) -> f64 {
        let raw = self.w_azi.powf(EXP_AZI)
            * self.w_sun.powf(EXP_SUN)
            * self.w_rain.powf(EXP_RAIN)
            * self.w_cloud.powf(EXP_CLOUD)
            * self.w_vis.powf(EXP_VIS);
        sanitise(raw)
    }
}

fn sanitise(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

pub fn sun_in_rainbow_band(sun: &SolarPosition) -> bool {
    sun.elevation > 0.0 && sun.elevation < MAX_SUN_ELEVATION
}

pub fn antisolar_azimuth(sun_azimuth: f64) -> f64 {
    normalize_angle(sun_azimuth + 180.0)
}

pub fn azimuth_weight(delta_theta: f64) -> f64 {
    (-(delta_theta / AZIMUTH_SIGMA).powi(2)).exp()
}

pub fn sun_weight(elevation: f64) -> f64 {
    (1.0 - elevation / MAX_SUN_ELEVATION).max(0.0)
}

/// Drizzle (3xx) or rain (5xx) condition codes.
pub fn is_rain_condition(code: u16) -> bool {
    (300..400).contains(&code) || (500..600).contains(&code)
}

/// Effective rain rate in mm/h: measurement first, then condition code, else 0.
pub fn rain_rate(weather: &WeatherSample) -> f64 {
    let rate = match weather.rain {
        RainMeasurement::Scalar(v) | RainMeasurement::Accumulated(v) => v,
        RainMeasurement::None => match weather.condition_code {
            Some(code) if is_rain_condition(code) => CONDITION_RAIN_RATE,
            _ => 0.0,
        },
    };
    rate.max(0.0)
}

pub fn rain_weight(rate: f64) -> f64 {
    (rate.max(0.0) / SATURATING_RAIN_RATE).min(1.0)
}

pub fn cloud_weight(cloud_cover_pct: Option<f64>) -> f64 {
    let cover = cloud_cover_pct.unwrap_or(IDEAL_CLOUD_COVER);
    (-((cover - IDEAL_CLOUD_COVER) / CLOUD_SIGMA).powi(2)).exp()
}

pub fn visibility_weight(visibility_meters: Option<f64>) -> f64 {
    let vis = visibility_meters.unwrap_or(FULL_VISIBILITY_METERS).max(0.0);
    (vis / FULL_VISIBILITY_METERS).min(1.0)
}

/// Every factor for a view along `bearing`, computed whether or not the sun is in band.
pub fn rainbow_factors(
    bearing: f64,
    sun: &SolarPosition,
    weather: &WeatherSample,
) -> RainbowFactors {
    let antisolar = antisolar_azimuth(sun.azimuth);
    let delta_theta = angular_distance(bearing, antisolar);
    RainbowFactors {
        antisolar_azimuth: antisolar,
        delta_theta,
        w_azi: azimuth_weight(delta_theta),
        w_sun: sun_weight(sun.elevation),
        w_rain: rain_weight(rain_rate(weather)),
        w_cloud: cloud_weight(weather.cloud_cover_pct),
        w_vis: visibility_weight(weather.visibility_meters),
    }
}

pub fn score_bearing(bearing: f64, sun: &SolarPosition, weather: &WeatherSample) -> f64 {
    if !sun_in_rainbow_band(sun) {
        return 0.0;
    }
    rainbow_factors(bearing, sun, weather).combined()
}

/// Score in [0, 1] for seeing a rainbow from `center` in the direction of `cell`.
pub fn score(
    center: &GeoPoint,
    cell: &GeoPoint,
    sun: &SolarPosition,
    weather: &WeatherSample,
) -> f64 {
    score_bearing(bearing_degrees(center, cell), sun, weather)
}
