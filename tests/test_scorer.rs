use rainbow_finder::geo::offset_to_point;
use rainbow_finder::scorer::*;
use rainbow_finder::types::{GeoPoint, SolarPosition};
use rainbow_finder::weather::{RainMeasurement, WeatherSample};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn sun_at(elevation: f64, azimuth: f64) -> SolarPosition {
    SolarPosition {
        julian_day: 2_461_213.0,
        declination: 23.4,
        equation_of_time: -1.8,
        true_solar_time: 1080.0,
        hour_angle: 90.0,
        zenith: 90.0 - elevation,
        elevation,
        azimuth,
    }
}

fn ideal_weather() -> WeatherSample {
    WeatherSample {
        rain: RainMeasurement::Scalar(2.0),
        cloud_cover_pct: Some(50.0),
        visibility_meters: Some(10_000.0),
        condition_code: None,
    }
}

fn weather_grid() -> Vec<WeatherSample> {
    let mut samples = Vec::new();
    for rain in [
        RainMeasurement::None,
        RainMeasurement::Scalar(0.0),
        RainMeasurement::Scalar(0.7),
        RainMeasurement::Accumulated(5.0),
    ] {
        for cloud in [None, Some(0.0), Some(50.0), Some(100.0)] {
            for vis in [None, Some(0.0), Some(4_000.0), Some(25_000.0)] {
                for code in [None, Some(310), Some(521), Some(800)] {
                    samples.push(WeatherSample {
                        rain,
                        cloud_cover_pct: cloud,
                        visibility_meters: vis,
                        condition_code: code,
                    });
                }
            }
        }
    }
    samples
}

// ── Gating ──

#[test]
fn test_zero_outside_elevation_band() {
    for &elevation in &[-30.0, -0.5, 0.0, 42.0, 42.01, 66.5, 90.0] {
        for weather in weather_grid() {
            for &bearing in &[0.0, 90.0, 180.0, 270.0] {
                assert_eq!(
                    score_bearing(bearing, &sun_at(elevation, 270.0), &weather),
                    0.0,
                    "elevation={} bearing={}",
                    elevation,
                    bearing
                );
            }
        }
    }
}

// ── Reference scenario ──

#[test]
fn test_ideal_conditions_at_twenty_degrees() {
    let sun = sun_at(20.0, 270.0);
    let f = rainbow_factors(90.0, &sun, &ideal_weather());
    assert_approx!(f.antisolar_azimuth, 90.0, 1e-12);
    assert_approx!(f.delta_theta, 0.0, 1e-12);
    assert_approx!(f.w_azi, 1.0, 1e-12);
    assert_approx!(f.w_rain, 1.0, 1e-12);
    assert_approx!(f.w_cloud, 1.0, 1e-12);
    assert_approx!(f.w_vis, 1.0, 1e-12);
    assert_approx!(f.w_sun, 1.0 - 20.0 / 42.0, 1e-12);
    assert_approx!(score_bearing(90.0, &sun, &ideal_weather()), 0.596, 1e-3);
}

#[test]
fn test_score_from_points_matches_bearing() {
    let center = GeoPoint {
        latitude: 51.5,
        longitude: -0.12,
    };
    let east = offset_to_point(&center, 5_000.0, 0.0);
    let sun = sun_at(20.0, 270.0);
    let via_points = score(&center, &east, &sun, &ideal_weather());
    assert!(via_points > 0.59, "score={}", via_points);
    let west = offset_to_point(&center, -5_000.0, 0.0);
    assert!(score(&center, &west, &sun, &ideal_weather()) < 1e-6);
}

// ── Bounds ──

#[test]
fn test_score_always_in_unit_interval() {
    for weather in weather_grid() {
        for elevation in [0.1, 5.0, 20.0, 41.9] {
            for azimuth in [0.0, 95.0, 181.0, 359.0] {
                for bearing in [0.0, 45.0, 275.0, 359.99] {
                    let s = score_bearing(bearing, &sun_at(elevation, azimuth), &weather);
                    assert!((0.0..=1.0).contains(&s), "score={} for {:?}", s, weather);
                }
            }
        }
    }
}

#[test]
fn test_lower_sun_scores_higher() {
    let w = ideal_weather();
    let low = score_bearing(90.0, &sun_at(5.0, 270.0), &w);
    let high = score_bearing(90.0, &sun_at(35.0, 270.0), &w);
    assert!(low > high);
}

// ── Azimuth weight ──

#[test]
fn test_azimuth_weight_falloff() {
    assert_approx!(azimuth_weight(0.0), 1.0, 1e-12);
    assert_approx!(azimuth_weight(18.0), (-1.0f64).exp(), 1e-12);
    assert!(azimuth_weight(90.0) < 1e-10);
}

#[test]
fn test_delta_theta_wraps_through_north() {
    let f = rainbow_factors(355.0, &sun_at(10.0, 185.0), &ideal_weather());
    assert_approx!(f.antisolar_azimuth, 5.0, 1e-9);
    assert_approx!(f.delta_theta, 10.0, 1e-9);
}

// ── Rain rate ──

#[test]
fn test_rain_rate_priority() {
    let scalar = WeatherSample {
        rain: RainMeasurement::Scalar(1.2),
        condition_code: Some(501),
        ..Default::default()
    };
    assert_approx!(rain_rate(&scalar), 1.2, 1e-12);

    let accumulated = WeatherSample {
        rain: RainMeasurement::Accumulated(0.6),
        condition_code: Some(501),
        ..Default::default()
    };
    assert_approx!(rain_rate(&accumulated), 0.6, 1e-12);

    let code_only = WeatherSample {
        condition_code: Some(501),
        ..Default::default()
    };
    assert_approx!(rain_rate(&code_only), CONDITION_RAIN_RATE, 1e-12);

    assert_approx!(rain_rate(&WeatherSample::default()), 0.0, 1e-12);
}

#[test]
fn test_condition_code_bands() {
    let rate_for = |code: u16| {
        rain_rate(&WeatherSample {
            condition_code: Some(code),
            ..Default::default()
        })
    };
    for code in [300, 321, 399, 500, 511, 599] {
        assert_approx!(rate_for(code), 0.2, 1e-12);
    }
    for code in [200, 299, 400, 499, 600, 701, 800] {
        assert_approx!(rate_for(code), 0.0, 1e-12);
    }
}

#[test]
fn test_rain_weight_saturates() {
    assert_approx!(rain_weight(0.0), 0.0, 1e-12);
    assert_approx!(rain_weight(1.0), 0.5, 1e-12);
    assert_approx!(rain_weight(2.0), 1.0, 1e-12);
    assert_approx!(rain_weight(10.0), 1.0, 1e-12);
}

#[test]
fn test_no_rain_means_no_rainbow() {
    let dry = WeatherSample {
        cloud_cover_pct: Some(50.0),
        ..Default::default()
    };
    assert_eq!(score_bearing(90.0, &sun_at(15.0, 270.0), &dry), 0.0);
}

// ── Cloud and visibility ──

#[test]
fn test_cloud_weight_peaks_at_half_cover() {
    assert_approx!(cloud_weight(None), 1.0, 1e-12);
    assert_approx!(cloud_weight(Some(50.0)), 1.0, 1e-12);
    assert_approx!(cloud_weight(Some(20.0)), cloud_weight(Some(80.0)), 1e-12);
    assert_approx!(cloud_weight(Some(80.0)), (-1.0f64).exp(), 1e-12);
    assert!(cloud_weight(Some(100.0)) < cloud_weight(Some(70.0)));
}

#[test]
fn test_visibility_weight() {
    assert_approx!(visibility_weight(None), 1.0, 1e-12);
    assert_approx!(visibility_weight(Some(5_000.0)), 0.5, 1e-12);
    assert_approx!(visibility_weight(Some(40_000.0)), 1.0, 1e-12);
    assert_approx!(visibility_weight(Some(0.0)), 0.0, 1e-12);
}

#[test]
fn test_sun_weight_linear_in_band() {
    assert_approx!(sun_weight(0.0), 1.0, 1e-12);
    assert_approx!(sun_weight(21.0), 0.5, 1e-12);
    assert_approx!(sun_weight(42.0), 0.0, 1e-12);
    assert_approx!(sun_weight(60.0), 0.0, 1e-12);
}
