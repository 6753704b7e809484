pub mod angles;
pub mod error;
pub mod evaluator;
pub mod geo;
pub mod grid;
pub mod scorer;
pub mod types;
pub mod weather;

pub use angles::{
    angular_distance, deg_to_rad, equation_of_time, hour_angle, julian_century, julian_day,
    normalize_angle, rad_to_deg, solar_azimuth, solar_declination, solar_elevation,
    solar_position, true_solar_time,
};

pub use error::{RainbowError, Result};

pub use evaluator::{evaluate, evaluate_with_sun, instant_for_offset};

pub use geo::{bearing_degrees, distance_meters, offset_to_point, EARTH_RADIUS_METERS};

pub use grid::build_grid;

pub use scorer::{
    rain_rate, rainbow_factors, score, score_bearing, RainbowFactors, CONDITION_RAIN_RATE,
    MAX_SUN_ELEVATION,
};

pub use types::{
    EvaluationConfig, EvaluationResult, EvaluationStatus, GeoPoint, GridCell, SolarPosition,
};

pub use weather::{Forecast, RainMeasurement, WeatherProvider, WeatherSample};
