use thiserror::Error;

#[derive(Error, Debug)]
pub enum RainbowError {
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error(
        "invalid grid config: radius {radius_meters} m, spacing {spacing_meters} m (both must be > 0)"
    )]
    InvalidGridConfig {
        radius_meters: f64,
        spacing_meters: f64,
    },

    #[error("malformed weather payload: {0}")]
    WeatherPayload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RainbowError>;
