use serde::{Deserialize, Serialize};

use crate::error::{RainbowError, Result};

/// A location on the sphere in degrees. Latitude in [-90, 90], longitude in [-180, 180).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> Result<()> {
        let lat_ok = (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = (-180.0..180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(RainbowError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    pub julian_day: f64,
    pub declination: f64,
    /// Minutes.
    pub equation_of_time: f64,
    /// Minutes past true solar midnight, [0, 1440).
    pub true_solar_time: f64,
    pub hour_angle: f64,
    pub zenith: f64,
    pub elevation: f64,
    pub azimuth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub point: GeoPoint,
    pub bearing_from_center: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationStatus {
    Favorable,
    SunOutOfRange,
    NoResults,
    WeatherUnavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub status: EvaluationStatus,
    pub sun: SolarPosition,
    pub cells: Vec<GridCell>,
}

impl EvaluationResult {
    pub fn empty(status: EvaluationStatus, sun: SolarPosition) -> Self {
        Self {
            status,
            sun,
            cells: Vec::new(),
        }
    }

    pub fn is_favorable(&self) -> bool {
        self.status == EvaluationStatus::Favorable
    }

    /// Highest-scoring cell; the earliest one in grid order wins a tie.
    pub fn best_cell(&self) -> Option<&GridCell> {
        self.cells.iter().fold(None, |best, cell| match best {
            Some(b) if b.score >= cell.score => Some(b),
            _ => Some(cell),
        })
    }

    /// `[latitude, longitude, score]` triples in grid order.
    pub fn heatmap_points(&self) -> Vec<[f64; 3]> {
        self.cells
            .iter()
            .map(|c| [c.point.latitude, c.point.longitude, c.score])
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub radius_meters: f64,
    pub spacing_meters: f64,
    pub hour_offset: usize,
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.radius_meters) || !positive(self.spacing_meters) {
            return Err(RainbowError::InvalidGridConfig {
                radius_meters: self.radius_meters,
                spacing_meters: self.spacing_meters,
            });
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            radius_meters: 25_000.0,
            spacing_meters: 2_000.0,
            hour_offset: 0,
        }
    }
}
