use chrono::{DateTime, Duration, Utc};
use log::{debug, trace};
use rayon::prelude::*;

use crate::angles;
use crate::error::Result;
use crate::geo::bearing_degrees;
use crate::grid::build_grid;
use crate::scorer::{score_bearing, sun_in_rainbow_band};
use crate::types::{
    EvaluationConfig, EvaluationResult, EvaluationStatus, GeoPoint, GridCell, SolarPosition,
};
use crate::weather::WeatherProvider;

/// The instant `hour_offset` hours after `now`, matching the forecast hour of the same offset.
///
/// `None` when the result falls outside the range `DateTime<Utc>` can represent.
pub fn instant_for_offset(now: DateTime<Utc>, hour_offset: usize) -> Option<DateTime<Utc>> {
    let hours = i64::try_from(hour_offset).ok()?;
    now.checked_add_signed(Duration::try_hours(hours)?)
}

/// Score every grid cell around `center` at `instant`.
///
/// The sun position is computed once here and shared by all cells.
pub fn evaluate<W: WeatherProvider + ?Sized>(
    center: &GeoPoint,
    instant: &DateTime<Utc>,
    config: &EvaluationConfig,
    weather: &W,
) -> Result<EvaluationResult> {
    center.validate()?;
    config.validate()?;
    debug!(
        "evaluating rainbow grid at ({:.4}, {:.4}) for {}",
        center.latitude, center.longitude, instant
    );
    let sun = angles::solar_position(center.latitude, center.longitude, instant);
    evaluate_validated(center, &sun, config, weather)
}

pub fn evaluate_with_sun<W: WeatherProvider + ?Sized>(
    center: &GeoPoint,
    sun: &SolarPosition,
    config: &EvaluationConfig,
    weather: &W,
) -> Result<EvaluationResult> {
    center.validate()?;
    config.validate()?;
    evaluate_validated(center, sun, config, weather)
}

/// Caller has already validated `center` and `config`.
fn evaluate_validated<W: WeatherProvider + ?Sized>(
    center: &GeoPoint,
    sun: &SolarPosition,
    config: &EvaluationConfig,
    weather: &W,
) -> Result<EvaluationResult> {
    trace!("sun elevation {:.3}°, azimuth {:.3}°", sun.elevation, sun.azimuth);

    if !sun_in_rainbow_band(sun) {
        debug!("sun elevation {:.2}° outside rainbow band, skipping grid", sun.elevation);
        return Ok(EvaluationResult::empty(EvaluationStatus::SunOutOfRange, *sun));
    }

    let sample = match weather.weather_for_hour_offset(config.hour_offset) {
        Some(sample) => sample,
        None => {
            debug!("no weather for hour offset {}", config.hour_offset);
            return Ok(EvaluationResult::empty(EvaluationStatus::WeatherUnavailable, *sun));
        }
    };

    let grid = build_grid(center, config.radius_meters, config.spacing_meters)?;
    let cells: Vec<GridCell> = grid
        .par_iter()
        .filter_map(|point| {
            let bearing = bearing_degrees(center, point);
            let score = score_bearing(bearing, sun, &sample);
            (score > 0.0).then_some(GridCell {
                point: *point,
                bearing_from_center: bearing,
                score,
            })
        })
        .collect();

    debug!("{} of {} cells scored above zero", cells.len(), grid.len());
    let status = if cells.is_empty() {
        EvaluationStatus::NoResults
    } else {
        EvaluationStatus::Favorable
    };
    Ok(EvaluationResult {
        status,
        sun: *sun,
        cells,
    })
}
