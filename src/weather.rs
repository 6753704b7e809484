//! Weather inputs to the scorer and the provider seam the evaluator pulls them from.
//!
//! Providers deliver rain either as a bare mm/h number or nested under an
//! hourly accumulation key (`{"1h": 0.4}`); both collapse into [`RainMeasurement`].
//! Any other rain shape (a `{"3h": ..}` total, a string) reads as no measurement.

use serde::de::IgnoredAny;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RainMeasurement {
    #[default]
    None,
    Scalar(f64),
    Accumulated(f64),
}

// Written back in the same shapes the deserializer accepts.
impl Serialize for RainMeasurement {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RainMeasurement::None => s.serialize_none(),
            RainMeasurement::Scalar(v) => s.serialize_f64(*v),
            RainMeasurement::Accumulated(v) => {
                let mut map = s.serialize_map(Some(1))?;
                map.serialize_entry("1h", v)?;
                map.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRain {
    Scalar(f64),
    Accumulated {
        #[serde(rename = "1h")]
        one_hour: f64,
    },
    Other(IgnoredAny),
}

impl From<RawRain> for RainMeasurement {
    fn from(raw: RawRain) -> Self {
        match raw {
            RawRain::Scalar(v) => RainMeasurement::Scalar(v),
            RawRain::Accumulated { one_hour } => RainMeasurement::Accumulated(one_hour),
            RawRain::Other(_) => RainMeasurement::None,
        }
    }
}

#[derive(Deserialize)]
struct ConditionEntry {
    id: u16,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCondition {
    Code(u16),
    Entries(Vec<ConditionEntry>),
}

fn deserialize_rain<'de, D>(d: D) -> std::result::Result<RainMeasurement, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawRain>::deserialize(d)?
        .map(RainMeasurement::from)
        .unwrap_or_default())
}

fn deserialize_condition<'de, D>(d: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawCondition>::deserialize(d)? {
        Some(RawCondition::Code(code)) => Some(code),
        Some(RawCondition::Entries(entries)) => entries.first().map(|e| e.id),
        None => None,
    })
}

/// One observation or forecast hour. Every field is optional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherSample {
    #[serde(default, deserialize_with = "deserialize_rain")]
    pub rain: RainMeasurement,
    #[serde(default, alias = "clouds")]
    pub cloud_cover_pct: Option<f64>,
    #[serde(default, alias = "visibility")]
    pub visibility_meters: Option<f64>,
    #[serde(default, alias = "weather", deserialize_with = "deserialize_condition")]
    pub condition_code: Option<u16>,
}

impl WeatherSample {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Source of weather for an evaluation pass. `None` means the source is unavailable.
pub trait WeatherProvider: Sync {
    fn weather_for_hour_offset(&self, hour_offset: usize) -> Option<WeatherSample>;
}

impl<F> WeatherProvider for F
where
    F: Fn(usize) -> Option<WeatherSample> + Sync,
{
    fn weather_for_hour_offset(&self, hour_offset: usize) -> Option<WeatherSample> {
        self(hour_offset)
    }
}

/// Current conditions plus an hourly forecast indexed by hours from now.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub current: WeatherSample,
    #[serde(default)]
    pub hourly: Vec<WeatherSample>,
}

impl Forecast {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

impl WeatherProvider for Forecast {
    /// Falls back to `current` when no hourly entry exists for the offset.
    fn weather_for_hour_offset(&self, hour_offset: usize) -> Option<WeatherSample> {
        Some(*self.hourly.get(hour_offset).unwrap_or(&self.current))
    }
}
