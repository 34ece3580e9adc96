use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One point of a sensor time series, in the shape the web layer
/// serves: `{"value": ..., "time": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: Value,

    pub time: String,
}

impl Reading {
    pub fn new(value: impl Into<Value>, time: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            time: time.into(),
        }
    }
}

/// Most recent value of one sensor, paired with its timestamp.
/// Both fields are null when the device has no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentValue {
    pub value: Option<String>,

    pub timestamp: Option<String>,
}

/// Temperature and relative humidity series side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TempHumidityHistory {
    #[serde(rename = "RH")]
    pub rh: Vec<Reading>,

    pub temp: Vec<Reading>,
}

/// Everything the history endpoint serves for one device: the three
/// air series plus the horticulture log series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalValues {
    pub temp: Vec<Reading>,

    #[serde(rename = "RH")]
    pub rh: Vec<Reading>,

    pub co2: Vec<Reading>,

    pub leaf_count: Vec<Reading>,

    pub plant_height: Vec<Reading>,

    pub horticulture_notes: Vec<Reading>,
}

/// Raw decoded point as handed back by a [`SensorStore`], newest
/// first. Stored values may be strings, numbers, or byte blobs that
/// the store adapter has already decoded to text.
///
/// [`SensorStore`]: crate::store::SensorStore
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredPoint {
    pub timestamp: String,

    pub value: Value,
}
