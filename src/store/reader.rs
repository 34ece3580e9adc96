//! Read-side queries over a [`SensorStore`]. Every function converts
//! backend failures into its documented empty value; callers never see
//! an error.

use chrono::NaiveDateTime;

use crate::payload;
use crate::sensor::{
    CurrentLog, CurrentValue, HistoricalValues, Reading, SensorKind, StoredPoint,
    TempHumidityHistory, known_device,
};
use crate::store::SensorStore;

/// Conventional cap on history fetches.
pub const HISTORY_LIMIT: u64 = 1000;

const UTC_TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// All air series plus the horticulture log series for one device,
/// optionally windowed to an inclusive `[start, end]` range. The range
/// applies only when both bounds parse as `%Y-%m-%dT%H:%M:%SZ`;
/// otherwise the full history is returned.
pub async fn all_historical_values(
    store: &dyn SensorStore,
    device_uuid: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> HistoricalValues {
    let mut history = HistoricalValues::default();
    let Some(device) = known_device(device_uuid) else {
        tracing::debug!("all_historical_values: no device uuid");
        return history;
    };

    let co2 = points_or_empty(store, SensorKind::Co2, device, Some(HISTORY_LIMIT)).await;
    let temp = points_or_empty(store, SensorKind::Temperature, device, Some(HISTORY_LIMIT)).await;
    let rh =
        points_or_empty(store, SensorKind::RelativeHumidity, device, Some(HISTORY_LIMIT)).await;
    if co2.is_empty() && temp.is_empty() && rh.is_empty() {
        tracing::debug!("all_historical_values: no device data for {device}");
        return history;
    }

    let range = parse_range(start, end);
    history.temp = windowed_readings(temp, range.as_ref());
    history.rh = windowed_readings(rh, range.as_ref());
    history.co2 = windowed_readings(co2, range.as_ref());

    let entries = match store.horticulture_logs(device).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("all_historical_values: horticulture log fetch failed: {e}");
            Vec::new()
        }
    };
    for entry in entries {
        let raw = entry.submitted_at.unwrap_or_default();
        // Fractional seconds are cut at the first dot, the way the
        // stored strings have always been keyed.
        let trimmed = raw.split('.').next().unwrap_or_default();
        let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, UTC_TS_FORMAT) else {
            tracing::warn!("skipping horticulture entry with invalid timestamp: {raw:?}");
            continue;
        };
        if out_of_range(&ts, range.as_ref()) {
            continue;
        }
        if let Some(value) = entry.leaf_count {
            history.leaf_count.push(Reading::new(value, trimmed));
        }
        if let Some(value) = entry.plant_height {
            history.plant_height.push(Reading::new(value, trimmed));
        }
        if let Some(value) = entry.horticulture_notes {
            history.horticulture_notes.push(Reading::new(value, trimmed));
        }
    }

    history
}

/// Newest-first history for one sensor, as `{value, time}` pairs.
pub async fn sensor_history(
    store: &dyn SensorStore,
    kind: SensorKind,
    device_uuid: Option<&str>,
    limit: u64,
) -> Vec<Reading> {
    let Some(device) = known_device(device_uuid) else {
        return Vec::new();
    };
    points_or_empty(store, kind, device, Some(limit))
        .await
        .into_iter()
        .map(reading)
        .collect()
}

/// Most recent value for one sensor, formatted with two decimal
/// places. Empty string when the device has no data (or the latest
/// value is not numeric).
pub async fn current_float_value(
    store: &dyn SensorStore,
    kind: SensorKind,
    device_uuid: Option<&str>,
) -> String {
    let Some(device) = known_device(device_uuid) else {
        return String::new();
    };
    let points = points_or_empty(store, kind, device, Some(1)).await;
    let Some(point) = points.into_iter().next() else {
        return String::new();
    };
    payload::format_two_decimals(&point.value).unwrap_or_else(|| {
        tracing::debug!("latest {} value is not numeric", kind.as_str());
        String::new()
    })
}

/// Most recent value for one sensor paired with its timestamp; both
/// fields null when the device has no data.
pub async fn current_float_value_with_timestamp(
    store: &dyn SensorStore,
    kind: SensorKind,
    device_uuid: Option<&str>,
) -> CurrentValue {
    let Some(device) = known_device(device_uuid) else {
        return CurrentValue::default();
    };
    let points = points_or_empty(store, kind, device, Some(1)).await;
    let Some(point) = points.into_iter().next() else {
        return CurrentValue::default();
    };
    match payload::format_two_decimals(&point.value) {
        Some(value) => CurrentValue {
            value: Some(value),
            timestamp: Some(point.timestamp),
        },
        None => {
            tracing::debug!("latest {} value is not numeric", kind.as_str());
            CurrentValue::default()
        }
    }
}

/// Most recent value for one sensor re-serialized as a JSON string.
/// Stored values use single-quoted keys; they are normalized before
/// parsing. `"{}"` on absence or parse failure.
pub async fn current_json_value(
    store: &dyn SensorStore,
    kind: SensorKind,
    device_uuid: Option<&str>,
) -> String {
    const EMPTY: &str = "{}";
    let Some(device) = known_device(device_uuid) else {
        return EMPTY.to_string();
    };
    let points = points_or_empty(store, kind, device, Some(1)).await;
    let Some(point) = points.into_iter().next() else {
        return EMPTY.to_string();
    };
    payload::reserialize_json(&payload::value_text(&point.value))
        .unwrap_or_else(|| EMPTY.to_string())
}

/// Latest known horticulture state, merged first-non-null across the
/// device's log entries.
pub async fn current_horticulture_log(
    store: &dyn SensorStore,
    device_uuid: Option<&str>,
) -> CurrentLog {
    let Some(device) = known_device(device_uuid) else {
        return CurrentLog::default();
    };
    match store.horticulture_logs(device).await {
        Ok(entries) => CurrentLog::merge(&entries),
        Err(e) => {
            tracing::error!("current_horticulture_log: log fetch failed: {e}");
            CurrentLog::default()
        }
    }
}

/// Temperature and humidity series side by side. Empty result unless
/// both series have data.
pub async fn temp_and_humidity_history(
    store: &dyn SensorStore,
    device_uuid: Option<&str>,
) -> TempHumidityHistory {
    let mut history = TempHumidityHistory::default();
    let Some(device) = known_device(device_uuid) else {
        return history;
    };

    let temp = points_or_empty(store, SensorKind::Temperature, device, Some(HISTORY_LIMIT)).await;
    let rh =
        points_or_empty(store, SensorKind::RelativeHumidity, device, Some(HISTORY_LIMIT)).await;
    if temp.is_empty() || rh.is_empty() {
        return history;
    }

    history.temp = temp.into_iter().map(reading).collect();
    history.rh = rh.into_iter().map(reading).collect();
    history
}

/// Raw LED panel frames, newest first.
pub async fn led_panel_history(store: &dyn SensorStore, device_uuid: Option<&str>) -> Vec<String> {
    let Some(device) = known_device(device_uuid) else {
        return Vec::new();
    };
    points_or_empty(store, SensorKind::LedPanel, device, Some(HISTORY_LIMIT))
        .await
        .into_iter()
        .map(|point| payload::value_text(&point.value))
        .collect()
}

async fn points_or_empty(
    store: &dyn SensorStore,
    kind: SensorKind,
    device_uuid: &str,
    limit: Option<u64>,
) -> Vec<StoredPoint> {
    match store.recent_points(kind, device_uuid, limit).await {
        Ok(points) => points,
        Err(e) => {
            tracing::error!("{} point fetch failed: {e}", kind.as_str());
            Vec::new()
        }
    }
}

fn reading(point: StoredPoint) -> Reading {
    Reading {
        value: point.value,
        time: point.timestamp,
    }
}

fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = NaiveDateTime::parse_from_str(start?, UTC_TS_FORMAT).ok()?;
    let end = NaiveDateTime::parse_from_str(end?, UTC_TS_FORMAT).ok()?;
    Some((start, end))
}

fn out_of_range(ts: &NaiveDateTime, range: Option<&(NaiveDateTime, NaiveDateTime)>) -> bool {
    match range {
        Some((start, end)) => ts < start || ts > end,
        None => false,
    }
}

// Points only get their timestamps parsed while a window is active;
// with no window the stored string passes through untouched.
fn windowed_readings(
    points: Vec<StoredPoint>,
    range: Option<&(NaiveDateTime, NaiveDateTime)>,
) -> Vec<Reading> {
    let mut readings = Vec::with_capacity(points.len());
    for point in points {
        if range.is_some() {
            let Ok(ts) = NaiveDateTime::parse_from_str(&point.timestamp, UTC_TS_FORMAT) else {
                continue;
            };
            if out_of_range(&ts, range) {
                continue;
            }
        }
        readings.push(reading(point));
    }
    readings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(ts: &str, value: &str) -> StoredPoint {
        StoredPoint {
            timestamp: ts.to_string(),
            value: json!(value),
        }
    }

    #[test]
    fn range_requires_both_bounds_to_parse() {
        assert!(parse_range(Some("2024-03-01T00:00:00Z"), Some("2024-03-02T00:00:00Z")).is_some());
        assert!(parse_range(Some("2024-03-01T00:00:00Z"), Some("yesterday")).is_none());
        assert!(parse_range(None, Some("2024-03-02T00:00:00Z")).is_none());
        assert!(parse_range(Some("2024-03-01 00:00:00"), Some("2024-03-02T00:00:00Z")).is_none());
    }

    #[test]
    fn window_is_boundary_inclusive() {
        let range = parse_range(Some("2024-03-01T00:00:00Z"), Some("2024-03-03T00:00:00Z"));
        let points = vec![
            point("2024-03-03T00:00:00Z", "3"),
            point("2024-03-02T12:00:00Z", "2"),
            point("2024-03-01T00:00:00Z", "1"),
            point("2024-02-29T23:59:59Z", "0"),
            point("2024-03-04T00:00:01Z", "4"),
        ];
        let readings = windowed_readings(points, range.as_ref());
        let values: Vec<_> = readings.iter().map(|r| r.value.clone()).collect();
        assert_eq!(values, vec![json!("3"), json!("2"), json!("1")]);
    }

    #[test]
    fn without_a_window_unparseable_timestamps_pass_through() {
        let points = vec![point("not a timestamp", "1")];
        assert_eq!(windowed_readings(points.clone(), None).len(), 1);

        let range = parse_range(Some("2024-03-01T00:00:00Z"), Some("2024-03-03T00:00:00Z"));
        assert!(windowed_readings(points, range.as_ref()).is_empty());
    }
}
