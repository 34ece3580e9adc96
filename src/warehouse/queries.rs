//! The single home for warehouse query templates.
//!
//! `vals` row ids pack `~`-delimited tokens in a fixed order: key,
//! variable name, timestamp, device id. The templates slice them with
//! `split_part` (1-based).

/// Replaced with the device id by [`format_query`].
pub const DEVICE_PLACEHOLDER: &str = "__DEVICE_UUID__";

pub const OBSERVED_TIME_COLUMN: &str = "observed_time";
pub const VAR_NAME_COLUMN: &str = "var_name";
pub const PAYLOAD_COLUMN: &str = "payload";

pub fn format_query(template: &str, device_uuid: &str) -> String {
    template.replace(DEVICE_PLACEHOLDER, device_uuid)
}

/// Last 30 days of temperature and humidity rows for one device,
/// newest first.
pub const TEMP_RH_HISTORY: &str = r#"
SELECT
    to_char(split_part(id, '~', 3)::timestamptz AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS observed_time,
    split_part(id, '~', 2) AS var_name,
    payload
FROM vals
WHERE split_part(id, '~', 2) IN ('air_temperature_celsius', 'air_humidity_percent')
  AND split_part(id, '~', 4) = '__DEVICE_UUID__'
  AND split_part(id, '~', 3)::timestamptz <= now()
  AND split_part(id, '~', 3)::timestamptz >= now() - interval '30 days'
ORDER BY split_part(id, '~', 3) DESC
LIMIT 2500
"#;

/// Row counts per variable across the whole public data set. One
/// result row; every column is an integer count.
pub const COUNTS: &str = r#"
SELECT
    count(*) AS total_count,
    count(*) FILTER (WHERE split_part(id, '~', 2) = 'air_carbon_dioxide_ppm') AS air_carbon_dioxide_ppm_count,
    count(*) FILTER (WHERE split_part(id, '~', 2) = 'air_humidity_percent') AS air_humidity_percent_count,
    count(*) FILTER (WHERE split_part(id, '~', 2) = 'air_temperature_celsius') AS air_temperature_celsius_count,
    count(*) FILTER (WHERE split_part(id, '~', 2) = 'water_electrical_conductivity_ms_cm') AS water_electrical_conductivity_ms_cm_count,
    count(*) FILTER (WHERE split_part(id, '~', 2) = 'water_potential_hydrogen') AS water_potential_hydrogen_count,
    count(*) FILTER (WHERE split_part(id, '~', 2) = 'water_temperature_celcius') AS water_temperature_celcius_count,
    count(*) FILTER (WHERE split_part(id, '~', 2) = 'light_intensity_watts') AS light_intensity_watts_count,
    count(*) FILTER (WHERE split_part(id, '~', 2) = 'light_spectrum_nm_percent') AS light_spectrum_nm_percent_count
FROM vals
"#;
