//! Write-side and research queries against the analytical warehouse.
//! The warehouse is slow; live reads belong to the document store.

pub mod queries;

use indexmap::IndexMap;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Column as _, PgPool, Row as _};

use crate::Result;
use crate::payload;
use crate::sensor::{Reading, TempHumidityHistory, known_device};

const TEMP_VAR: &str = "air_temperature_celsius";
const RH_VAR: &str = "air_humidity_percent";

pub async fn new_pool(url: &str) -> Result<PgPool> {
    Ok(PgPoolOptions::new().connect(url).await?)
}

/// One row of the `vals` table: a `~`-delimited composite id and a
/// JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValsRow {
    pub id: String,

    pub payload: String,
}

/// Thirty days of temperature and humidity readings for one device.
/// Empty result on a missing device or any query failure.
pub async fn temp_and_humidity_history(
    pool: &PgPool,
    device_uuid: Option<&str>,
) -> TempHumidityHistory {
    let Some(device) = known_device(device_uuid) else {
        return TempHumidityHistory::default();
    };
    match fetch_temp_and_humidity(pool, device).await {
        Ok(history) => history,
        Err(e) => {
            tracing::error!("temp/humidity history query failed: {e}");
            TempHumidityHistory::default()
        }
    }
}

async fn fetch_temp_and_humidity(pool: &PgPool, device_uuid: &str) -> Result<TempHumidityHistory> {
    let query = queries::format_query(queries::TEMP_RH_HISTORY, device_uuid);
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    let mut history = TempHumidityHistory::default();
    for row in rows {
        let time: String = row.try_get(queries::OBSERVED_TIME_COLUMN)?;
        let var_name: String = row.try_get(queries::VAR_NAME_COLUMN)?;
        let raw_payload: String = row.try_get(queries::PAYLOAD_COLUMN)?;

        // Rows with unreadable payloads are dropped, not fatal.
        let Some(value) = payload::first_reported_value(&raw_payload) else {
            continue;
        };
        match var_name.as_str() {
            TEMP_VAR => history.temp.push(Reading::new(value, time)),
            RH_VAR => history.rh.push(Reading::new(value, time)),
            _ => {}
        }
    }
    Ok(history)
}

/// Appends rows to the `vals` table. Logs and reports failure instead
/// of raising.
pub async fn insert_rows(pool: &PgPool, rows: &[ValsRow]) -> bool {
    match try_insert_rows(pool, rows).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("vals insert failed: {e}");
            false
        }
    }
}

async fn try_insert_rows(pool: &PgPool, rows: &[ValsRow]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
    let payloads: Vec<String> = rows.iter().map(|r| r.payload.clone()).collect();

    sqlx::query(
        r#"
        INSERT INTO vals (id, payload)
        SELECT * FROM UNNEST($1::TEXT[], $2::TEXT[])
        "#,
    )
    .bind(ids)
    .bind(payloads)
    .execute(pool)
    .await?;

    Ok(())
}

/// Saves one data record under the composite id
/// `<data_type>~<device_name>~<timestamp>`. False on missing
/// arguments, unserializable data, or an insert failure; never raises.
pub async fn save(
    pool: &PgPool,
    data_type: Option<&str>,
    device_name: Option<&str>,
    timestamp: &str,
    data: Option<&Value>,
) -> bool {
    let (Some(data_type), Some(device_name), Some(data)) = (data_type, device_name, data) else {
        tracing::error!("save: invalid args");
        return false;
    };
    let payload = match serde_json::to_string(data) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("save: unserializable data: {e}");
            return false;
        }
    };
    let row = ValsRow {
        id: compose_id(data_type, device_name, timestamp),
        payload,
    };
    insert_rows(pool, std::slice::from_ref(&row)).await
}

// Embedded delimiters are stripped from the first two parts so the id
// keeps its token structure.
fn compose_id(data_type: &str, device_name: &str, timestamp: &str) -> String {
    let data_type = data_type.replace('~', "");
    let device_name = device_name.replace('~', "");
    format!("{data_type}~{device_name}~{timestamp}")
}

/// Row counts per variable in the public data set, formatted with
/// thousands separators, in query column order. Empty map on failure.
pub async fn aggregate_counts(pool: &PgPool) -> IndexMap<String, String> {
    match fetch_aggregate_counts(pool).await {
        Ok(counts) => counts,
        Err(e) => {
            tracing::error!("counts query failed: {e}");
            IndexMap::new()
        }
    }
}

async fn fetch_aggregate_counts(pool: &PgPool) -> Result<IndexMap<String, String>> {
    let row = sqlx::query(queries::COUNTS).fetch_one(pool).await?;

    let mut counts = IndexMap::new();
    for column in row.columns() {
        let count: i64 = row.try_get(column.ordinal())?;
        counts.insert(column.name().to_string(), format_thousands(count));
    }
    Ok(counts)
}

fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 { format!("-{out}") } else { out }
}
