use async_trait::async_trait;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Database};
use serde_json::Value;
use tokio_stream::StreamExt as _;

use crate::Result;
use crate::sensor::{LogEntry, SensorKind, StoredPoint};
use crate::store::SensorStore;

const DEVICE_DATA_KIND: &str = "DeviceData";
const HORTICULTURE_KIND: &str = "DailyHorticultureLog";
const DATA_FIELD: &str = "data";
const TIMESTAMP_FIELD: &str = "timestamp";
const VALUE_FIELD: &str = "value";
const DEVICE_UUID_FIELD: &str = "device_uuid";

/// Document-store client backed by MongoDB.
#[derive(Clone)]
pub struct MongoSensorStore {
    db: Database,
}

impl MongoSensorStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        tracing::debug!("document store client created");
        Ok(Self::new(client.database(database)))
    }

    // Hot-written series are split into one collection per property
    // and device to keep writers from contending on a single kind.
    fn device_data_collection(kind: SensorKind, device_uuid: &str) -> String {
        format!("{DEVICE_DATA_KIND}_{}_{device_uuid}", kind.property_name())
    }
}

#[async_trait]
impl SensorStore for MongoSensorStore {
    async fn recent_points(
        &self,
        kind: SensorKind,
        device_uuid: &str,
        limit: Option<u64>,
    ) -> Result<Vec<StoredPoint>> {
        let name = Self::device_data_collection(kind, device_uuid);
        let collection = self.db.collection::<Document>(&name);

        let mut find = collection.find(doc! {}).sort(doc! { TIMESTAMP_FIELD: -1 });
        if let Some(limit) = limit {
            find = find.limit(limit as i64);
        }

        let mut cursor = find.await?;
        let mut points = Vec::new();
        while let Some(entity) = cursor.next().await {
            points.push(decode_point(&entity?));
        }
        Ok(points)
    }

    async fn horticulture_logs(&self, device_uuid: &str) -> Result<Vec<LogEntry>> {
        let collection = self.db.collection::<Document>(HORTICULTURE_KIND);
        let mut cursor = collection
            .find(doc! { DEVICE_UUID_FIELD: device_uuid })
            .await?;

        let mut entries = Vec::new();
        while let Some(entity) = cursor.next().await {
            entries.push(decode_log_entry(&entity?));
        }
        Ok(entries)
    }
}

fn decode_point(entity: &Document) -> StoredPoint {
    // Entities wrap the reported point in a `data` property; anything
    // else decodes to an empty point.
    let Some(Bson::Document(data)) = entity.get(DATA_FIELD) else {
        return StoredPoint::default();
    };
    StoredPoint {
        timestamp: data
            .get(TIMESTAMP_FIELD)
            .map(decode_text)
            .unwrap_or_default(),
        value: decode_optional(data.get(VALUE_FIELD)).unwrap_or(Value::Null),
    }
}

fn decode_log_entry(entity: &Document) -> LogEntry {
    LogEntry {
        device_uuid: decode_optional_text(entity.get(DEVICE_UUID_FIELD)),
        submitted_at: decode_optional_text(entity.get("submitted_at")),
        leaf_count: decode_optional(entity.get("leaf_count")),
        plant_height: decode_optional(entity.get("plant_height")),
        horticulture_notes: decode_optional(entity.get("horticulture_notes")),
    }
}

// Fields written by older firmware may arrive as raw byte blobs.
fn decode_text(field: &Bson) -> String {
    match field {
        Bson::String(s) => s.clone(),
        Bson::Binary(b) => String::from_utf8_lossy(&b.bytes).into_owned(),
        other => other.to_string(),
    }
}

fn decode_value(field: &Bson) -> Value {
    match field {
        Bson::String(s) => Value::String(s.clone()),
        Bson::Binary(b) => Value::String(String::from_utf8_lossy(&b.bytes).into_owned()),
        other => other.clone().into_relaxed_extjson(),
    }
}

fn decode_optional(field: Option<&Bson>) -> Option<Value> {
    match field {
        None | Some(Bson::Null) => None,
        Some(other) => Some(decode_value(other)),
    }
}

fn decode_optional_text(field: Option<&Bson>) -> Option<String> {
    match field {
        None | Some(Bson::Null) => None,
        Some(other) => Some(decode_text(other)),
    }
}
