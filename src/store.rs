mod mongo;
mod reader;

pub use mongo::*;
pub use reader::*;

use async_trait::async_trait;

use crate::Result;
use crate::sensor::{LogEntry, SensorKind, StoredPoint};

/// Low-latency document store holding recent sensor state and
/// horticulture logs. Callers construct a concrete client (usually
/// [`MongoSensorStore`]) and pass it into the reader functions; tests
/// substitute an in-memory implementation.
#[async_trait]
pub trait SensorStore: Send + Sync {
    /// Newest-first points for one sensor partition of a device.
    /// `None` fetches the full history.
    async fn recent_points(
        &self,
        kind: SensorKind,
        device_uuid: &str,
        limit: Option<u64>,
    ) -> Result<Vec<StoredPoint>>;

    /// Every horticulture log entry submitted for a device.
    async fn horticulture_logs(&self, device_uuid: &str) -> Result<Vec<LogEntry>>;
}
