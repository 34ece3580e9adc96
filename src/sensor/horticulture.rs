use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stored horticulture log entry. Entries are submitted piecemeal,
/// so every measurement field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub device_uuid: Option<String>,

    pub submitted_at: Option<String>,

    pub leaf_count: Option<Value>,

    pub plant_height: Option<Value>,

    pub horticulture_notes: Option<Value>,
}

/// Latest known horticulture state for a device, merged across
/// entries. All fields are null when the device has no entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentLog {
    pub plant_height: Option<Value>,

    pub leaf_count: Option<Value>,

    pub submitted_at: Option<String>,

    pub horticulture_notes: Option<Value>,
}

impl CurrentLog {
    /// Fills each field from the first entry that carries it, stopping
    /// once all four are set.
    pub fn merge(entries: &[LogEntry]) -> Self {
        let mut log = Self::default();
        for entry in entries {
            if log.plant_height.is_none() {
                log.plant_height = entry.plant_height.clone();
            }
            if log.leaf_count.is_none() {
                log.leaf_count = entry.leaf_count.clone();
            }
            if log.submitted_at.is_none() {
                log.submitted_at = entry.submitted_at.clone();
            }
            if log.horticulture_notes.is_none() {
                log.horticulture_notes = entry.horticulture_notes.clone();
            }
            if log.is_complete() {
                break;
            }
        }
        log
    }

    fn is_complete(&self) -> bool {
        self.plant_height.is_some()
            && self.leaf_count.is_some()
            && self.submitted_at.is_some()
            && self.horticulture_notes.is_some()
    }
}
