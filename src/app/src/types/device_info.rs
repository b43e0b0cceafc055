use serde::{Deserialize, Serialize};

/// One entry of the bridge's in-memory log ring buffer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub uuid: String,
    /// Unix seconds, 0 if the device had no time sync yet
    pub timestamp: u64,
    pub message: String,
}

/// `GET /logs` payload, oldest entry first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// `GET /version` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub firmware_version: String,
    pub chip_family: String,
    pub build_date: String,
    pub build_time: String,
}
