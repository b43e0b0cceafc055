use serde::{Deserialize, Serialize};

use crate::commands::timer::TimerOutput;
use crate::types::*;

/// Events that can happen in the app, grouped by domain
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Event {
    Settings(SettingsEvent),
    Status(StatusEvent),
    Device(DeviceEvent),
    Ui(UiEvent),
}

/// Settings tab: load on mount, edit, save
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Load,
    Edit(SettingsEdit),
    /// Open the SSID/password fields without talking to the device
    ChangeWifiNetwork,
    Save,
    /// Settings view unmounted
    Close,

    // HTTP responses and timers (internal events, skipped from serialization)
    #[serde(skip)]
    LoadResponse(Result<DeviceSettings, String>),
    #[serde(skip)]
    SaveResponse(Result<(), String>),
    #[serde(skip)]
    DismissTimer(TimerOutput),
}

/// Status tab: live telemetry polling
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum StatusEvent {
    StartPolling,
    StopPolling,

    #[serde(skip)]
    SensorStatusResponse {
        generation: u64,
        seq: u64,
        result: Result<SensorStatus, String>,
    },
    #[serde(skip)]
    PollTimer(TimerOutput),
}

/// Device log and version info
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    LoadLogs,
    LoadVersion,

    #[serde(skip)]
    LogsResponse(Result<Vec<LogEntry>, String>),
    #[serde(skip)]
    VersionResponse(Result<VersionInfo, String>),
}

/// UI actions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ClearSettingsError,
    ClearDeviceInfoError,
}
