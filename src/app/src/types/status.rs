use serde::{Deserialize, Serialize};
use std::fmt;

/// Printer state as reported by the SDCP `PrintInfo.Status` field
///
/// The table is not exhaustive. Codes that have been observed but not yet
/// decoded (15, 18, 19, 21) and anything newer land in `Unknown`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PrintStatus {
    Idle,
    Homing,
    Dropping,
    Exposing,
    Lifting,
    Pausing,
    Paused,
    Stopping,
    Stopped,
    Complete,
    FileChecking,
    Printing,
    Heating,
    BedLeveling,
    Unknown(i32),
}

impl PrintStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Idle,
            1 => Self::Homing,
            2 => Self::Dropping,
            3 => Self::Exposing,
            4 => Self::Lifting,
            5 => Self::Pausing,
            6 => Self::Paused,
            7 => Self::Stopping,
            8 => Self::Stopped,
            9 => Self::Complete,
            10 => Self::FileChecking,
            13 => Self::Printing,
            16 => Self::Heating,
            20 => Self::BedLeveling,
            other => Self::Unknown(other),
        }
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PrintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "Idle",
            Self::Homing => "Homing",
            Self::Dropping => "Dropping",
            Self::Exposing => "Exposing",
            Self::Lifting => "Lifting",
            Self::Pausing => "Pausing",
            Self::Paused => "Paused",
            Self::Stopping => "Stopping",
            Self::Stopped => "Stopped",
            Self::Complete => "Complete",
            Self::FileChecking => "File Checking",
            Self::Printing => "Printing",
            Self::Heating => "Heating",
            Self::BedLeveling => "Bed Leveling",
            Self::Unknown(code) => return write!(f, "Unknown: {code}"),
        };
        f.write_str(label)
    }
}

/// Printer telemetry relayed by the bridge
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PrinterInfo {
    #[serde(rename = "mainboardID")]
    pub mainboard_id: String,
    pub print_status: i32,
    pub is_printing: bool,
    pub current_layer: u32,
    pub total_layer: u32,
    pub progress: f64,
    pub current_ticks: u64,
    pub total_ticks: u64,
    #[serde(rename = "PrintSpeedPct")]
    pub print_speed_pct: f64,
    /// When false the bridge has lost the printer and the filament fields are stale
    pub is_websocket_connected: bool,
    pub current_z: f64,
}

impl PrinterInfo {
    pub fn print_status(&self) -> PrintStatus {
        PrintStatus::from_code(self.print_status)
    }
}

/// `GET /sensor_status` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SensorStatus {
    pub stopped: bool,
    pub filament_runout: bool,
    pub elegoo: PrinterInfo,
}
