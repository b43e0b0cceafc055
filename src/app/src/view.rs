//! What the shell renders
//!
//! The view model is derived from [`Model`] on every render and carries the
//! display rules, so shells only lay it out.

use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::types::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub settings: SettingsView,
    pub status: StatusView,
    pub device_info: DeviceInfoView,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        Self {
            settings: SettingsView::from(model),
            status: StatusView::from(model),
            device_info: DeviceInfoView::from(model),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsView {
    pub settings: DeviceSettings,
    pub is_loading: bool,
    pub is_saving: bool,
    /// False while loading, the form ignores input until then
    pub is_interactive: bool,
    pub is_dirty: bool,
    /// SSID and password inputs are only shown in access point mode
    pub show_wifi_fields: bool,
    pub show_change_wifi_button: bool,
    pub save_success: bool,
    pub error_message: Option<String>,
    pub sensor_timeout_range_ms: (u32, u32),
    pub start_print_timeout_range_ms: (u32, u32),
}

impl From<&Model> for SettingsView {
    fn from(model: &Model) -> Self {
        let state = &model.settings;
        let show_wifi_fields = state.settings.ap_mode.is_access_point();

        Self {
            settings: state.settings.clone(),
            is_loading: state.is_loading,
            is_saving: state.is_saving,
            is_interactive: !state.is_loading,
            is_dirty: state.is_dirty,
            show_wifi_fields,
            show_change_wifi_button: !show_wifi_fields,
            save_success: state.save_success,
            error_message: state.error_message.clone(),
            sensor_timeout_range_ms: SENSOR_TIMEOUT_RANGE_MS,
            start_print_timeout_range_ms: START_PRINT_TIMEOUT_RANGE_MS,
        }
    }
}

/// Filament sensor stats, only meaningful while the printer link is up
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilamentView {
    pub stopped: bool,
    pub filament_runout: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusView {
    pub is_polling: bool,
    pub is_loading: bool,
    /// The last poll failed, the figures below are from an earlier poll
    pub is_stale: bool,
    pub error_message: Option<String>,
    pub printer_connected: bool,
    pub filament: Option<FilamentView>,
    pub mainboard_id: String,
    pub print_status: String,
    pub print_status_code: i32,
    pub is_printing: bool,
    pub current_layer: u32,
    pub total_layer: u32,
    pub progress: f64,
    pub current_ticks: u64,
    pub total_ticks: u64,
    pub print_speed_pct: f64,
    pub current_z: f64,
}

impl From<&Model> for StatusView {
    fn from(model: &Model) -> Self {
        let state = &model.status;
        let status = &state.sensor_status;
        let printer = &status.elegoo;
        let printer_connected = printer.is_websocket_connected;

        Self {
            is_polling: state.is_active,
            is_loading: state.is_loading,
            is_stale: state.last_error.is_some(),
            error_message: state.last_error.clone(),
            printer_connected,
            filament: printer_connected.then(|| FilamentView {
                stopped: status.stopped,
                filament_runout: status.filament_runout,
            }),
            mainboard_id: printer.mainboard_id.clone(),
            print_status: printer.print_status().label(),
            print_status_code: printer.print_status,
            is_printing: printer.is_printing,
            current_layer: printer.current_layer,
            total_layer: printer.total_layer,
            progress: printer.progress,
            current_ticks: printer.current_ticks,
            total_ticks: printer.total_ticks,
            print_speed_pct: printer.print_speed_pct,
            current_z: printer.current_z,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceInfoView {
    pub logs: Vec<LogEntry>,
    pub logs_loading: bool,
    pub logs_error: Option<String>,
    pub version: Option<VersionInfo>,
    pub version_loading: bool,
    pub version_error: Option<String>,
    /// Any device request still in flight
    pub is_loading: bool,
}

impl From<&Model> for DeviceInfoView {
    fn from(model: &Model) -> Self {
        let state = &model.device_info;
        Self {
            logs: state.logs.value.clone(),
            logs_loading: state.logs.is_loading,
            logs_error: state.logs.error_message.clone(),
            version: state.version.value.clone(),
            version_loading: state.version.is_loading,
            version_error: state.version.error_message.clone(),
            is_loading: state.is_loading(),
        }
    }
}
