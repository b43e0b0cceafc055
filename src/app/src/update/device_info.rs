use crux_core::{render::render, Command};

use crate::device_get;
use crate::events::{DeviceEvent, Event};
use crate::handle_response;
use crate::model::{LoadingState, Model};
use crate::types::{LogsResponse, VersionInfo};
use crate::Effect;

/// Handle device log and firmware version events
pub fn handle(event: DeviceEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        DeviceEvent::LoadLogs => {
            model.device_info.logs.start_loading();
            Command::all([
                render(),
                device_get!(Device, DeviceEvent, "/logs", LogsResponse, "Load logs",
                    expect_json: LogsResponse,
                    map: |response: LogsResponse| response.logs
                ),
            ])
        }

        DeviceEvent::LoadVersion => {
            model.device_info.version.start_loading();
            Command::all([
                render(),
                device_get!(Device, DeviceEvent, "/version", VersionResponse, "Load version",
                    expect_json: VersionInfo,
                    map: std::convert::identity
                ),
            ])
        }

        DeviceEvent::LogsResponse(result) => handle_response!(model.device_info.logs, result, {
            on_success: |logs, entries| {
                logs.value = entries;
            },
            error_prefix: "Error loading logs",
        }),

        DeviceEvent::VersionResponse(result) => handle_response!(model.device_info.version, result, {
            on_success: |state, version| {
                log::info!(
                    "bridge firmware {} ({})",
                    version.firmware_version,
                    version.chip_family
                );
                state.value = Some(version);
            },
            error_prefix: "Error loading version",
        }),
    }
}
