use crux_core::Command;

use crate::events::{Event, UiEvent};
use crate::model::Model;
use crate::update_field;
use crate::Effect;

/// Handle UI-related events (clear messages, etc.)
pub fn handle(event: UiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UiEvent::ClearSettingsError => update_field!(model.settings.error_message, None),
        UiEvent::ClearDeviceInfoError => update_field!(
            model.device_info.logs.error_message, None;
            model.device_info.version.error_message, None
        ),
    }
}
