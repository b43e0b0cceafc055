mod device_info;
mod settings;
mod status;
mod ui;

pub use settings::SAVE_SUCCESS_DISMISS_MS;
pub use status::POLL_INTERVAL_MS;

use crux_core::Command;

use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Settings(event) => settings::handle(event, model),
        Event::Status(event) => status::handle(event, model),
        Event::Device(event) => device_info::handle(event, model),
        Event::Ui(event) => ui::handle(event, model),
    }
}
