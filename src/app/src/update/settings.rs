use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::commands::timer::TimerOutput;
use crate::device_get;
use crate::device_post;
use crate::events::{Event, SettingsEvent};
use crate::handle_response;
use crate::model::{LoadingState, Model};
use crate::types::{ApMode, DeviceSettings, SettingsResponse, UpdateSettingsRequest};
use crate::update_field;
use crate::{Effect, TimerCmd};

/// How long the "Settings saved" banner stays up
pub const SAVE_SUCCESS_DISMISS_MS: u64 = 3000;

/// Handle settings load, edit and save events
pub fn handle(event: SettingsEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        SettingsEvent::Load => {
            if model.settings.is_loading {
                return Command::done();
            }
            model.settings.start_loading();
            Command::all([
                render(),
                device_get!(Settings, SettingsEvent, "/get_settings", LoadResponse, "Load settings",
                    expect_json: SettingsResponse,
                    map: DeviceSettings::from
                ),
            ])
        }

        SettingsEvent::LoadResponse(result) => {
            if let Err(e) = &result {
                log::error!("failed to load settings: {e}");
            }
            handle_response!(model.settings, result, {
                on_success: |state, loaded| {
                    log::debug!("loaded settings: {loaded:?}");
                    state.settings = loaded;
                    state.is_loaded = true;
                    state.is_dirty = false;
                    state.error_message = None;
                },
                error_prefix: "Error loading settings",
            })
        }

        // the form is not interactive until the load has finished
        SettingsEvent::Edit(_) | SettingsEvent::ChangeWifiNetwork | SettingsEvent::Save
            if model.settings.is_loading =>
        {
            Command::done()
        }

        SettingsEvent::Edit(edit) => {
            model.settings.settings.apply(edit);
            model.settings.is_dirty = true;
            render()
        }

        SettingsEvent::ChangeWifiNetwork => {
            update_field!(model.settings.settings.ap_mode, ApMode::AccessPoint)
        }

        SettingsEvent::Save => handle_save(model),

        SettingsEvent::SaveResponse(result) => handle_save_response(result, model),

        SettingsEvent::DismissTimer(output) => handle_dismiss_timer(output, model),

        SettingsEvent::Close => {
            let cancel = cancel_dismiss_timer(model);
            model.settings.save_success = false;
            cancel
        }
    }
}

fn handle_save(model: &mut Model) -> Command<Effect, Event> {
    if model.settings.is_saving {
        return Command::done();
    }

    // a new save supersedes the banner of the previous one
    let cancel = cancel_dismiss_timer(model);
    model.settings.save_success = false;
    model.settings.error_message = None;

    let request = UpdateSettingsRequest::from(&model.settings.settings);

    if let Err(e) = request.validate() {
        save_failed(model, format!("invalid settings: {e}"));
        return Command::all([cancel, render()]);
    }

    match device_post!(Settings, SettingsEvent, "/update_settings", SaveResponse, "Save settings",
        body_json: &request
    ) {
        Ok(post) => {
            model.settings.is_saving = true;
            Command::all([cancel, render(), post])
        }
        Err(e) => {
            save_failed(model, e);
            Command::all([cancel, render()])
        }
    }
}

fn handle_save_response(result: Result<(), String>, model: &mut Model) -> Command<Effect, Event> {
    model.settings.is_saving = false;

    match result {
        Ok(()) => {
            log::info!("settings saved");
            let cancel = cancel_dismiss_timer(model);
            let id = model.next_timer_id();

            model.settings.save_success = true;
            model.settings.error_message = None;
            model.settings.is_dirty = false;
            model.settings.dismiss_timer = Some(id);

            Command::all([
                cancel,
                render(),
                TimerCmd::start(id, SAVE_SUCCESS_DISMISS_MS)
                    .build()
                    .then_send(|output| Event::Settings(SettingsEvent::DismissTimer(output))),
            ])
        }
        Err(e) => {
            log::error!("failed to save settings: {e}");
            save_failed(model, e);
            render()
        }
    }
}

/// Record a save failure without touching a load that may be in flight
fn save_failed(model: &mut Model, error: String) {
    model.settings.save_success = false;
    model.settings.error_message = Some(format!("Error saving settings: {error}"));
}

fn handle_dismiss_timer(output: TimerOutput, model: &mut Model) -> Command<Effect, Event> {
    match output {
        TimerOutput::Fired { id } if model.settings.dismiss_timer == Some(id) => {
            model.settings.dismiss_timer = None;
            update_field!(model.settings.save_success, false)
        }
        // cancelled, or superseded by a newer save
        _ => Command::done(),
    }
}

fn cancel_dismiss_timer(model: &mut Model) -> Command<Effect, Event> {
    match model.settings.dismiss_timer.take() {
        Some(id) => TimerCmd::cancel(id)
            .build()
            .then_send(|output| Event::Settings(SettingsEvent::DismissTimer(output))),
        None => Command::done(),
    }
}
