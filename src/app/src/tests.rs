use super::*;
use crate::events::{SettingsEvent, StatusEvent, UiEvent};
use crate::testing::{drain, ok_response, respond, status_response};
use crux_core::App as _;

const SETTINGS: &str = r#"{"ssid":"workshop","ap_mode":false,"elegooip":"192.168.1.50","timeout":1500,"start_print_timeout":8000,"pause_on_runout":false,"enabled":true}"#;

const DISCONNECTED: &str = r#"{"stopped":true,"filamentRunout":true,"elegoo":{"mainboardID":"","printStatus":0,"isWebsocketConnected":false}}"#;

#[test]
fn test_settings_round_trip_through_app() {
    let app = App;
    let mut model = Model::default();

    let mut cmd = app.update(Event::Settings(SettingsEvent::Load), &mut model);
    assert!(!app.view(&model).settings.is_interactive);

    let mut effects = drain(&mut cmd);
    let event = respond(&mut cmd, &mut effects.http[0], ok_response(SETTINGS));
    let _ = app.update(event, &mut model);

    let view = app.view(&model);
    assert!(view.settings.is_interactive);
    assert_eq!(view.settings.settings.ssid, "workshop");
    assert_eq!(view.settings.settings.ap_mode, ApMode::Station);
    assert!(!view.settings.show_wifi_fields);

    let _ = app.update(
        Event::Settings(SettingsEvent::Edit(SettingsEdit::SensorTimeoutMs(2500))),
        &mut model,
    );
    let mut cmd = app.update(Event::Settings(SettingsEvent::Save), &mut model);
    let mut effects = drain(&mut cmd);
    assert_eq!(effects.http[0].operation.method, "POST");

    let event = respond(&mut cmd, &mut effects.http[0], ok_response("ok"));
    let _ = app.update(event, &mut model);

    assert!(app.view(&model).settings.save_success);
}

#[test]
fn test_disconnected_printer_view() {
    let app = App;
    let mut model = Model::default();

    let mut cmd = app.update(Event::Status(StatusEvent::StartPolling), &mut model);
    assert!(app.view(&model).status.is_loading);

    let mut effects = drain(&mut cmd);
    let event = respond(&mut cmd, &mut effects.http[0], ok_response(DISCONNECTED));
    let _ = app.update(event, &mut model);

    let view = app.view(&model).status;
    assert!(!view.is_loading);
    assert!(!view.printer_connected);
    assert_eq!(view.filament, None);
    assert_eq!(view.print_status, "Idle");
}

#[test]
fn test_clear_settings_error() {
    let app = App;
    let mut model = Model::default();

    let mut cmd = app.update(Event::Settings(SettingsEvent::Load), &mut model);
    let mut effects = drain(&mut cmd);
    let event = respond(&mut cmd, &mut effects.http[0], status_response(500));
    let _ = app.update(event, &mut model);
    assert!(app.view(&model).settings.error_message.is_some());

    let mut cmd = app.update(Event::Ui(UiEvent::ClearSettingsError), &mut model);

    assert_eq!(app.view(&model).settings.error_message, None);
    assert_eq!(drain(&mut cmd).renders, 1);
}

#[test]
fn test_clearing_absent_error_does_not_render() {
    let app = App;
    let mut model = Model::default();

    let mut cmd = app.update(Event::Ui(UiEvent::ClearDeviceInfoError), &mut model);

    assert_eq!(drain(&mut cmd).renders, 0);
}

#[test]
fn test_view_model_serializes_for_shells() {
    let model = Model::default();

    let json = serde_json::to_value(App.view(&model)).expect("serialize view");

    assert_eq!(json["settings"]["settings"]["sensorTimeoutMs"], 2000);
    assert_eq!(json["status"]["filament"], serde_json::Value::Null);
}
