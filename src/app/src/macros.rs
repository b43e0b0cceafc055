/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.settings.error_message, None)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.settings.save_success, false;
///     model.settings.error_message, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

/// Macro for device GET requests expecting a JSON response.
/// Does not touch any loading state; callers decide what to render.
///
/// NOTE: URLs are prefixed with `https://relative`.
/// `crux_http` requires absolute URLs and rejects relative paths.
///
/// # Patterns
///
/// Pattern 1: wrap the result into a domain response event
/// ```ignore
/// device_get!(Settings, SettingsEvent, "/get_settings", LoadResponse, "Load settings",
///     expect_json: SettingsResponse,
///     map: DeviceSettings::from
/// )
/// ```
///
/// Pattern 2: build the event yourself (e.g. to tag it with a sequence number)
/// ```ignore
/// device_get!("/sensor_status", "Poll sensor status", expect_json: SensorStatus,
///     |result| Event::Status(StatusEvent::SensorStatusResponse { generation, seq, result })
/// )
/// ```
#[macro_export]
macro_rules! device_get {
    // Pattern 1: domain response event with mapping
    ($domain:ident, $domain_event:ident, $endpoint:expr, $response_event:ident, $action:expr, expect_json: $response_type:ty, map: $mapper:expr) => {
        $crate::HttpCmd::get($crate::build_url($endpoint))
            .build()
            .then_send(move |result| {
                let event_result = $crate::process_json_response::<$response_type>($action, result)
                    .map($mapper);
                $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                    event_result,
                ))
            })
    };

    // Pattern 2: custom event constructor
    ($endpoint:expr, $action:expr, expect_json: $response_type:ty, |$result:ident| $event:expr) => {
        $crate::HttpCmd::get($crate::build_url($endpoint))
            .build()
            .then_send(move |response| {
                let $result: Result<$response_type, String> =
                    $crate::process_json_response($action, response);
                $event
            })
    };
}

/// Macro for device POST requests with a JSON body expecting status only.
///
/// Evaluates to `Result<RequestBuilder, String>` so the caller can record a
/// serialization failure on the right piece of state.
///
/// # Example
/// ```ignore
/// device_post!(Settings, SettingsEvent, "/update_settings", SaveResponse, "Save settings",
///     body_json: &request
/// )
/// ```
#[macro_export]
macro_rules! device_post {
    ($domain:ident, $domain_event:ident, $endpoint:expr, $response_event:ident, $action:expr, body_json: $body:expr) => {
        $crate::HttpCmd::post($crate::build_url($endpoint))
            .header("Content-Type", "application/json")
            .body_json($body)
            .map(|builder| {
                builder.build().then_send(|result| {
                    let event_result = $crate::process_status_response($action, result);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                })
            })
            .map_err(|e| format!("Failed to create {} request: {}", $action, e))
    };
}

/// Macro for handling response events with standard loading state and error handling.
///
/// `$state` is any piece of state implementing
/// [`LoadingState`](crate::model::LoadingState).
///
/// # Patterns
///
/// Pattern 1: Custom success handling
/// ```ignore
/// handle_response!(model.logs, result, {
///     on_success: |logs, entries| {
///         logs.entries = entries;
///     },
/// })
/// ```
///
/// Pattern 2: Custom success handler + error prefix
/// ```ignore
/// handle_response!(model.settings, result, {
///     on_success: |settings, loaded| {
///         settings.settings = loaded;
///     },
///     error_prefix: "Error loading settings",
/// })
/// ```
#[macro_export]
macro_rules! handle_response {
    // Pattern 1: Only custom success handler
    ($state:expr, $result:expr, {
        on_success: |$success_state:ident, $value:tt| $success_body:block $(,)?
    }) => {{
        $crate::model::LoadingState::stop_loading(&mut $state);
        match $result {
            Ok($value) => {
                #[allow(clippy::redundant_locals)]
                let $success_state = &mut $state;
                $success_body
            }
            Err(e) => {
                $crate::model::LoadingState::set_error(&mut $state, e);
            }
        }
        crux_core::render::render()
    }};

    // Pattern 2: Custom success handler + error prefix
    ($state:expr, $result:expr, {
        on_success: |$success_state:ident, $value:tt| $success_body:block,
        error_prefix: $prefix:expr $(,)?
    }) => {{
        $crate::model::LoadingState::stop_loading(&mut $state);
        match $result {
            Ok($value) => {
                #[allow(clippy::redundant_locals)]
                let $success_state = &mut $state;
                $success_body
            }
            Err(e) => {
                $crate::model::LoadingState::set_error(&mut $state, format!("{}: {e}", $prefix));
            }
        }
        crux_core::render::render()
    }};
}
