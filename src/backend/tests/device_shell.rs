use crux_http::protocol::{HttpRequest, HttpResult};
use sfs_bridge_ui::{http_client::DeviceClient, shell::Shell};
use sfs_bridge_ui_core::{
    SettingsEdit,
    events::{Event, SettingsEvent, StatusEvent},
};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const SETTINGS: &str = r#"{"ssid":"workshop","ap_mode":false,"elegooip":"192.168.1.50","timeout":1500,"start_print_timeout":8000,"pause_on_runout":true,"enabled":true}"#;

const SENSOR_STATUS: &str = r#"{"stopped":false,"filamentRunout":false,"elegoo":{"mainboardID":"0c1d","printStatus":13,"isPrinting":true,"currentLayer":12,"totalLayer":240,"progress":5,"currentTicks":600,"totalTicks":12000,"PrintSpeedPct":100,"isWebsocketConnected":true,"currentZ":2.4}}"#;

/// Requests seen by the mock bridge, as `"METHOD /path body"`
type Recorded = Arc<Mutex<Vec<String>>>;

fn route(method: &str, path: &str) -> (&'static str, &'static str) {
    match (method, path) {
        ("GET", "/get_settings") => ("200 OK", SETTINGS),
        ("GET", "/sensor_status") => ("200 OK", SENSOR_STATUS),
        ("POST", "/update_settings") => ("200 OK", "ok"),
        _ => ("404 Not Found", "Not found"),
    }
}

async fn start_mock_bridge(
    listener: TcpListener,
    recorded: Recorded,
    ready_tx: oneshot::Sender<()>,
) -> std::io::Result<()> {
    // Signal that the server is ready
    let _ = ready_tx.send(());

    loop {
        let (mut stream, _) = listener.accept().await?;
        let recorded = recorded.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(&mut stream);

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).await.is_err() {
                return;
            }

            // Read HTTP headers
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).await.is_err() {
                    return;
                }
                if line.trim().is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap_or(0);
                    }
                }
            }

            let mut body = vec![0; content_length];
            if reader.read_exact(&mut body).await.is_err() {
                return;
            }

            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or_default().to_string();
            let path = parts.next().unwrap_or_default().to_string();
            recorded.lock().unwrap().push(format!(
                "{method} {path} {}",
                String::from_utf8_lossy(&body)
            ));

            let (status, response_body) = route(&method, &path);
            let http_response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response_body.len(),
                response_body
            );

            let _ = stream.write_all(http_response.as_bytes()).await;
        });
    }
}

async fn mock_bridge() -> (DeviceClient, Recorded, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock bridge");
    let addr = listener.local_addr().expect("local addr");
    let recorded = Recorded::default();
    let (ready_tx, ready_rx) = oneshot::channel();

    let server_recorded = recorded.clone();
    let server_handle = tokio::spawn(async move {
        let _ = start_mock_bridge(listener, server_recorded, ready_tx).await;
    });
    ready_rx.await.expect("server failed to start");

    let client = DeviceClient::new(format!("http://{addr}").parse().expect("url"))
        .expect("failed to create device client");

    (client, recorded, server_handle)
}

fn get(url: &str) -> HttpRequest {
    HttpRequest {
        method: "GET".to_string(),
        url: url.to_string(),
        headers: vec![],
        body: vec![],
    }
}

#[tokio::test]
async fn test_executor_maps_core_url_onto_device() {
    let (client, recorded, server_handle) = mock_bridge().await;

    let result = client.execute(&get("https://relative/sensor_status")).await;

    let HttpResult::Ok(response) = result else {
        panic!("expected a response, got {result:?}");
    };
    assert_eq!(response.status, 200);
    assert_eq!(response.body, SENSOR_STATUS.as_bytes());
    assert!(response.headers.iter().any(|header| {
        header.name.eq_ignore_ascii_case("content-length")
            && header.value == SENSOR_STATUS.len().to_string()
    }));
    assert!(recorded.lock().unwrap()[0].starts_with("GET /sensor_status"));

    server_handle.abort();
}

#[tokio::test]
async fn test_executor_passes_error_status_through() {
    let (client, _, server_handle) = mock_bridge().await;

    let result = client.execute(&get("https://relative/missing")).await;

    let HttpResult::Ok(response) = result else {
        panic!("expected a response, got {result:?}");
    };
    assert_eq!(response.status, 404);
    assert_eq!(response.body, b"Not found");

    server_handle.abort();
}

#[tokio::test]
async fn test_executor_reports_unreachable_device() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = DeviceClient::new(format!("http://{addr}").parse().expect("url"))
        .expect("failed to create device client");

    let result = client.execute(&get("https://relative/get_settings")).await;

    assert!(matches!(result, HttpResult::Err(crux_http::HttpError::Io(_))));
}

#[tokio::test]
async fn test_shell_loads_polls_and_saves() {
    let (client, recorded, server_handle) = mock_bridge().await;
    let mut shell = Shell::new(client);

    shell.dispatch(Event::Settings(SettingsEvent::Load));
    shell.dispatch(Event::Status(StatusEvent::StartPolling));
    shell.run_until(tokio::time::sleep(Duration::from_millis(500))).await;

    let view = shell.view();
    assert_eq!(view.settings.settings.ssid, "workshop");
    assert_eq!(view.settings.settings.sensor_timeout_ms, 1500);
    assert!(view.status.printer_connected);
    assert_eq!(view.status.print_status, "Printing");
    assert_eq!(view.status.current_z, 2.4);
    // poll timer armed after the first response
    assert_eq!(shell.armed_timers(), 1);

    shell.dispatch(Event::Settings(SettingsEvent::Edit(SettingsEdit::Password(
        "hunter2".to_string(),
    ))));
    shell.dispatch(Event::Settings(SettingsEvent::Save));
    shell.run_until(tokio::time::sleep(Duration::from_millis(500))).await;

    assert!(shell.view().settings.save_success);
    assert_eq!(shell.armed_timers(), 2);

    let saved = recorded
        .lock()
        .unwrap()
        .iter()
        .find(|request| request.starts_with("POST /update_settings"))
        .cloned()
        .expect("update_settings request");
    let body: serde_json::Value =
        serde_json::from_str(saved.trim_start_matches("POST /update_settings ")).expect("json");
    assert_eq!(body["passwd"], "hunter2");
    assert_eq!(body["ap_mode"], false);
    assert_eq!(body["timeout"], 1500);

    shell.dispatch(Event::Status(StatusEvent::StopPolling));
    shell.dispatch(Event::Settings(SettingsEvent::Close));

    assert_eq!(shell.armed_timers(), 0);
    assert!(!shell.view().status.is_polling);

    server_handle.abort();
}
