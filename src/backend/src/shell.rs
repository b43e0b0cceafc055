//! Effect loop driving the control panel core from a terminal
//!
//! The loop owns every outstanding request. HTTP requests and timers run as
//! spawned tasks that only carry plain data; their results come back over a
//! channel and are resolved here, on the loop, against the stored request.

use crux_core::{Core, Request};
use crux_http::protocol::{HttpRequest, HttpResult};
use log::{debug, error, info};
use sfs_bridge_ui_core::{
    App, Effect, Event, TimerId, TimerOperation, TimerOutput, ViewModel,
    view::{DeviceInfoView, SettingsView, StatusView},
};
use std::{
    collections::{HashMap, VecDeque},
    future::Future,
    time::Duration,
};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
};

use crate::http_client::DeviceClient;

enum ShellMessage {
    HttpDone { key: u64, result: HttpResult },
    TimerFired { id: TimerId },
}

struct ArmedTimer {
    request: Request<TimerOperation>,
    task: JoinHandle<()>,
}

pub struct Shell {
    core: Core<App>,
    client: DeviceClient,
    tx: UnboundedSender<ShellMessage>,
    rx: UnboundedReceiver<ShellMessage>,
    http: HashMap<u64, Request<HttpRequest>>,
    next_http_key: u64,
    timers: HashMap<TimerId, ArmedTimer>,
    last_lines: Vec<String>,
    printed_logs: usize,
}

impl Shell {
    pub fn new(client: DeviceClient) -> Self {
        let (tx, rx) = unbounded_channel();

        Self {
            core: Core::new(),
            client,
            tx,
            rx,
            http: HashMap::new(),
            next_http_key: 0,
            timers: HashMap::new(),
            last_lines: Vec::new(),
            printed_logs: 0,
        }
    }

    pub fn dispatch(&mut self, event: Event) {
        debug!("dispatch {event:?}");
        let effects = self.core.process_event(event);
        self.process_effects(effects);
    }

    pub fn view(&self) -> ViewModel {
        self.core.view()
    }

    /// Requests sent to the device that have not been answered yet
    pub fn in_flight(&self) -> usize {
        self.http.len()
    }

    pub fn armed_timers(&self) -> usize {
        self.timers.len()
    }

    /// Resolve effects until `stop` completes
    pub async fn run_until<F: Future>(&mut self, stop: F) -> F::Output {
        tokio::pin!(stop);

        loop {
            tokio::select! {
                output = &mut stop => return output,
                Some(message) = self.rx.recv() => self.handle_message(message),
            }
        }
    }

    fn handle_message(&mut self, message: ShellMessage) {
        match message {
            ShellMessage::HttpDone { key, result } => {
                let Some(mut request) = self.http.remove(&key) else {
                    error!("no pending request for http response {key}");
                    return;
                };
                self.resolve(&mut request, result);
            }
            ShellMessage::TimerFired { id } => {
                // a cancel may have raced the sleep
                let Some(mut armed) = self.timers.remove(&id) else {
                    debug!("{id} fired after it was cancelled");
                    return;
                };
                self.resolve(&mut armed.request, TimerOutput::Fired { id });
            }
        }
    }

    fn resolve<Op>(&mut self, request: &mut Request<Op>, output: Op::Output)
    where
        Op: crux_core::capability::Operation,
    {
        match self.core.resolve(request, output) {
            Ok(effects) => self.process_effects(effects),
            Err(e) => error!("failed to resolve effect: {e}"),
        }
    }

    fn process_effects(&mut self, effects: Vec<Effect>) {
        let mut queue = VecDeque::from(effects);

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Render(_) => self.render(),
                Effect::Http(request) => self.start_http(request),
                Effect::Timer(mut request) => match request.operation.clone() {
                    TimerOperation::Start { id, millis } => self.arm_timer(id, millis, request),
                    TimerOperation::Cancel { id } => {
                        if let Some(mut armed) = self.timers.remove(&id) {
                            armed.task.abort();
                            match self
                                .core
                                .resolve(&mut armed.request, TimerOutput::Cancelled { id })
                            {
                                Ok(more) => queue.extend(more),
                                Err(e) => error!("failed to resolve cancelled {id}: {e}"),
                            }
                        }
                        match self.core.resolve(&mut request, TimerOutput::Cancelled { id }) {
                            Ok(more) => queue.extend(more),
                            Err(e) => error!("failed to resolve cancel of {id}: {e}"),
                        }
                    }
                },
            }
        }
    }

    fn start_http(&mut self, request: Request<HttpRequest>) {
        let key = self.next_http_key;
        self.next_http_key += 1;

        let operation = request.operation.clone();
        self.http.insert(key, request);

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.execute(&operation).await;
            // the loop is gone when the shell shuts down
            let _ = tx.send(ShellMessage::HttpDone { key, result });
        });
    }

    fn arm_timer(&mut self, id: TimerId, millis: u64, request: Request<TimerOperation>) {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            let _ = tx.send(ShellMessage::TimerFired { id });
        });

        if let Some(previous) = self.timers.insert(id, ArmedTimer { request, task }) {
            error!("{id} armed twice");
            previous.task.abort();
        }
    }

    fn render(&mut self) {
        let view = self.core.view();

        let lines = vec![
            settings_line(&view.settings),
            status_line(&view.status),
            device_info_line(&view.device_info),
        ];

        for (index, line) in lines.iter().enumerate() {
            if self.last_lines.get(index) != Some(line) {
                info!("{line}");
            }
        }
        self.last_lines = lines;

        for entry in view.device_info.logs.iter().skip(self.printed_logs) {
            info!("device log [{}] {}", entry.timestamp, entry.message);
        }
        self.printed_logs = self.printed_logs.max(view.device_info.logs.len());
    }
}

pub fn settings_line(view: &SettingsView) -> String {
    if let Some(error) = &view.error_message {
        return format!("settings: {error}");
    }
    if view.is_loading {
        return "settings: loading".to_string();
    }
    if view.is_saving {
        return "settings: saving".to_string();
    }

    let settings = &view.settings;
    let mut line = format!(
        "settings: ssid {:?}, printer {}, runout timeout {} ms, start timeout {} ms, pause on runout {}, enabled {}",
        settings.ssid,
        settings.elegooip,
        settings.sensor_timeout_ms,
        settings.start_print_timeout_ms,
        settings.pause_on_runout,
        settings.enabled,
    );
    if view.show_wifi_fields {
        line.push_str(", access point mode");
    }
    if view.save_success {
        line.push_str(" (saved)");
    }
    line
}

pub fn status_line(view: &StatusView) -> String {
    if !view.is_polling {
        return "status: not polling".to_string();
    }
    if view.is_loading {
        return "status: waiting for first sensor reading".to_string();
    }

    let mut line = match &view.filament {
        None => format!("status: printer disconnected ({})", view.print_status),
        Some(filament) => format!(
            "status: {} | layer {}/{} | {:.0}% | speed {:.0}% | z {:.2} mm | runout {} | stopped {}",
            view.print_status,
            view.current_layer,
            view.total_layer,
            view.progress,
            view.print_speed_pct,
            view.current_z,
            filament.filament_runout,
            filament.stopped,
        ),
    };
    if let Some(error) = &view.error_message {
        line.push_str(&format!(" [stale: {error}]"));
    }
    line
}

pub fn device_info_line(view: &DeviceInfoView) -> String {
    let mut line = match (&view.version_error, &view.version) {
        (Some(error), _) => format!("device: {error}"),
        (None, Some(version)) => format!(
            "device: firmware {} on {}, built {} {}",
            version.firmware_version, version.chip_family, version.build_date, version.build_time
        ),
        (None, None) if view.version_loading => "device: loading".to_string(),
        (None, None) => "device: unknown firmware".to_string(),
    };
    if let Some(error) = &view.logs_error {
        line.push_str(&format!(" [{error}]"));
    }
    line
}
