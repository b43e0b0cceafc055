use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::{debug, error, info};
use sfs_bridge_ui::{config::AppConfig, http_client::DeviceClient, shell::Shell};
use sfs_bridge_ui_core::events::{DeviceEvent, Event, SettingsEvent, StatusEvent};
use std::{io::Write, time::Duration};

enum ShutdownReason {
    Interrupted,
    Elapsed,
}

impl std::fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownReason::Interrupted => write!(f, "interrupted"),
            ShutdownReason::Elapsed => write!(f, "run time elapsed"),
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    initialize();

    let config = AppConfig::get();
    info!("bridge at {}", config.device.url);

    let client =
        DeviceClient::new(config.device.url.clone()).context("failed to create device client")?;
    let mut shell = Shell::new(client);

    shell.dispatch(Event::Device(DeviceEvent::LoadVersion));
    shell.dispatch(Event::Settings(SettingsEvent::Load));
    if config.run.show_logs {
        shell.dispatch(Event::Device(DeviceEvent::LoadLogs));
    }
    shell.dispatch(Event::Status(StatusEvent::StartPolling));

    let reason = shell.run_until(wait_for_shutdown(config.run.duration)).await?;
    info!("{reason}, stopping");

    shell.dispatch(Event::Status(StatusEvent::StopPolling));
    shell.dispatch(Event::Settings(SettingsEvent::Close));
    debug!(
        "{} requests still in flight, {} timers armed",
        shell.in_flight(),
        shell.armed_timers()
    );

    Ok(())
}

fn initialize() {
    log_panics::init();

    let mut builder = if cfg!(debug_assertions) {
        Builder::from_env(Env::default().default_filter_or("debug"))
    } else {
        Builder::from_env(Env::default().default_filter_or("info"))
    };

    builder.format(|f, record| match record.level() {
        log::Level::Error => {
            eprintln!("{}", record.args());
            Ok(())
        }
        _ => {
            writeln!(f, "{}", record.args())
        }
    });

    builder.target(Target::Stdout).init();

    info!("sfs-bridge-ui version: {}", env!("CARGO_PKG_VERSION"));
}

async fn wait_for_shutdown(duration: Option<Duration>) -> Result<ShutdownReason> {
    let Some(duration) = duration else {
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for ctrl-c")?;
        return Ok(ShutdownReason::Interrupted);
    };

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res.context("failed to listen for ctrl-c")?;
            Ok(ShutdownReason::Interrupted)
        }
        _ = tokio::time::sleep(duration) => Ok(ShutdownReason::Elapsed),
    }
}
