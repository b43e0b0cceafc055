use anyhow::{Context, Result, ensure};
use reqwest::Url;
use std::{env, sync::OnceLock, time::Duration};

const DEFAULT_DEVICE_URL: &str = "http://ccxsfs20.local";

/// Console shell configuration loaded at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Where the bridge is reachable
    pub device: DeviceConfig,

    /// How long to run and what to fetch
    pub run: RunConfig,
}

#[derive(Clone, Debug)]
pub struct DeviceConfig {
    pub url: Url,
}

#[derive(Clone, Debug, Default)]
pub struct RunConfig {
    /// Run until Ctrl-C when `None`
    pub duration: Option<Duration>,
    pub show_logs: bool,
}

impl AppConfig {
    /// Get or load the application configuration
    ///
    /// The first call reads the environment, later calls return the cached
    /// instance.
    ///
    /// # Panics
    /// Panics if the environment holds an invalid value. The shell cannot
    /// do anything useful without a device address.
    pub fn get() -> &'static Self {
        static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();
        APP_CONFIG.get_or_init(|| {
            Self::load_internal().expect("failed to load application configuration")
        })
    }

    fn load_internal() -> Result<Self> {
        let device = DeviceConfig::load()?;
        let run = RunConfig::load()?;

        Ok(Self { device, run })
    }
}

impl DeviceConfig {
    fn load() -> Result<Self> {
        Self::parse(env::var("DEVICE_URL").ok().as_deref())
    }

    fn parse(url: Option<&str>) -> Result<Self> {
        let url = url.unwrap_or(DEFAULT_DEVICE_URL);
        let url = Url::parse(url).context("failed to parse DEVICE_URL: invalid format")?;

        ensure!(
            matches!(url.scheme(), "http" | "https"),
            "failed to parse DEVICE_URL: unsupported scheme {}",
            url.scheme()
        );

        Ok(Self { url })
    }
}

impl RunConfig {
    fn load() -> Result<Self> {
        Self::parse(
            env::var("RUN_SECS").ok().as_deref(),
            env::var("SHOW_LOGS").ok().as_deref(),
        )
    }

    fn parse(run_secs: Option<&str>, show_logs: Option<&str>) -> Result<Self> {
        let duration = run_secs
            .map(|secs| {
                secs.parse::<u64>()
                    .map(Duration::from_secs)
                    .context("failed to parse RUN_SECS: invalid format")
            })
            .transpose()?;

        let show_logs = show_logs
            .map(|flag| {
                flag.parse::<bool>()
                    .context("failed to parse SHOW_LOGS: expected true or false")
            })
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            duration,
            show_logs,
        })
    }
}
