use serde::{Deserialize, Serialize};
use serde_valid::Validate;

pub const DEFAULT_SENSOR_TIMEOUT_MS: u32 = 2000;
pub const DEFAULT_START_PRINT_TIMEOUT_MS: u32 = 10000;

pub const SENSOR_TIMEOUT_RANGE_MS: (u32, u32) = (100, 30000);
pub const START_PRINT_TIMEOUT_RANGE_MS: (u32, u32) = (1000, 60000);

/// Wi-Fi mode of the bridge as last reported by the device
///
/// `Unknown` until a load delivers `ap_mode`. The client may force
/// `AccessPoint` locally to open the network edit fields, it never moves
/// back to `Station` on its own.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApMode {
    #[default]
    Unknown,
    AccessPoint,
    Station,
}

impl ApMode {
    pub fn is_access_point(self) -> bool {
        self == Self::AccessPoint
    }
}

impl From<Option<bool>> for ApMode {
    fn from(ap_mode: Option<bool>) -> Self {
        match ap_mode {
            Some(true) => Self::AccessPoint,
            Some(false) => Self::Station,
            None => Self::Unknown,
        }
    }
}

/// Device configuration as known to the client
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSettings {
    pub ssid: String,
    /// Write-only, never filled from a load
    pub password: String,
    pub elegooip: String,
    pub sensor_timeout_ms: u32,
    pub start_print_timeout_ms: u32,
    pub pause_on_runout: bool,
    pub enabled: bool,
    pub ap_mode: ApMode,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
            elegooip: String::new(),
            sensor_timeout_ms: DEFAULT_SENSOR_TIMEOUT_MS,
            start_print_timeout_ms: DEFAULT_START_PRINT_TIMEOUT_MS,
            pause_on_runout: true,
            enabled: true,
            ap_mode: ApMode::Unknown,
        }
    }
}

impl std::fmt::Debug for DeviceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceSettings")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .field("elegooip", &self.elegooip)
            .field("sensor_timeout_ms", &self.sensor_timeout_ms)
            .field("start_print_timeout_ms", &self.start_print_timeout_ms)
            .field("pause_on_runout", &self.pause_on_runout)
            .field("enabled", &self.enabled)
            .field("ap_mode", &self.ap_mode)
            .finish()
    }
}

/// Single field change coming from the settings form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SettingsEdit {
    Ssid(String),
    Password(String),
    ElegooIp(String),
    SensorTimeoutMs(u32),
    StartPrintTimeoutMs(u32),
    PauseOnRunout(bool),
    Enabled(bool),
}

impl DeviceSettings {
    pub fn apply(&mut self, edit: SettingsEdit) {
        match edit {
            SettingsEdit::Ssid(ssid) => self.ssid = ssid,
            SettingsEdit::Password(password) => self.password = password,
            SettingsEdit::ElegooIp(ip) => self.elegooip = ip,
            SettingsEdit::SensorTimeoutMs(ms) => self.sensor_timeout_ms = ms,
            SettingsEdit::StartPrintTimeoutMs(ms) => self.start_print_timeout_ms = ms,
            SettingsEdit::PauseOnRunout(pause) => self.pause_on_runout = pause,
            SettingsEdit::Enabled(enabled) => self.enabled = enabled,
        }
    }
}

/// `GET /get_settings` payload
///
/// Every field is optional so that older firmware which omits
/// `start_print_timeout` or `enabled` still loads.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SettingsResponse {
    pub ssid: Option<String>,
    pub ap_mode: Option<bool>,
    pub elegooip: Option<String>,
    pub timeout: Option<u32>,
    pub start_print_timeout: Option<u32>,
    pub pause_on_runout: Option<bool>,
    pub enabled: Option<bool>,
}

impl From<SettingsResponse> for DeviceSettings {
    fn from(response: SettingsResponse) -> Self {
        // a stored zero is as good as missing, both fall back to the default
        let non_zero = |value: Option<u32>| value.filter(|v| *v != 0);

        Self {
            ssid: response.ssid.unwrap_or_default(),
            password: String::new(),
            elegooip: response.elegooip.unwrap_or_default(),
            sensor_timeout_ms: non_zero(response.timeout).unwrap_or(DEFAULT_SENSOR_TIMEOUT_MS),
            start_print_timeout_ms: non_zero(response.start_print_timeout)
                .unwrap_or(DEFAULT_START_PRINT_TIMEOUT_MS),
            pause_on_runout: response.pause_on_runout.unwrap_or(true),
            enabled: response.enabled.unwrap_or(true),
            ap_mode: response.ap_mode.into(),
        }
    }
}

/// `POST /update_settings` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct UpdateSettingsRequest {
    pub ssid: String,
    pub passwd: String,
    pub ap_mode: bool,
    pub elegooip: String,
    #[validate(minimum = 100)]
    #[validate(maximum = 30000)]
    pub timeout: u32,
    pub pause_on_runout: bool,
    #[validate(minimum = 1000)]
    #[validate(maximum = 60000)]
    pub start_print_timeout: u32,
    pub enabled: bool,
}

impl From<&DeviceSettings> for UpdateSettingsRequest {
    fn from(settings: &DeviceSettings) -> Self {
        Self {
            ssid: settings.ssid.clone(),
            passwd: settings.password.clone(),
            // saving always commits a station configuration
            ap_mode: false,
            elegooip: settings.elegooip.clone(),
            timeout: settings.sensor_timeout_ms,
            pause_on_runout: settings.pause_on_runout,
            start_print_timeout: settings.start_print_timeout_ms,
            enabled: settings.enabled,
        }
    }
}
