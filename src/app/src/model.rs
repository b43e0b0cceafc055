use crate::types::*;

/// Pieces of state that run a request and show its outcome
///
/// This allows the response macros to work on any sub-state without
/// depending on its concrete type.
pub trait LoadingState {
    fn start_loading(&mut self);
    fn stop_loading(&mut self);
    fn set_error(&mut self, error: String);
}

/// SettingsSync state
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SettingsState {
    pub settings: DeviceSettings,
    pub is_loading: bool,
    pub is_loaded: bool,
    pub is_saving: bool,
    pub is_dirty: bool,
    pub save_success: bool,
    pub error_message: Option<String>,
    /// Pending auto-dismiss of the save success banner
    pub dismiss_timer: Option<TimerId>,
}

impl LoadingState for SettingsState {
    fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    fn stop_loading(&mut self) {
        self.is_loading = false;
    }

    fn set_error(&mut self, error: String) {
        self.is_loading = false;
        self.error_message = Some(error);
    }
}

/// StatusPoller state
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StatusState {
    pub sensor_status: SensorStatus,
    pub is_loading: bool,
    pub is_active: bool,
    /// Last poll failure, cleared by the next successful poll
    pub last_error: Option<String>,
    pub poll_timer: Option<TimerId>,
    /// Bumped on every activation and deactivation
    pub generation: u64,
    pub next_seq: u64,
    pub applied_seq: u64,
}

impl StatusState {
    /// Hand out the sequence number for the next fetch
    pub fn next_request(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Whether a response belongs to the current activation and is newer than
    /// anything already shown
    pub fn accepts(&self, generation: u64, seq: u64) -> bool {
        self.is_active && generation == self.generation && seq > self.applied_seq
    }
}

/// One device request whose outcome is shown on its own
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    pub value: T,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl<T> LoadingState for FetchState<T> {
    fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    fn stop_loading(&mut self) {
        self.is_loading = false;
    }

    fn set_error(&mut self, error: String) {
        self.is_loading = false;
        self.error_message = Some(error);
    }
}

/// Device log and firmware version, fetched independently
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeviceInfoState {
    pub logs: FetchState<Vec<LogEntry>>,
    pub version: FetchState<Option<VersionInfo>>,
}

impl DeviceInfoState {
    pub fn is_loading(&self) -> bool {
        self.logs.is_loading || self.version.is_loading
    }
}

/// Application Model - the complete state
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Model {
    pub settings: SettingsState,
    pub status: StatusState,
    pub device_info: DeviceInfoState,
    next_timer_id: u64,
}

impl Model {
    /// Allocate a fresh, never reused timer id
    pub fn next_timer_id(&mut self) -> TimerId {
        self.next_timer_id += 1;
        TimerId(self.next_timer_id)
    }
}
