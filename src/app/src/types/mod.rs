//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - settings: device configuration and its wire formats
//! - status: live sensor and printer telemetry, print status decoding
//! - device_info: device log and firmware version
//! - common: timer ids and other shared types

pub mod common;
pub mod device_info;
pub mod settings;
pub mod status;

pub use common::*;
pub use device_info::*;
pub use settings::*;
pub use status::*;
