use anyhow::Result;
use crux_core::typegen::TypeGen;
use sfs_bridge_ui_core::{
    events::{DeviceEvent, SettingsEvent, StatusEvent, UiEvent},
    types::{ApMode, PrintStatus, SettingsEdit},
    App, TimerOperation, TimerOutput,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Explicitly register domain event enums to ensure all variants are traced
    gen.register_type::<SettingsEvent>()?;
    gen.register_type::<StatusEvent>()?;
    gen.register_type::<DeviceEvent>()?;
    gen.register_type::<UiEvent>()?;

    gen.register_type::<ApMode>()?;
    gen.register_type::<SettingsEdit>()?;
    gen.register_type::<PrintStatus>()?;
    gen.register_type::<TimerOperation>()?;
    gen.register_type::<TimerOutput>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
