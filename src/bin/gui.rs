// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use clap::Parser;
use crypto_track::{cli::ViewArgs, gui, log};
use eframe::egui::{IconData, ViewportBuilder};

fn app_icon() -> Option<IconData> {
    let rgba = image::load_from_memory(include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/crypto_view.png"
    )))
    .ok()?
    .to_rgba8();
    let (w, h) = rgba.dimensions();
    Some(IconData { rgba: rgba.into_raw(), width: w, height: h })
}

fn main() {
    let args = ViewArgs::parse();
    if let Err(e) = log::init(Some(&args.log_file)) {
        eprintln!("Logging disabled: {}", e);
    }

    let mut viewport = ViewportBuilder::default()
        .with_title("Crypto CSV Viewer")
        .with_inner_size([1100.0, 700.0])
        .with_drag_and_drop(true);
    if let Some(icon) = app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions { viewport, ..Default::default() };

    if let Err(e) = gui::run(options, args.viewer_options()) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
