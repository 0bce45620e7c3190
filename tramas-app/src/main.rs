#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod app_dir;
mod app_state;
mod assets;
mod fetch_bridge;
mod preferences;
mod ui;

fn main() -> eframe::Result {
    app::run()
}
