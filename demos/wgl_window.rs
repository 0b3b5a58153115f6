// glwindow/demos/wgl_window.rs
//
// Opens a window through WGL and clears it every frame until it is closed.

#[cfg(windows)]
#[macro_use]
extern crate log;

#[cfg(windows)]
mod common;

static APP_NAME: &str = "glwindow WGL example";

#[cfg(windows)]
fn main() {
    common::main_with_pump_mode(APP_NAME, glwindow::PumpMode::Poll);
}

#[cfg(not(windows))]
fn main() {
    eprintln!("{} only runs on Windows.", APP_NAME);
}
