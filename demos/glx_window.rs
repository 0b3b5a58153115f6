// glwindow/demos/glx_window.rs
//
// Opens a window through GLX and clears it each time an X event arrives, until it is closed.

#[cfg(all(unix, not(any(target_os = "macos", target_os = "android"))))]
#[macro_use]
extern crate log;

#[cfg(all(unix, not(any(target_os = "macos", target_os = "android"))))]
mod common;

static APP_NAME: &str = "glwindow GLX example";

#[cfg(all(unix, not(any(target_os = "macos", target_os = "android"))))]
fn main() {
    common::main_with_pump_mode(APP_NAME, glwindow::PumpMode::Wait);
}

#[cfg(not(all(unix, not(any(target_os = "macos", target_os = "android")))))]
fn main() {
    eprintln!("{} only runs on X11.", APP_NAME);
}
