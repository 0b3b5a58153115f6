// glwindow/src/platform/unix/x11/mod.rs
//
//! Bindings to GLX via Xlib.

pub mod connection;
pub mod context;
pub mod window;

mod error;
