// glwindow/src/platform/windows/wgl/mod.rs
//
//! A backend using the native Windows OpenGL WGL API.

pub mod connection;
pub mod context;
pub mod window;
