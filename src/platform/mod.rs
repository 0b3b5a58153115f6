// glwindow/src/platform/mod.rs
//
//! Platform-specific backends.
//!
//! Every backend exposes the same `connection`, `context` and `window` modules, and the one
//! matching the build target is re-exported as `default`.

#[cfg(linux)]
pub mod unix;
#[cfg(linux)]
pub use unix::x11 as default;

#[cfg(windows)]
pub mod windows;
#[cfg(windows)]
pub use windows::wgl as default;

#[cfg(not(any(linux, windows)))]
compile_error!("glwindow only supports Windows (WGL) and X11 (GLX) targets");
