// glwindow/src/lib.rs
//
//! Manual creation of OpenGL windows and contexts.
//!
//! This crate walks through the steps that windowing libraries usually hide: loading the
//! "create context with attributes" extension through a throwaway context, negotiating a pixel
//! format or GLX FB config from a zero-terminated attribute list, creating the real window and a
//! core-profile context, and running a trivial clear-and-swap loop. WGL is used on Windows and
//! GLX on X11.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod platform;
pub use platform::default::connection::Connection;
pub use platform::default::context::Context;
pub use platform::default::window::{PixelFormat, Window};

pub mod attributes;
pub use crate::attributes::AttributeList;

pub mod error;
pub use crate::error::{Error, WindowingApiError};

mod context;
pub use crate::context::{ContextAttributes, ContextFlags, GLProfile};

mod event;
pub use crate::event::{Event, PumpMode};

mod framebuffer;
pub use crate::framebuffer::{FramebufferAttributes, FramebufferFlags};

mod info;
pub use crate::info::{GLInfo, GLVersion};

pub mod render_loop;
pub use crate::render_loop::{run_clear_loop, ClearColor, LoopOptions};

mod window;
pub use crate::window::{WindowDescriptor, DEFAULT_WINDOW_SIZE};

#[cfg(linux)]
#[allow(non_camel_case_types, non_snake_case, non_upper_case_globals, dead_code)]
#[allow(clippy::all)]
mod glx_extra {
    include!(concat!(env!("OUT_DIR"), "/glx_extra_bindings.rs"));
}

#[cfg(windows)]
#[allow(non_camel_case_types, non_snake_case, non_upper_case_globals, dead_code)]
#[allow(clippy::all)]
mod wgl_extra {
    include!(concat!(env!("OUT_DIR"), "/wgl_extra_bindings.rs"));
}

#[cfg(test)]
mod tests;
