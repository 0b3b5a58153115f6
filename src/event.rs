// glwindow/src/event.rs
//
//! The handful of window events the backends report.

use euclid::default::Size2D;

/// Whether pumping events should block until one arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PumpMode {
    /// Drain whatever is queued and return immediately.
    #[default]
    Poll,
    /// Block until at least one event has been processed.
    Wait,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Part of the window needs repainting.
    Expose,
    /// A key was pressed. The code is the platform's raw key code (virtual-key code on
    /// Windows, X keycode on X11).
    KeyPress(u32),
    /// The window's client area changed size.
    Resized(Size2D<i32>),
    /// The user or the window manager asked for the window to close.
    CloseRequested,
    /// The window is gone. No further events follow.
    Destroyed,
}
