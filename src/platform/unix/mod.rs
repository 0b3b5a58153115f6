// glwindow/src/platform/unix/mod.rs
//
//! Backends specific to Unix-like systems, particularly Linux.

pub mod x11;
