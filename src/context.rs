// glwindow/src/context.rs
//
//! Declarations common to all platform contexts.

use crate::info::GLVersion;

bitflags! {
    /// Optional context creation flags understood by both `WGL_ARB_create_context` and
    /// `GLX_ARB_create_context`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ContextFlags: u8 {
        /// Request a debug context.
        const DEBUG              = 0x01;
        /// Request a forward-compatible context, which drops deprecated functionality.
        const FORWARD_COMPATIBLE = 0x02;
    }
}

/// Which OpenGL profile a context should expose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GLProfile {
    /// The core profile.
    #[default]
    Core,
    /// The compatibility profile, which keeps deprecated functionality around.
    Compatibility,
}

/// Everything requested of the context itself, as opposed to its framebuffer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContextAttributes {
    /// The requested version. `0.0` leaves the choice to the driver.
    pub version: GLVersion,
    pub profile: GLProfile,
    pub flags: ContextFlags,
}

impl ContextAttributes {
    /// Requests a core profile context of the given version.
    #[inline]
    pub fn core(version: GLVersion) -> ContextAttributes {
        ContextAttributes { version, ..ContextAttributes::default() }
    }
}
