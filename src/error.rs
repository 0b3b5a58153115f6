// glwindow/src/error.rs
//
//! Various errors that methods can produce.

use std::error;
use std::fmt::{self, Display, Formatter};

/// Various errors that methods can produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// The method failed for a miscellaneous reason.
    Failed,
    /// A connection to the display server could not be opened.
    ConnectionFailed,
    /// The system OpenGL library (or the windowing library) couldn't be located.
    NoGLLibraryFound,
    /// An extension necessary for this library to function isn't supported.
    RequiredExtensionUnavailable,
    /// Choosing an OpenGL pixel format failed.
    PixelFormatSelectionFailed(WindowingApiError),
    /// The system couldn't choose an OpenGL pixel format.
    NoPixelFormatFound,
    /// The native window couldn't be created.
    WindowCreationFailed,
    /// The system couldn't create an OpenGL context.
    ContextCreationFailed(WindowingApiError),
    /// The system couldn't make the OpenGL context current or not current.
    MakeCurrentFailed(WindowingApiError),
    /// Presenting the back buffer failed.
    PresentFailed(WindowingApiError),
    /// The window has already been closed.
    WindowClosed,
    /// GL functions were requested from a context that has never been made current.
    NoCurrentContext,
}

/// Abstraction of the errors that WGL, GLX and Xlib return.
///
/// They all tend to follow similar patterns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowingApiError {
    /// Miscellaneous error.
    Failed,
    /// X11: Attribute to get is bad.
    /// WGL: An unrecognized attribute was passed in the attribute list.
    BadAttribute,
    /// X11: Invalid framebuffer configuration, including an unsupported OpenGL version.
    /// WGL: The pixel format is invalid.
    BadPixelFormat,
    /// The context is invalid.
    BadContext,
    /// X11: Invalid value.
    BadValue,
    /// X11: Arguments are inconsistent, for example a visual that doesn't match the drawable.
    BadMatch,
    /// X11: Screen number is bad.
    BadScreen,
    /// X11: The GLX extension is unavailable on the server.
    NoExtension,
    /// X11: Visual number not known by GLX.
    BadVisual,
    /// X11: Invalid enum value.
    BadEnumeration,
    /// The server or driver couldn't allocate the requested resources.
    BadAlloc,
    /// Invalid window.
    BadWindow,
    /// WGL: The requested version or profile is not supported by the driver.
    BadVersion,
}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match *self {
            Error::Failed => formatter.write_str("the operation failed"),
            Error::ConnectionFailed => {
                formatter.write_str("couldn't connect to the display server")
            }
            Error::NoGLLibraryFound => formatter.write_str("no OpenGL library could be loaded"),
            Error::RequiredExtensionUnavailable => {
                formatter.write_str("a required windowing extension is unavailable")
            }
            Error::PixelFormatSelectionFailed(err) => {
                write!(formatter, "failed to set the pixel format ({:?})", err)
            }
            Error::NoPixelFormatFound => formatter.write_str("no matching pixel format was found"),
            Error::WindowCreationFailed => formatter.write_str("failed to create the window"),
            Error::ContextCreationFailed(err) => {
                write!(formatter, "failed to create the OpenGL context ({:?})", err)
            }
            Error::MakeCurrentFailed(err) => {
                write!(formatter, "failed to make the context current ({:?})", err)
            }
            Error::PresentFailed(err) => write!(formatter, "failed to swap buffers ({:?})", err),
            Error::WindowClosed => formatter.write_str("the window is closed"),
            Error::NoCurrentContext => {
                formatter.write_str("the context has never been made current")
            }
        }
    }
}

impl error::Error for Error {}
