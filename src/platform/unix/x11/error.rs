// glwindow/src/platform/unix/x11/error.rs
//
//! Translation of X11 and GLX errors to `glwindow` errors.

use crate::WindowingApiError;

use std::cell::Cell;
use std::os::raw::{c_char, c_int};
use x11_dl::xlib::{Display, XErrorEvent, Xlib};

const GLX_BAD_SCREEN:    c_int = 1;
const GLX_BAD_ATTRIBUTE: c_int = 2;
const GLX_NO_EXTENSION:  c_int = 3;
const GLX_BAD_VISUAL:    c_int = 4;
const GLX_BAD_CONTEXT:   c_int = 5;
const GLX_BAD_VALUE:     c_int = 6;
const GLX_BAD_ENUM:      c_int = 7;

const X_BAD_VALUE:  u8 = 2;
const X_BAD_WINDOW: u8 = 3;
const X_BAD_MATCH:  u8 = 8;
const X_BAD_ALLOC:  u8 = 11;

thread_local! {
    static LAST_X_ERROR_CODE: Cell<u8> = const { Cell::new(0) };
}

/// Installed around calls that report failure only through the X error queue.
pub(crate) unsafe extern "C" fn xlib_error_handler(_: *mut Display, event: *mut XErrorEvent)
                                                   -> c_int {
    LAST_X_ERROR_CODE.with(|error_code| error_code.set((*event).error_code));
    0
}

pub(crate) fn reset_last_x_error() {
    LAST_X_ERROR_CODE.with(|error_code| error_code.set(0));
}

pub(crate) fn last_x_error() -> u8 {
    LAST_X_ERROR_CODE.with(|error_code| error_code.get())
}

pub(crate) fn glx_error_to_windowing_api_error(glx_error: c_int) -> WindowingApiError {
    match glx_error {
        GLX_BAD_SCREEN => WindowingApiError::BadScreen,
        GLX_BAD_ATTRIBUTE => WindowingApiError::BadAttribute,
        GLX_NO_EXTENSION => WindowingApiError::NoExtension,
        GLX_BAD_VISUAL => WindowingApiError::BadVisual,
        GLX_BAD_CONTEXT => WindowingApiError::BadContext,
        GLX_BAD_VALUE => WindowingApiError::BadValue,
        GLX_BAD_ENUM => WindowingApiError::BadEnumeration,
        _ => WindowingApiError::Failed,
    }
}

pub(crate) fn xlib_error_to_windowing_api_error(xlib: &Xlib,
                                                display: *mut Display,
                                                xlib_error: u8)
                                                -> WindowingApiError {
    match xlib_error {
        X_BAD_VALUE => return WindowingApiError::BadValue,
        X_BAD_WINDOW => return WindowingApiError::BadWindow,
        X_BAD_MATCH => return WindowingApiError::BadMatch,
        X_BAD_ALLOC => return WindowingApiError::BadAlloc,
        0 => return WindowingApiError::Failed,
        _ => {}
    }

    // GLX errors are extension errors, so their codes are assigned per-server. Match on the
    // name instead.
    let mut error_text: Vec<u8> = vec![0; 256];
    unsafe {
        (xlib.XGetErrorText)(display,
                             xlib_error as c_int,
                             error_text.as_mut_ptr() as *mut c_char,
                             error_text.len() as c_int - 1);
    }
    if error_text.starts_with(b"GLXBadFBConfig\0") {
        WindowingApiError::BadPixelFormat
    } else if error_text.starts_with(b"GLXBadContext\0") {
        WindowingApiError::BadContext
    } else {
        WindowingApiError::Failed
    }
}
