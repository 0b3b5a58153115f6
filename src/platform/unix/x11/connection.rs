// glwindow/src/platform/unix/x11/connection.rs
//
//! A connection to the X server, with Xlib and GLX loaded.

use crate::glx_extra::Glx as GlxExtraFunctions;
use crate::Error;

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_void};
use std::ptr;
use x11_dl::glx::Glx;
use x11_dl::xlib::{self, Atom, Display, Xlib};

static WM_DELETE_WINDOW_ATOM_NAME: &[u8] = b"WM_DELETE_WINDOW\0";

/// A connection to the X server.
///
/// Owns the Xlib display and the dynamically loaded Xlib and GLX entry points. Windows and
/// contexts are created through it and must be destroyed before it is dropped.
pub struct Connection {
    pub(crate) xlib: Xlib,
    pub(crate) glx: Glx,
    pub(crate) glx_extra: GlxExtraFunctions,
    pub(crate) display: *mut Display,
    pub(crate) screen: c_int,
    pub(crate) wm_delete_window: Atom,
    extensions: String,
}

impl Drop for Connection {
    fn drop(&mut self) {
        unsafe {
            (self.xlib.XCloseDisplay)(self.display);
        }
    }
}

impl Connection {
    /// Opens the default display (`$DISPLAY`) and resolves the GLX extension entry points.
    ///
    /// Unlike WGL, GLX hands out extension entry points without a current context, so no
    /// throwaway context is needed here.
    pub fn new() -> Result<Connection, Error> {
        let xlib = Xlib::open().map_err(|err| {
            debug!("failed to load Xlib: {}", err);
            Error::NoGLLibraryFound
        })?;
        let glx = Glx::open().map_err(|err| {
            debug!("failed to load libGL: {}", err);
            Error::NoGLLibraryFound
        })?;

        unsafe {
            let display = (xlib.XOpenDisplay)(ptr::null());
            if display.is_null() {
                return Err(Error::ConnectionFailed);
            }
            let screen = (xlib.XDefaultScreen)(display);

            let (mut major_version, mut minor_version) = (0, 0);
            if (glx.glXQueryVersion)(display, &mut major_version, &mut minor_version) ==
                    xlib::False {
                (xlib.XCloseDisplay)(display);
                return Err(Error::RequiredExtensionUnavailable);
            }
            debug!("GLX {}.{} on screen {}", major_version, minor_version, screen);

            let extensions = (glx.glXQueryExtensionsString)(display, screen);
            let extensions = if extensions.is_null() {
                String::new()
            } else {
                CStr::from_ptr(extensions).to_string_lossy().into_owned()
            };

            let glx_extra = GlxExtraFunctions::load_with(|symbol_name| {
                get_proc_address(&glx, symbol_name)
            });

            let wm_delete_window =
                (xlib.XInternAtom)(display,
                                   WM_DELETE_WINDOW_ATOM_NAME.as_ptr() as *const c_char,
                                   xlib::False);

            let connection = Connection {
                xlib,
                glx,
                glx_extra,
                display,
                screen,
                wm_delete_window,
                extensions,
            };

            if !connection.has_extension("GLX_ARB_create_context") ||
                    !connection.glx_extra.CreateContextAttribsARB.is_loaded() {
                return Err(Error::RequiredExtensionUnavailable);
            }
            if !connection.has_extension("GLX_EXT_swap_control") {
                debug!("GLX_EXT_swap_control is unavailable; swap interval is fixed");
            }

            Ok(connection)
        }
    }

    /// Returns true if the server and client both advertise the named GLX extension.
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.split_whitespace().any(|extension| extension == name)
    }

    /// The raw Xlib display.
    #[inline]
    pub fn native_display(&self) -> *mut Display {
        self.display
    }

    /// Looks up a GL or GLX function by name.
    #[inline]
    pub fn get_proc_address(&self, symbol_name: &str) -> *const c_void {
        get_proc_address(&self.glx, symbol_name)
    }

    pub(crate) fn get_proc_address_cstr(&self, symbol_name: &CStr) -> *const c_void {
        unsafe {
            match (self.glx.glXGetProcAddress)(symbol_name.as_ptr() as *const u8) {
                Some(function) => function as *const c_void,
                None => ptr::null(),
            }
        }
    }
}

fn get_proc_address(glx: &Glx, symbol_name: &str) -> *const c_void {
    let symbol_name = match CString::new(symbol_name) {
        Ok(symbol_name) => symbol_name,
        Err(_) => return ptr::null(),
    };
    unsafe {
        match (glx.glXGetProcAddress)(symbol_name.as_ptr() as *const u8) {
            Some(function) => function as *const c_void,
            None => ptr::null(),
        }
    }
}
