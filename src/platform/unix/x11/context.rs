// glwindow/src/platform/unix/x11/context.rs
//
//! Wrapper for GLX contexts.

use super::connection::Connection;
use super::error;
use super::window::Window;
use crate::attributes::glx as glx_attributes;
use crate::{ContextAttributes, Error, GLInfo};

use std::cell::OnceCell;
use std::os::raw::c_void;
use std::ptr;
use std::thread;
use x11_dl::glx::GLXContext;
use x11_dl::xlib;

/// A GLX rendering context.
///
/// Contexts must be destroyed explicitly with `Connection::destroy_context`.
pub struct Context {
    pub(crate) glx_context: GLXContext,
    attributes: ContextAttributes,
    gl: OnceCell<glow::Context>,
}

impl Drop for Context {
    #[inline]
    fn drop(&mut self) {
        if !self.glx_context.is_null() && !thread::panicking() {
            panic!("Contexts must be destroyed explicitly with `destroy_context`!")
        }
    }
}

impl Context {
    /// The attributes this context was requested with.
    #[inline]
    pub fn attributes(&self) -> &ContextAttributes {
        &self.attributes
    }

    /// The GL functions for this context, loaded the first time it was made current.
    #[inline]
    pub fn gl(&self) -> Result<&glow::Context, Error> {
        self.gl.get().ok_or(Error::NoCurrentContext)
    }

    /// Queries version, vendor and renderer strings. The context must be current.
    pub fn info(&self) -> Result<GLInfo, Error> {
        Ok(GLInfo::query(self.gl()?))
    }

    #[inline]
    pub fn native_context(&self) -> GLXContext {
        self.glx_context
    }
}

impl Connection {
    /// Creates a context for the FB config of `window` via `glXCreateContextAttribsARB`.
    pub fn create_context(&self, window: &Window, attributes: &ContextAttributes)
                          -> Result<Context, Error> {
        let attribute_list = glx_attributes::context_attributes(attributes);
        debug!("glXCreateContextAttribsARB attributes: {:?}", attribute_list);

        unsafe {
            // Failures are reported through the X error queue, so catch them here.
            error::reset_last_x_error();
            let prev_error_handler =
                (self.xlib.XSetErrorHandler)(Some(error::xlib_error_handler));

            let glx_context = self.glx_extra.CreateContextAttribsARB(
                self.display as *mut _,
                window.pixel_format().fb_config as *const c_void,
                ptr::null(),
                xlib::True,
                attribute_list.as_ptr()) as GLXContext;

            (self.xlib.XSync)(self.display, xlib::False);
            (self.xlib.XSetErrorHandler)(prev_error_handler);

            if glx_context.is_null() {
                let windowing_api_error = error::xlib_error_to_windowing_api_error(
                    &self.xlib, self.display, error::last_x_error());
                return Err(Error::ContextCreationFailed(windowing_api_error));
            }

            Ok(Context { glx_context, attributes: *attributes, gl: OnceCell::new() })
        }
    }

    /// Binds `context` to `window` on this thread, loading GL functions on first use.
    pub fn make_context_current(&self, context: &Context, window: &Window)
                                -> Result<(), Error> {
        if window.is_closed() {
            return Err(Error::WindowClosed);
        }
        unsafe {
            self.make_current(window.native_window(), context.glx_context)?;

            context.gl.get_or_init(|| {
                glow::Context::from_loader_function_cstr(|symbol_name| {
                    self.get_proc_address_cstr(symbol_name)
                })
            });
        }
        Ok(())
    }

    pub fn make_no_context_current(&self) -> Result<(), Error> {
        unsafe { self.make_current(0, ptr::null_mut()) }
    }

    // Mismatched drawables and contexts are reported as X errors (`BadMatch`,
    // `GLXBadContext`) rather than through the return value.
    unsafe fn make_current(&self, drawable: xlib::Drawable, glx_context: GLXContext)
                           -> Result<(), Error> {
        error::reset_last_x_error();
        let prev_error_handler = (self.xlib.XSetErrorHandler)(Some(error::xlib_error_handler));

        let ok = (self.glx.glXMakeCurrent)(self.display, drawable, glx_context);

        (self.xlib.XSync)(self.display, xlib::False);
        (self.xlib.XSetErrorHandler)(prev_error_handler);

        let last_x_error = error::last_x_error();
        if ok == xlib::False || last_x_error != 0 {
            let windowing_api_error =
                error::xlib_error_to_windowing_api_error(&self.xlib, self.display, last_x_error);
            debug!("glXMakeCurrent failed: {:?}", windowing_api_error);
            return Err(Error::MakeCurrentFailed(windowing_api_error));
        }
        Ok(())
    }

    pub fn destroy_context(&self, context: &mut Context) -> Result<(), Error> {
        if context.glx_context.is_null() {
            return Ok(());
        }

        unsafe {
            if (self.glx.glXGetCurrentContext)() == context.glx_context {
                self.make_no_context_current()?;
            }
            (self.glx.glXDestroyContext)(self.display, context.glx_context);
        }
        context.glx_context = ptr::null_mut();
        Ok(())
    }
}
