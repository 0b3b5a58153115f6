// glwindow/src/platform/windows/wgl/context.rs
//
//! Wrapper for WGL contexts created with `WGL_ARB_create_context`.

use super::connection::Connection;
use super::window::Window;
use crate::attributes::wgl as wgl_attributes;
use crate::{ContextAttributes, Error, GLInfo, WindowingApiError};

use std::cell::OnceCell;
use std::ptr;
use std::thread;
use winapi::shared::minwindef::FALSE;
use winapi::shared::windef::HGLRC;
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::wingdi::{wglDeleteContext, wglGetCurrentContext, wglMakeCurrent};

const ERROR_INVALID_VERSION_ARB: u32 = 0x2095;
const ERROR_INVALID_PROFILE_ARB: u32 = 0x2096;

/// A WGL rendering context.
///
/// Contexts must be destroyed explicitly with `Connection::destroy_context`.
pub struct Context {
    pub(crate) glrc: HGLRC,
    attributes: ContextAttributes,
    gl: OnceCell<glow::Context>,
}

impl Drop for Context {
    #[inline]
    fn drop(&mut self) {
        if !self.glrc.is_null() && !thread::panicking() {
            panic!("Contexts must be destroyed explicitly with `destroy_context`!")
        }
    }
}

impl Context {
    #[inline]
    pub fn attributes(&self) -> &ContextAttributes {
        &self.attributes
    }

    /// The GL functions for this context, loaded the first time it was made current.
    #[inline]
    pub fn gl(&self) -> Result<&glow::Context, Error> {
        self.gl.get().ok_or(Error::NoCurrentContext)
    }

    pub fn info(&self) -> Result<GLInfo, Error> {
        Ok(GLInfo::query(self.gl()?))
    }

    #[inline]
    pub fn native_context(&self) -> HGLRC {
        self.glrc
    }
}

impl Connection {
    /// Creates a context compatible with the pixel format of `window`.
    pub fn create_context(&self, window: &Window, attributes: &ContextAttributes)
                          -> Result<Context, Error> {
        let attribute_list = wgl_attributes::context_attributes(attributes);
        debug!("wglCreateContextAttribsARB attributes: {:?}", attribute_list);

        unsafe {
            let glrc = self.wgl_extra.CreateContextAttribsARB(window.dc as *const _,
                                                              ptr::null(),
                                                              attribute_list.as_ptr());
            if glrc.is_null() {
                let windowing_api_error = match GetLastError() & 0xffff {
                    ERROR_INVALID_VERSION_ARB => WindowingApiError::BadVersion,
                    ERROR_INVALID_PROFILE_ARB => WindowingApiError::BadAttribute,
                    _ => WindowingApiError::Failed,
                };
                return Err(Error::ContextCreationFailed(windowing_api_error));
            }

            Ok(Context { glrc: glrc as HGLRC, attributes: *attributes, gl: OnceCell::new() })
        }
    }

    /// Binds `context` to the DC of `window` on this thread, loading GL functions on first use.
    pub fn make_context_current(&self, context: &Context, window: &Window)
                                -> Result<(), Error> {
        if window.is_closed() {
            return Err(Error::WindowClosed);
        }
        unsafe {
            if wglMakeCurrent(window.dc, context.glrc) == FALSE {
                debug!("wglMakeCurrent failed: {:#x}", GetLastError());
                return Err(Error::MakeCurrentFailed(WindowingApiError::Failed));
            }

            context.gl.get_or_init(|| {
                glow::Context::from_loader_function_cstr(|symbol_name| {
                    self.get_proc_address_cstr(symbol_name)
                })
            });
        }
        Ok(())
    }

    pub fn make_no_context_current(&self) -> Result<(), Error> {
        unsafe {
            if wglMakeCurrent(ptr::null_mut(), ptr::null_mut()) == FALSE {
                return Err(Error::MakeCurrentFailed(WindowingApiError::Failed));
            }
        }
        Ok(())
    }

    pub fn destroy_context(&self, context: &mut Context) -> Result<(), Error> {
        if context.glrc.is_null() {
            return Ok(());
        }

        unsafe {
            if wglGetCurrentContext() == context.glrc {
                self.make_no_context_current()?;
            }
            wglDeleteContext(context.glrc);
        }
        context.glrc = ptr::null_mut();
        Ok(())
    }
}
