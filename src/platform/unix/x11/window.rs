// glwindow/src/platform/unix/x11/window.rs
//
//! Xlib windows created from a GLX FB config.

use super::connection::Connection;
use super::error;
use crate::attributes::glx::{self as glx_attributes, FBConfigCandidate};
use crate::attributes::glx::{GLX_SAMPLES, GLX_SAMPLE_BUFFERS};
use crate::{Error, Event, FramebufferAttributes, PumpMode, WindowDescriptor, WindowingApiError};

use euclid::default::Size2D;
use std::ffi::CString;
use std::mem;
use std::os::raw::{c_int, c_long, c_uint, c_void};
use std::slice;
use std::thread;
use x11_dl::glx::GLXFBConfig;
use x11_dl::xlib::{self, Colormap, XEvent, XSetWindowAttributes};

const EVENT_MASK: c_long = xlib::ExposureMask | xlib::KeyPressMask | xlib::StructureNotifyMask;

/// The FB config a window was created with.
#[derive(Clone, Copy, Debug)]
pub struct PixelFormat {
    pub(crate) fb_config: GLXFBConfig,
    /// `GLX_SAMPLES` of the chosen config.
    pub samples: c_int,
}

pub struct Window {
    pub(crate) window: xlib::Window,
    colormap: Colormap,
    pixel_format: PixelFormat,
    size: Size2D<i32>,
    closed: bool,
    destroyed: bool,
}

impl Drop for Window {
    #[inline]
    fn drop(&mut self) {
        if !self.destroyed && !thread::panicking() {
            panic!("Windows must be destroyed explicitly with `destroy_window`!")
        }
    }
}

impl Window {
    /// Returns true once the window manager asked to close the window or it was destroyed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn size(&self) -> Size2D<i32> {
        self.size
    }

    #[inline]
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// The X window ID.
    #[inline]
    pub fn native_window(&self) -> xlib::Window {
        self.window
    }
}

impl Connection {
    /// Asks GLX for FB configs matching `attributes` and picks one.
    ///
    /// Multisampling isn't part of the request: among the configs that have an X visual, the
    /// first is used unless a later one has sample buffers with exactly the requested sample
    /// count.
    pub fn choose_pixel_format(&self, attributes: &FramebufferAttributes)
                               -> Result<PixelFormat, Error> {
        let attribute_list = glx_attributes::fb_config_attributes(attributes);
        debug!("glXChooseFBConfig attributes: {:?}", attribute_list);

        unsafe {
            let mut fb_config_count = 0;
            let fb_configs = (self.glx.glXChooseFBConfig)(self.display,
                                                          self.screen,
                                                          attribute_list.as_ptr(),
                                                          &mut fb_config_count);
            if fb_configs.is_null() {
                return Err(Error::NoPixelFormatFound);
            }
            if fb_config_count <= 0 {
                (self.xlib.XFree)(fb_configs as *mut c_void);
                return Err(Error::NoPixelFormatFound);
            }
            debug!("glXChooseFBConfig returned {} configs", fb_config_count);

            let fb_configs_slice = slice::from_raw_parts(fb_configs, fb_config_count as usize);
            let candidates: Vec<FBConfigCandidate> = fb_configs_slice.iter().map(|&fb_config| {
                let visual_info = (self.glx.glXGetVisualFromFBConfig)(self.display, fb_config);
                let has_visual = !visual_info.is_null();
                if has_visual {
                    (self.xlib.XFree)(visual_info as *mut c_void);
                }
                FBConfigCandidate {
                    has_visual,
                    sample_buffers: self.get_config_attr(fb_config, GLX_SAMPLE_BUFFERS),
                    samples: self.get_config_attr(fb_config, GLX_SAMPLES),
                }
            }).collect();

            let best = glx_attributes::choose_best_config(&candidates,
                                                          attributes.samples as c_int);
            let result = match best {
                None => Err(Error::NoPixelFormatFound),
                Some(index) => {
                    debug!("using FB config {} of {}", index, fb_config_count);
                    Ok(PixelFormat {
                        fb_config: fb_configs_slice[index],
                        samples: candidates[index].samples,
                    })
                }
            };

            // The configs themselves belong to the display; only the array is ours.
            (self.xlib.XFree)(fb_configs as *mut c_void);
            result
        }
    }

    /// Chooses an FB config, then creates an unmapped window with a matching visual.
    pub fn create_window(&self,
                         descriptor: &WindowDescriptor,
                         attributes: &FramebufferAttributes)
                         -> Result<Window, Error> {
        let pixel_format = self.choose_pixel_format(attributes)?;

        unsafe {
            let visual_info = (self.glx.glXGetVisualFromFBConfig)(self.display,
                                                                  pixel_format.fb_config);
            if visual_info.is_null() {
                return Err(Error::NoPixelFormatFound);
            }

            let root_window = (self.xlib.XRootWindow)(self.display, self.screen);
            let colormap = (self.xlib.XCreateColormap)(self.display,
                                                       root_window,
                                                       (*visual_info).visual,
                                                       xlib::AllocNone);

            let mut window_attributes: XSetWindowAttributes = mem::zeroed();
            window_attributes.colormap = colormap;
            window_attributes.background_pixmap = 0;
            window_attributes.background_pixel = 0;
            window_attributes.border_pixel = 0;
            window_attributes.event_mask = EVENT_MASK;

            error::reset_last_x_error();
            let prev_error_handler =
                (self.xlib.XSetErrorHandler)(Some(error::xlib_error_handler));

            let window = (self.xlib.XCreateWindow)(
                self.display,
                root_window,
                descriptor.origin.x,
                descriptor.origin.y,
                descriptor.size.width as c_uint,
                descriptor.size.height as c_uint,
                0,
                (*visual_info).depth,
                xlib::InputOutput as c_uint,
                (*visual_info).visual,
                xlib::CWColormap | xlib::CWBorderPixel | xlib::CWBackPixel | xlib::CWEventMask,
                &mut window_attributes);
            (self.xlib.XSync)(self.display, xlib::False);
            (self.xlib.XSetErrorHandler)(prev_error_handler);
            (self.xlib.XFree)(visual_info as *mut c_void);

            if window == 0 || error::last_x_error() != 0 {
                let windowing_api_error = error::xlib_error_to_windowing_api_error(
                    &self.xlib, self.display, error::last_x_error());
                debug!("XCreateWindow failed: {:?}", windowing_api_error);
                if window != 0 {
                    (self.xlib.XDestroyWindow)(self.display, window);
                }
                (self.xlib.XFreeColormap)(self.display, colormap);
                return Err(Error::WindowCreationFailed);
            }

            (self.xlib.XSelectInput)(self.display, window, EVENT_MASK);

            let title = CString::new(descriptor.title.replace('\0', "")).unwrap_or_default();
            (self.xlib.XStoreName)(self.display, window, title.as_ptr());

            let mut protocols = [self.wm_delete_window];
            (self.xlib.XSetWMProtocols)(self.display,
                                        window,
                                        protocols.as_mut_ptr(),
                                        protocols.len() as c_int);

            Ok(Window {
                window,
                colormap,
                pixel_format,
                size: descriptor.size,
                closed: false,
                destroyed: false,
            })
        }
    }

    /// Maps the window.
    pub fn show_window(&self, window: &Window) -> Result<(), Error> {
        if window.closed {
            return Err(Error::WindowClosed);
        }
        unsafe {
            (self.xlib.XMapWindow)(self.display, window.window);
            (self.xlib.XFlush)(self.display);
        }
        Ok(())
    }

    /// Processes pending X events for `window`, reporting each to `callback`.
    ///
    /// In `PumpMode::Wait` this blocks until an event arrives, the way a bare `XNextEvent` loop
    /// does, then drains whatever else is queued.
    pub fn pump_events(&self,
                       window: &mut Window,
                       mode: PumpMode,
                       callback: &mut dyn FnMut(Event))
                       -> Result<(), Error> {
        if window.closed {
            return Err(Error::WindowClosed);
        }

        unsafe {
            let mut event: XEvent = mem::zeroed();
            if mode == PumpMode::Wait {
                (self.xlib.XNextEvent)(self.display, &mut event);
                self.dispatch_event(window, &event, callback);
            }
            while !window.closed && (self.xlib.XPending)(self.display) > 0 {
                (self.xlib.XNextEvent)(self.display, &mut event);
                self.dispatch_event(window, &event, callback);
            }
        }
        Ok(())
    }

    unsafe fn dispatch_event(&self,
                             window: &mut Window,
                             event: &XEvent,
                             callback: &mut dyn FnMut(Event)) {
        if event.any.window != window.window {
            return;
        }

        match event.get_type() {
            xlib::Expose => callback(Event::Expose),
            xlib::KeyPress => callback(Event::KeyPress(event.key.keycode)),
            xlib::ConfigureNotify => {
                let new_size = Size2D::new(event.configure.width, event.configure.height);
                if new_size != window.size {
                    window.size = new_size;
                    callback(Event::Resized(new_size));
                }
            }
            xlib::ClientMessage => {
                let atom = event.client_message.data.get_long(0) as xlib::Atom;
                if atom == self.wm_delete_window {
                    window.closed = true;
                    callback(Event::CloseRequested);
                }
            }
            xlib::DestroyNotify => {
                window.closed = true;
                window.destroyed = true;
                callback(Event::Destroyed);
            }
            _ => {}
        }
    }

    /// Presents the back buffer of `window`.
    pub fn swap_buffers(&self, window: &Window) -> Result<(), Error> {
        if window.closed {
            return Err(Error::WindowClosed);
        }
        unsafe {
            (self.glx.glXSwapBuffers)(self.display, window.window);
        }
        Ok(())
    }

    /// Sets the swap interval of `window` through `GLX_EXT_swap_control`.
    pub fn set_swap_interval(&self, window: &Window, interval: c_int) -> Result<(), Error> {
        if !self.has_extension("GLX_EXT_swap_control") ||
                !self.glx_extra.SwapIntervalEXT.is_loaded() {
            warn!("can't set the swap interval: GLX_EXT_swap_control is unavailable");
            return Err(Error::RequiredExtensionUnavailable);
        }
        unsafe {
            self.glx_extra.SwapIntervalEXT(self.display as *mut _, window.window, interval);
        }
        Ok(())
    }

    /// Destroys the window and its colormap. The window must not be bound to a live context.
    pub fn destroy_window(&self, mut window: Window) -> Result<(), Error> {
        unsafe {
            if !window.destroyed {
                (self.xlib.XDestroyWindow)(self.display, window.window);
            }
            (self.xlib.XFreeColormap)(self.display, window.colormap);
            (self.xlib.XFlush)(self.display);
        }
        window.closed = true;
        window.destroyed = true;
        Ok(())
    }

    pub(crate) fn get_config_attr(&self, fb_config: GLXFBConfig, attribute: c_int) -> c_int {
        unsafe {
            let mut value = 0;
            let err = (self.glx.glXGetFBConfigAttrib)(self.display,
                                                      fb_config,
                                                      attribute,
                                                      &mut value);
            if err != xlib::Success as c_int {
                let windowing_api_error: WindowingApiError =
                    error::glx_error_to_windowing_api_error(err);
                debug!("glXGetFBConfigAttrib({:#x}) failed: {:?}",
                       attribute,
                       windowing_api_error);
                return 0;
            }
            value
        }
    }
}
