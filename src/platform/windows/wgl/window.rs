// glwindow/src/platform/windows/wgl/window.rs
//
//! Win32 windows with a WGL pixel format.

use super::connection::{Connection, DCGuard, WINDOW_CLASS_NAME};
use crate::attributes::wgl::{self as wgl_attributes, WGL_SAMPLES_ARB};
use crate::{Error, Event, FramebufferAttributes, PumpMode, WindowDescriptor, WindowingApiError};

use euclid::default::Size2D;
use std::cell::RefCell;
use std::ffi::CString;
use std::mem;
use std::os::raw::{c_int, c_uint};
use std::ptr;
use std::thread;
use winapi::shared::minwindef::{FALSE, HIWORD, LOWORD, LPARAM, LRESULT, UINT, WORD, WPARAM};
use winapi::shared::ntdef::LPCSTR;
use winapi::shared::windef::{HDC, HWND};
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::wingdi::{self, PIXELFORMATDESCRIPTOR};
use winapi::um::winuser::{self, MSG, PM_REMOVE, SW_SHOW, WM_CLOSE, WM_DESTROY, WM_KEYDOWN};
use winapi::um::winuser::{WM_PAINT, WM_QUIT, WM_SIZE, WM_SYSKEYDOWN, WS_OVERLAPPEDWINDOW};

thread_local! {
    static PENDING_EVENTS: RefCell<Vec<(HWND, Event)>> = const { RefCell::new(Vec::new()) };
}

/// A pixel format index chosen by `wglChoosePixelFormatARB`.
///
/// Indices are per-device, so one chosen on the hidden window's DC is valid for any window on
/// the same display.
#[derive(Clone, Copy)]
pub struct PixelFormat {
    pub(crate) index: c_int,
    /// `WGL_SAMPLES_ARB` of the chosen format.
    pub samples: c_int,
}

pub struct Window {
    pub(crate) window: HWND,
    pub(crate) dc: HDC,
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
    /// Returns true once the window was asked to close or was destroyed.
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

    #[inline]
    pub fn native_window(&self) -> HWND {
        self.window
    }

    /// The window's own DC. Windows of this class have `CS_OWNDC`, so it stays valid for the
    /// lifetime of the window.
    #[inline]
    pub fn native_dc(&self) -> HDC {
        self.dc
    }
}

impl Connection {
    /// Runs `wglChoosePixelFormatARB` with the attributes and takes the first match.
    pub fn choose_pixel_format(&self, attributes: &FramebufferAttributes)
                               -> Result<PixelFormat, Error> {
        let dc_guard = self.hidden_window_dc();
        self.choose_pixel_format_for_dc(&dc_guard, attributes)
    }

    fn choose_pixel_format_for_dc(&self, dc_guard: &DCGuard, attributes: &FramebufferAttributes)
                                  -> Result<PixelFormat, Error> {
        let attribute_list = wgl_attributes::pixel_format_attributes(attributes);
        debug!("wglChoosePixelFormatARB attributes: {:?}", attribute_list);

        unsafe {
            let (mut index, mut pixel_format_count) = (0, 0);
            let ok = self.wgl_extra.ChoosePixelFormatARB(dc_guard.dc as *const _,
                                                         attribute_list.as_ptr(),
                                                         ptr::null(),
                                                         1,
                                                         &mut index,
                                                         &mut pixel_format_count);
            if ok == FALSE {
                debug!("wglChoosePixelFormatARB failed: {:#x}", GetLastError());
                return Err(Error::PixelFormatSelectionFailed(WindowingApiError::Failed));
            }
            if pixel_format_count == 0 {
                return Err(Error::NoPixelFormatFound);
            }

            let mut samples = 0;
            if attributes.samples > 0 {
                let ok = self.wgl_extra.GetPixelFormatAttribivARB(dc_guard.dc as *const _,
                                                                  index,
                                                                  0,
                                                                  1,
                                                                  &WGL_SAMPLES_ARB,
                                                                  &mut samples);
                if ok == FALSE {
                    samples = 0;
                }
            }
            debug!("using pixel format {} ({} samples)", index, samples);

            Ok(PixelFormat { index, samples })
        }
    }

    /// Creates a window, then selects a pixel format matching `attributes` on its DC.
    ///
    /// A window's pixel format can be set only once, so a failure here leaves nothing behind.
    pub fn create_window(&self,
                         descriptor: &WindowDescriptor,
                         attributes: &FramebufferAttributes)
                         -> Result<Window, Error> {
        let title = CString::new(descriptor.title.replace('\0', "")).unwrap_or_default();

        unsafe {
            let window = winuser::CreateWindowExA(0,
                                                  WINDOW_CLASS_NAME.as_ptr() as LPCSTR,
                                                  title.as_ptr(),
                                                  WS_OVERLAPPEDWINDOW,
                                                  descriptor.origin.x,
                                                  descriptor.origin.y,
                                                  descriptor.size.width,
                                                  descriptor.size.height,
                                                  ptr::null_mut(),
                                                  ptr::null_mut(),
                                                  self.instance,
                                                  ptr::null_mut());
            if window.is_null() {
                debug!("CreateWindowExA failed: {:#x}", GetLastError());
                return Err(Error::WindowCreationFailed);
            }

            let dc = winuser::GetDC(window);
            let pixel_format = {
                let dc_guard = DCGuard::new(dc, None);
                self.choose_pixel_format_for_dc(&dc_guard, attributes)
                    .and_then(|pixel_format| set_pixel_format(dc, pixel_format))
            };
            let pixel_format = match pixel_format {
                Ok(pixel_format) => pixel_format,
                Err(err) => {
                    winuser::ReleaseDC(window, dc);
                    winuser::DestroyWindow(window);
                    discard_pending_events(window);
                    return Err(err);
                }
            };

            Ok(Window {
                window,
                dc,
                pixel_format,
                size: descriptor.size,
                closed: false,
                destroyed: false,
            })
        }
    }

    pub fn show_window(&self, window: &Window) -> Result<(), Error> {
        if window.closed {
            return Err(Error::WindowClosed);
        }
        unsafe {
            winuser::ShowWindow(window.window, SW_SHOW);
            winuser::UpdateWindow(window.window);
        }
        Ok(())
    }

    /// Processes messages for this thread, reporting events for `window` to `callback`.
    ///
    /// `PumpMode::Wait` blocks in `GetMessageA` for the first message; the rest of the queue is
    /// then drained with `PeekMessageA`.
    pub fn pump_events(&self,
                       window: &mut Window,
                       mode: PumpMode,
                       callback: &mut dyn FnMut(Event))
                       -> Result<(), Error> {
        if window.closed {
            return Err(Error::WindowClosed);
        }

        unsafe {
            let mut msg: MSG = mem::zeroed();
            if mode == PumpMode::Wait {
                if winuser::GetMessageA(&mut msg, ptr::null_mut(), 0, 0) <= 0 {
                    window.closed = true;
                } else {
                    dispatch_message(window, &msg);
                }
                flush_pending_events(window, callback);
            }

            while !window.closed &&
                    winuser::PeekMessageA(&mut msg, ptr::null_mut(), 0, 0, PM_REMOVE) != FALSE {
                dispatch_message(window, &msg);
                flush_pending_events(window, callback);
            }

            if !window.destroyed && winuser::IsWindow(window.window) == FALSE {
                window.closed = true;
                window.destroyed = true;
            }
        }
        Ok(())
    }

    /// Presents the back buffer of `window`.
    pub fn swap_buffers(&self, window: &Window) -> Result<(), Error> {
        if window.closed {
            return Err(Error::WindowClosed);
        }
        unsafe {
            if wingdi::SwapBuffers(window.dc) == FALSE {
                debug!("SwapBuffers failed: {:#x}", GetLastError());
                return Err(Error::PresentFailed(WindowingApiError::Failed));
            }
        }
        Ok(())
    }

    /// Sets the swap interval through `WGL_EXT_swap_control`. Applies to the current context.
    pub fn set_swap_interval(&self, _: &Window, interval: c_int) -> Result<(), Error> {
        if !self.has_extension("WGL_EXT_swap_control") ||
                !self.wgl_extra.SwapIntervalEXT.is_loaded() {
            warn!("can't set the swap interval: WGL_EXT_swap_control is unavailable");
            return Err(Error::RequiredExtensionUnavailable);
        }
        unsafe {
            if self.wgl_extra.SwapIntervalEXT(interval) == FALSE {
                return Err(Error::Failed);
            }
        }
        Ok(())
    }

    /// Releases the window's DC and destroys it. The window must not be bound to a live context.
    pub fn destroy_window(&self, mut window: Window) -> Result<(), Error> {
        unsafe {
            if !window.destroyed {
                winuser::ReleaseDC(window.window, window.dc);
                winuser::DestroyWindow(window.window);
            }
            discard_pending_events(window.window);
        }
        window.dc = ptr::null_mut();
        window.closed = true;
        window.destroyed = true;
        Ok(())
    }
}

unsafe fn set_pixel_format(dc: HDC, pixel_format: PixelFormat) -> Result<PixelFormat, Error> {
    let mut descriptor: PIXELFORMATDESCRIPTOR = mem::zeroed();
    descriptor.nSize = mem::size_of::<PIXELFORMATDESCRIPTOR>() as WORD;
    descriptor.nVersion = 1;
    let ok = wingdi::DescribePixelFormat(dc,
                                         pixel_format.index,
                                         mem::size_of::<PIXELFORMATDESCRIPTOR>() as c_uint,
                                         &mut descriptor);
    if ok == 0 {
        debug!("DescribePixelFormat failed: {:#x}", GetLastError());
        return Err(Error::PixelFormatSelectionFailed(WindowingApiError::BadPixelFormat));
    }
    if wingdi::SetPixelFormat(dc, pixel_format.index, &descriptor) == FALSE {
        debug!("SetPixelFormat failed: {:#x}", GetLastError());
        return Err(Error::PixelFormatSelectionFailed(WindowingApiError::Failed));
    }
    Ok(pixel_format)
}

unsafe fn dispatch_message(window: &mut Window, msg: &MSG) {
    match msg.message {
        WM_QUIT => window.closed = true,
        _ => {
            winuser::TranslateMessage(msg);
            winuser::DispatchMessageA(msg);
        }
    }
}

fn flush_pending_events(window: &mut Window, callback: &mut dyn FnMut(Event)) {
    let events = PENDING_EVENTS.with(|pending_events| {
        let mut pending_events = pending_events.borrow_mut();
        let (ours, others): (Vec<_>, Vec<_>) = pending_events.drain(..).partition(|&(hwnd, _)| {
            hwnd == window.window
        });
        *pending_events = others;
        ours
    });

    for (_, event) in events {
        match event {
            Event::Resized(size) => {
                if size == window.size {
                    continue;
                }
                window.size = size;
            }
            Event::CloseRequested => window.closed = true,
            Event::Destroyed => {
                window.closed = true;
                window.destroyed = true;
            }
            Event::Expose | Event::KeyPress(_) => {}
        }
        callback(event);
    }
}

fn discard_pending_events(hwnd: HWND) {
    PENDING_EVENTS.with(|pending_events| {
        pending_events.borrow_mut().retain(|&(window, _)| window != hwnd)
    });
}

/// Window procedure for the window class. Events are queued and delivered by `pump_events`.
///
/// `WM_CLOSE` is swallowed so that the window stays alive until `destroy_window`.
pub(crate) unsafe extern "system" fn window_proc(hwnd: HWND,
                                                 msg: UINT,
                                                 wparam: WPARAM,
                                                 lparam: LPARAM)
                                                 -> LRESULT {
    let event = match msg {
        WM_PAINT => Some(Event::Expose),
        WM_KEYDOWN | WM_SYSKEYDOWN => Some(Event::KeyPress(wparam as u32)),
        WM_SIZE => {
            let (width, height) = (LOWORD(lparam as u32), HIWORD(lparam as u32));
            Some(Event::Resized(Size2D::new(width as i32, height as i32)))
        }
        WM_CLOSE => Some(Event::CloseRequested),
        WM_DESTROY => Some(Event::Destroyed),
        _ => None,
    };
    if let Some(event) = event {
        PENDING_EVENTS.with(|pending_events| pending_events.borrow_mut().push((hwnd, event)));
    }

    match msg {
        WM_CLOSE => 0,
        WM_PAINT => {
            // Validate the update region so WM_PAINT isn't regenerated endlessly.
            let mut paint = mem::zeroed();
            winuser::BeginPaint(hwnd, &mut paint);
            winuser::EndPaint(hwnd, &paint);
            0
        }
        _ => winuser::DefWindowProcA(hwnd, msg, wparam, lparam),
    }
}
