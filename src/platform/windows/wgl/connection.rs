// glwindow/src/platform/windows/wgl/connection.rs
//
//! WGL extension loading and the window classes shared by every window.

use super::window;
use crate::wgl_extra::Wgl as WGLExtensionFunctions;
use crate::Error;

use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::mem;
use std::os::raw::{c_int, c_void};
use std::ptr;
use winapi::shared::minwindef::{FALSE, HINSTANCE, HMODULE, WORD};
use winapi::shared::ntdef::LPCSTR;
use winapi::shared::windef::{HBRUSH, HDC, HWND};
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::libloaderapi;
use winapi::um::wingdi::{self, wglCreateContext, wglDeleteContext, wglGetProcAddress};
use winapi::um::wingdi::{wglMakeCurrent, PFD_DOUBLEBUFFER, PFD_DRAW_TO_WINDOW, PFD_MAIN_PLANE};
use winapi::um::wingdi::{PFD_SUPPORT_OPENGL, PFD_TYPE_RGBA, PIXELFORMATDESCRIPTOR};
use winapi::um::winuser::{self, COLOR_BACKGROUND, CS_OWNDC, WNDCLASSA, WS_OVERLAPPEDWINDOW};

pub(crate) static WINDOW_CLASS_NAME: &[u8] = b"GLWindowClass\0";
static HIDDEN_WINDOW_CLASS_NAME: &[u8] = b"GLWindowHiddenWindow\0";
static OPENGL32_LIBRARY_NAME: &[u8] = b"opengl32.dll\0";

const HIDDEN_WINDOW_SIZE: c_int = 16;

/// Process-wide WGL state: the window classes, the loaded extension entry points and a hidden
/// window whose DC is used to query pixel formats.
pub struct Connection {
    pub(crate) instance: HINSTANCE,
    pub(crate) wgl_extra: WGLExtensionFunctions,
    opengl32: HMODULE,
    hidden_window: HiddenWindow,
    extensions: String,
}

impl Drop for Connection {
    fn drop(&mut self) {
        unsafe {
            self.hidden_window.destroy();
            winuser::UnregisterClassA(WINDOW_CLASS_NAME.as_ptr() as LPCSTR, self.instance);
            winuser::UnregisterClassA(HIDDEN_WINDOW_CLASS_NAME.as_ptr() as LPCSTR,
                                      self.instance);
            if !self.opengl32.is_null() {
                libloaderapi::FreeLibrary(self.opengl32);
            }
        }
    }
}

impl Connection {
    /// Registers the window classes and loads the WGL extensions.
    ///
    /// `wglGetProcAddress` only works with a current context, so a throwaway window and legacy
    /// context are created, used to resolve the extension entry points, and destroyed again.
    pub fn new() -> Result<Connection, Error> {
        unsafe {
            let instance = libloaderapi::GetModuleHandleA(ptr::null_mut());
            register_window_class(instance,
                                  HIDDEN_WINDOW_CLASS_NAME,
                                  Some(winuser::DefWindowProcA))?;
            register_window_class(instance, WINDOW_CLASS_NAME, Some(window::window_proc))?;

            let opengl32 = libloaderapi::LoadLibraryA(OPENGL32_LIBRARY_NAME.as_ptr() as LPCSTR);
            if opengl32.is_null() {
                unregister_window_classes(instance);
                return Err(Error::NoGLLibraryFound);
            }

            let (wgl_extra, extensions) = match load_extension_functions(instance, opengl32) {
                Ok(loaded) => loaded,
                Err(err) => {
                    unregister_window_classes(instance);
                    libloaderapi::FreeLibrary(opengl32);
                    return Err(err);
                }
            };

            let hidden_window = match HiddenWindow::new(instance) {
                Ok(hidden_window) => hidden_window,
                Err(err) => {
                    unregister_window_classes(instance);
                    libloaderapi::FreeLibrary(opengl32);
                    return Err(err);
                }
            };
            let connection = Connection {
                instance,
                wgl_extra,
                opengl32,
                hidden_window,
                extensions,
            };

            if !connection.has_extension("WGL_ARB_create_context") ||
                    !connection.wgl_extra.CreateContextAttribsARB.is_loaded() {
                return Err(Error::RequiredExtensionUnavailable);
            }
            if !connection.has_extension("WGL_ARB_pixel_format") ||
                    !connection.wgl_extra.ChoosePixelFormatARB.is_loaded() {
                return Err(Error::RequiredExtensionUnavailable);
            }
            if !connection.has_extension("WGL_EXT_swap_control") {
                debug!("WGL_EXT_swap_control is unavailable; swap interval is fixed");
            }

            Ok(connection)
        }
    }

    /// Returns true if the driver advertises the named WGL extension.
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.split_whitespace().any(|extension| extension == name)
    }

    /// Looks up a GL or WGL function by name.
    ///
    /// OpenGL 1.1 entry points aren't available through `wglGetProcAddress`; those are taken
    /// from the exports of `opengl32.dll` instead.
    pub fn get_proc_address(&self, symbol_name: &str) -> *const c_void {
        match CString::new(symbol_name) {
            Ok(symbol_name) => get_proc_address(self.opengl32, &symbol_name),
            Err(_) => ptr::null(),
        }
    }

    #[inline]
    pub(crate) fn get_proc_address_cstr(&self, symbol_name: &CStr) -> *const c_void {
        get_proc_address(self.opengl32, symbol_name)
    }

    #[inline]
    pub(crate) fn hidden_window_dc(&self) -> DCGuard {
        self.hidden_window.get_dc()
    }
}

unsafe fn register_window_class(instance: HINSTANCE,
                                class_name: &'static [u8],
                                window_proc: winuser::WNDPROC)
                                -> Result<(), Error> {
    let window_class_name = class_name.as_ptr() as LPCSTR;
    let mut window_class: WNDCLASSA = mem::zeroed();
    if winuser::GetClassInfoA(instance, window_class_name, &mut window_class) != FALSE {
        return Ok(());
    }

    let window_class = WNDCLASSA {
        style: CS_OWNDC,
        lpfnWndProc: window_proc,
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: instance,
        hIcon: ptr::null_mut(),
        hCursor: ptr::null_mut(),
        hbrBackground: COLOR_BACKGROUND as HBRUSH,
        lpszMenuName: ptr::null_mut(),
        lpszClassName: window_class_name,
    };
    if winuser::RegisterClassA(&window_class) == 0 {
        debug!("RegisterClassA failed: {:#x}", GetLastError());
        return Err(Error::WindowCreationFailed);
    }
    Ok(())
}

unsafe fn unregister_window_classes(instance: HINSTANCE) {
    winuser::UnregisterClassA(WINDOW_CLASS_NAME.as_ptr() as LPCSTR, instance);
    winuser::UnregisterClassA(HIDDEN_WINDOW_CLASS_NAME.as_ptr() as LPCSTR, instance);
}

unsafe fn load_extension_functions(instance: HINSTANCE, opengl32: HMODULE)
                                   -> Result<(WGLExtensionFunctions, String), Error> {
    let window_class_name = HIDDEN_WINDOW_CLASS_NAME.as_ptr() as LPCSTR;
    let window = winuser::CreateWindowExA(0,
                                          window_class_name,
                                          window_class_name,
                                          0,
                                          200,
                                          200,
                                          300,
                                          300,
                                          ptr::null_mut(),
                                          ptr::null_mut(),
                                          instance,
                                          ptr::null_mut());
    if window.is_null() {
        debug!("failed to create the extension loader window: {:#x}", GetLastError());
        return Err(Error::WindowCreationFailed);
    }
    let dc_guard = DCGuard::new(winuser::GetDC(window), Some(window));

    let result = create_false_context(dc_guard.dc).map(|gl_context| {
        let wgl_extra = WGLExtensionFunctions::load_with(|symbol_name| {
            match CString::new(symbol_name) {
                Ok(symbol_name) => get_proc_address(opengl32, &symbol_name),
                Err(_) => ptr::null(),
            }
        });

        let extensions = if wgl_extra.GetExtensionsStringARB.is_loaded() {
            CStr::from_ptr(wgl_extra.GetExtensionsStringARB(dc_guard.dc as *const _))
                .to_string_lossy()
        } else if wgl_extra.GetExtensionsStringEXT.is_loaded() {
            CStr::from_ptr(wgl_extra.GetExtensionsStringEXT()).to_string_lossy()
        } else {
            Cow::Borrowed("")
        };
        let extensions = extensions.into_owned();
        debug!("WGL extensions: {}", extensions);

        wglMakeCurrent(dc_guard.dc, ptr::null_mut());
        wglDeleteContext(gl_context);
        (wgl_extra, extensions)
    });

    drop(dc_guard);
    winuser::DestroyWindow(window);
    result
}

unsafe fn create_false_context(dc: HDC) -> Result<winapi::shared::windef::HGLRC, Error> {
    let pixel_format_descriptor = PIXELFORMATDESCRIPTOR {
        nSize: mem::size_of::<PIXELFORMATDESCRIPTOR>() as WORD,
        nVersion: 1,
        dwFlags: PFD_DRAW_TO_WINDOW | PFD_SUPPORT_OPENGL | PFD_DOUBLEBUFFER,
        iPixelType: PFD_TYPE_RGBA,
        cColorBits: 24,
        cRedBits: 0,
        cRedShift: 0,
        cGreenBits: 0,
        cGreenShift: 0,
        cBlueBits: 0,
        cBlueShift: 0,
        cAlphaBits: 8,
        cAlphaShift: 0,
        cAccumBits: 0,
        cAccumRedBits: 0,
        cAccumGreenBits: 0,
        cAccumBlueBits: 0,
        cAccumAlphaBits: 0,
        cDepthBits: 32,
        cStencilBits: 8,
        cAuxBuffers: 0,
        iLayerType: PFD_MAIN_PLANE,
        bReserved: 0,
        dwLayerMask: 0,
        dwVisibleMask: 0,
        dwDamageMask: 0,
    };

    let pixel_format = wingdi::ChoosePixelFormat(dc, &pixel_format_descriptor);
    if pixel_format == 0 {
        return Err(Error::NoPixelFormatFound);
    }
    if wingdi::SetPixelFormat(dc, pixel_format, &pixel_format_descriptor) == FALSE {
        return Err(Error::PixelFormatSelectionFailed(crate::WindowingApiError::Failed));
    }

    let gl_context = wglCreateContext(dc);
    if gl_context.is_null() {
        return Err(Error::ContextCreationFailed(crate::WindowingApiError::Failed));
    }
    if wglMakeCurrent(dc, gl_context) == FALSE {
        wglDeleteContext(gl_context);
        return Err(Error::MakeCurrentFailed(crate::WindowingApiError::Failed));
    }
    Ok(gl_context)
}

fn get_proc_address(opengl32: HMODULE, symbol_name: &CStr) -> *const c_void {
    unsafe {
        let address = wglGetProcAddress(symbol_name.as_ptr()) as *const c_void;
        // Some drivers return small integers instead of null on failure.
        match address as isize {
            -1 | 0 | 1 | 2 | 3 => {}
            _ => return address,
        }
        if opengl32.is_null() {
            return ptr::null();
        }
        libloaderapi::GetProcAddress(opengl32, symbol_name.as_ptr()) as *const c_void
    }
}

pub(crate) struct HiddenWindow {
    window: HWND,
}

impl HiddenWindow {
    unsafe fn new(instance: HINSTANCE) -> Result<HiddenWindow, Error> {
        let window_class_name = HIDDEN_WINDOW_CLASS_NAME.as_ptr() as LPCSTR;
        let window = winuser::CreateWindowExA(0,
                                              window_class_name,
                                              window_class_name,
                                              WS_OVERLAPPEDWINDOW,
                                              0,
                                              0,
                                              HIDDEN_WINDOW_SIZE,
                                              HIDDEN_WINDOW_SIZE,
                                              ptr::null_mut(),
                                              ptr::null_mut(),
                                              instance,
                                              ptr::null_mut());
        if window.is_null() {
            debug!("failed to create the hidden window: {:#x}", GetLastError());
        }
        HiddenWindow::from_raw(window)
    }

    /// Takes ownership of `window`. A null handle is refused, since `GetDC(NULL)` would hand
    /// back the screen DC.
    pub(crate) fn from_raw(window: HWND) -> Result<HiddenWindow, Error> {
        if window.is_null() {
            return Err(Error::WindowCreationFailed);
        }
        Ok(HiddenWindow { window })
    }

    #[inline]
    fn get_dc(&self) -> DCGuard {
        unsafe { DCGuard::new(winuser::GetDC(self.window), Some(self.window)) }
    }

    unsafe fn destroy(&mut self) {
        if !self.window.is_null() {
            winuser::DestroyWindow(self.window);
            self.window = ptr::null_mut();
        }
    }
}

/// A DC that is released when dropped.
pub(crate) struct DCGuard<'a> {
    pub(crate) dc: HDC,
    window: Option<HWND>,
    phantom: PhantomData<&'a HWND>,
}

impl<'a> Drop for DCGuard<'a> {
    #[inline]
    fn drop(&mut self) {
        unsafe {
            if let Some(window) = self.window {
                winuser::ReleaseDC(window, self.dc);
            }
        }
    }
}

impl<'a> DCGuard<'a> {
    #[inline]
    pub(crate) fn new(dc: HDC, window: Option<HWND>) -> DCGuard<'a> {
        DCGuard { dc, window, phantom: PhantomData }
    }
}
