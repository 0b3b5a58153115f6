// glwindow/src/tests.rs
//
//! Unit tests.

use crate::attributes::glx::{self, FBConfigCandidate};
use crate::attributes::wgl;
use crate::attributes::AttributeList;
use crate::{ContextAttributes, ContextFlags, Error, FramebufferAttributes, FramebufferFlags};
use crate::{GLProfile, GLVersion, LoopOptions, PumpMode, WindowDescriptor};
use crate::{run_clear_loop, ClearColor, Connection, Window};

use euclid::default::{Point2D, Size2D};
use serial_test::serial;
use std::os::raw::c_int;

#[test]
fn test_attribute_list_terminates_with_zero_pair() {
    let mut list = AttributeList::<8>::new();
    list.push(1, 2);
    list.push(3, 4);
    assert!(!list.is_terminated());
    list.terminate();
    assert!(list.is_terminated());
    assert_eq!(list.as_slice(), &[1, 2, 3, 4, 0, 0]);
    assert_eq!(list.len(), 6);
    assert_eq!(list.pairs().collect::<Vec<_>>(), vec![(1, 2), (3, 4)]);
}

#[test]
fn test_attribute_list_skips_unset_values() {
    let mut list = AttributeList::<8>::new();
    list.push_if_set(1, 0);
    list.push_if_set(2, 5);
    list.push(3, 0);
    let list = list.terminated();
    assert_eq!(list.as_slice(), &[2, 5, 3, 0, 0, 0]);
    assert_eq!(list.get(1), None);
    assert_eq!(list.get(3), Some(0));
}

#[test]
fn test_empty_attribute_list() {
    let list = AttributeList::<2>::default();
    assert!(list.is_empty());
    assert_eq!(list.capacity(), 2);
    let list = list.terminated();
    assert_eq!(list.as_slice(), &[0, 0]);
    assert_eq!(list.pairs().count(), 0);
}

#[test]
#[should_panic(expected = "capacity")]
fn test_attribute_list_overflow_panics() {
    let mut list = AttributeList::<4>::new();
    list.push(1, 1);
    list.push(2, 2);
    list.push(3, 3);
}

#[test]
#[should_panic(expected = "terminated")]
fn test_attribute_list_push_after_terminate_panics() {
    let mut list = AttributeList::<8>::new().terminated();
    list.push(1, 1);
}

#[test]
#[should_panic(expected = "terminated before use")]
fn test_unterminated_attribute_list_pointer_panics() {
    let mut list = AttributeList::<8>::new();
    list.push(1, 1);
    list.as_ptr();
}

#[test]
fn test_default_wgl_pixel_format_attributes() {
    let list = wgl::pixel_format_attributes(&FramebufferAttributes::default());
    let expected: &[c_int] = &[
        wgl::WGL_ACCELERATION_ARB,   wgl::WGL_FULL_ACCELERATION_ARB,
        wgl::WGL_ALPHA_BITS_ARB,     8,
        wgl::WGL_DEPTH_BITS_ARB,     24,
        wgl::WGL_DRAW_TO_WINDOW_ARB, 1,
        wgl::WGL_RED_BITS_ARB,       8,
        wgl::WGL_GREEN_BITS_ARB,     8,
        wgl::WGL_BLUE_BITS_ARB,      8,
        wgl::WGL_PIXEL_TYPE_ARB,     wgl::WGL_TYPE_RGBA_ARB,
        wgl::WGL_SUPPORT_OPENGL_ARB, 1,
        wgl::WGL_COLOR_BITS_ARB,     32,
        wgl::WGL_DOUBLE_BUFFER_ARB,  1,
        0,                           0,
    ];
    assert_eq!(list.as_slice(), expected);
}

#[test]
fn test_wgl_pixel_format_optional_attributes() {
    let attributes = FramebufferAttributes {
        stencil_bits: 8,
        samples: 4,
        aux_buffers: 2,
        flags: FramebufferFlags::DOUBLE_BUFFER | FramebufferFlags::STEREO,
        ..FramebufferAttributes::default()
    };
    let list = wgl::pixel_format_attributes(&attributes);
    let tail: Vec<_> = list.pairs().skip(10).collect();
    assert_eq!(tail, vec![
        (wgl::WGL_DOUBLE_BUFFER_ARB, 1),
        (wgl::WGL_STENCIL_BITS_ARB, 8),
        (wgl::WGL_STEREO_ARB, 1),
        (wgl::WGL_AUX_BUFFERS_ARB, 2),
        (wgl::WGL_SAMPLE_BUFFERS_ARB, 1),
        (wgl::WGL_SAMPLES_ARB, 4),
    ]);

    let single_buffered = FramebufferAttributes {
        flags: FramebufferFlags::empty(),
        ..FramebufferAttributes::default()
    };
    let list = wgl::pixel_format_attributes(&single_buffered);
    assert_eq!(list.get(wgl::WGL_DOUBLE_BUFFER_ARB), None);
    assert_eq!(list.pairs().count(), 10);
}

#[test]
fn test_default_glx_fb_config_attributes() {
    let list = glx::fb_config_attributes(&FramebufferAttributes::default());
    let expected: &[c_int] = &[
        glx::GLX_X_VISUAL_TYPE, glx::GLX_TRUE_COLOR,
        glx::GLX_DEPTH_SIZE,    24,
        glx::GLX_X_RENDERABLE,  1,
        glx::GLX_RED_SIZE,      8,
        glx::GLX_GREEN_SIZE,    8,
        glx::GLX_BLUE_SIZE,     8,
        glx::GLX_ALPHA_SIZE,    8,
        glx::GLX_RENDER_TYPE,   glx::GLX_RGBA_BIT,
        glx::GLX_DRAWABLE_TYPE, glx::GLX_WINDOW_BIT,
        glx::GLX_DOUBLEBUFFER,  1,
        0,                      0,
    ];
    assert_eq!(list.as_slice(), expected);
}

#[test]
fn test_glx_fb_config_attributes_leave_out_samples() {
    let attributes = FramebufferAttributes {
        stencil_bits: 8,
        samples: 4,
        ..FramebufferAttributes::default()
    };
    let list = glx::fb_config_attributes(&attributes);
    assert_eq!(list.get(glx::GLX_STENCIL_SIZE), Some(8));
    assert_eq!(list.get(glx::GLX_SAMPLES), None);
    assert_eq!(list.get(glx::GLX_SAMPLE_BUFFERS), None);
}

#[test]
fn test_glx_fb_config_optional_attributes() {
    let attributes = FramebufferAttributes {
        stencil_bits: 8,
        samples: 4,
        aux_buffers: 4,
        flags: FramebufferFlags::DOUBLE_BUFFER | FramebufferFlags::STEREO,
        ..FramebufferAttributes::default()
    };
    let list = glx::fb_config_attributes(&attributes);
    let tail: Vec<_> = list.pairs().skip(9).collect();
    assert_eq!(tail, vec![
        (glx::GLX_DOUBLEBUFFER, 1),
        (glx::GLX_STENCIL_SIZE, 8),
        (glx::GLX_STEREO, 1),
        (glx::GLX_AUX_BUFFERS, 4),
    ]);

    let single_buffered = FramebufferAttributes {
        flags: FramebufferFlags::empty(),
        ..FramebufferAttributes::default()
    };
    let list = glx::fb_config_attributes(&single_buffered);
    assert_eq!(list.get(glx::GLX_DOUBLEBUFFER), None);
    assert_eq!(list.pairs().count(), 9);
}

#[test]
fn test_context_attributes_profile_and_version() {
    let attributes = ContextAttributes::core(GLVersion::new(3, 3));
    let list = glx::context_attributes(&attributes);
    assert_eq!(list.as_slice(), &[
        glx::GLX_CONTEXT_PROFILE_MASK_ARB,  glx::GLX_CONTEXT_CORE_PROFILE_BIT_ARB,
        glx::GLX_CONTEXT_MAJOR_VERSION_ARB, 3,
        glx::GLX_CONTEXT_MINOR_VERSION_ARB, 3,
        0,                                  0,
    ]);

    let list = wgl::context_attributes(&attributes);
    assert_eq!(list.as_slice(), &[
        wgl::WGL_CONTEXT_PROFILE_MASK_ARB,  wgl::WGL_CONTEXT_CORE_PROFILE_BIT_ARB,
        wgl::WGL_CONTEXT_MAJOR_VERSION_ARB, 3,
        wgl::WGL_CONTEXT_MINOR_VERSION_ARB, 3,
        0,                                  0,
    ]);
}

#[test]
fn test_context_attributes_default_version_is_omitted() {
    let attributes = ContextAttributes {
        profile: GLProfile::Compatibility,
        ..ContextAttributes::default()
    };
    let list = wgl::context_attributes(&attributes);
    assert_eq!(list.as_slice(), &[
        wgl::WGL_CONTEXT_PROFILE_MASK_ARB, wgl::WGL_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB,
        0,                                 0,
    ]);

    // A zero major version with a nonzero minor still counts as a request.
    let attributes = ContextAttributes::core(GLVersion::new(0, 1));
    let list = glx::context_attributes(&attributes);
    assert_eq!(list.get(glx::GLX_CONTEXT_MAJOR_VERSION_ARB), Some(0));
    assert_eq!(list.get(glx::GLX_CONTEXT_MINOR_VERSION_ARB), Some(1));
}

#[test]
fn test_context_flags() {
    let attributes = ContextAttributes {
        version: GLVersion::new(4, 5),
        profile: GLProfile::Core,
        flags: ContextFlags::DEBUG | ContextFlags::FORWARD_COMPATIBLE,
    };
    let list = glx::context_attributes(&attributes);
    assert_eq!(list.get(glx::GLX_CONTEXT_FLAGS_ARB),
               Some(glx::GLX_CONTEXT_DEBUG_BIT_ARB | glx::GLX_CONTEXT_FORWARD_COMPATIBLE_BIT_ARB));

    let attributes = ContextAttributes { flags: ContextFlags::DEBUG, ..attributes };
    let list = wgl::context_attributes(&attributes);
    assert_eq!(list.get(wgl::WGL_CONTEXT_FLAGS_ARB), Some(wgl::WGL_CONTEXT_DEBUG_BIT_ARB));

    let list = wgl::context_attributes(&ContextAttributes::default());
    assert_eq!(list.get(wgl::WGL_CONTEXT_FLAGS_ARB), None);
}

#[test]
fn test_choose_best_config() {
    fn candidate(has_visual: bool, sample_buffers: c_int, samples: c_int) -> FBConfigCandidate {
        FBConfigCandidate { has_visual, sample_buffers, samples }
    }

    assert_eq!(glx::choose_best_config(&[], 0), None);
    assert_eq!(glx::choose_best_config(&[candidate(false, 1, 4)], 4), None);

    // The first config with a visual wins when nothing better comes along.
    let candidates = [candidate(false, 0, 0), candidate(true, 0, 0), candidate(true, 1, 2)];
    assert_eq!(glx::choose_best_config(&candidates, 4), Some(1));

    // A later config with the exact sample count replaces it.
    let candidates = [candidate(true, 0, 0), candidate(true, 1, 2), candidate(true, 1, 4)];
    assert_eq!(glx::choose_best_config(&candidates, 4), Some(2));
    assert_eq!(glx::choose_best_config(&candidates, 2), Some(1));

    // Matching samples without sample buffers doesn't count.
    let candidates = [candidate(true, 1, 8), candidate(true, 0, 0)];
    assert_eq!(glx::choose_best_config(&candidates, 0), Some(0));

    // The last exact match wins.
    let candidates = [candidate(true, 0, 0), candidate(true, 1, 4), candidate(true, 1, 4)];
    assert_eq!(glx::choose_best_config(&candidates, 4), Some(2));
}

#[test]
fn test_gl_version_parsing() {
    assert_eq!(GLVersion::parse("3.3.0 NVIDIA 535.54.03"), Some(GLVersion::new(3, 3)));
    assert_eq!(GLVersion::parse("4.6 (Core Profile) Mesa 23.1.4"), Some(GLVersion::new(4, 6)));
    assert_eq!(GLVersion::parse("OpenGL ES 3.2 Mesa 23.1.4"), Some(GLVersion::new(3, 2)));
    assert_eq!(GLVersion::parse("4.1 Metal - 88"), Some(GLVersion::new(4, 1)));
    assert_eq!(GLVersion::parse(""), None);
    assert_eq!(GLVersion::parse("garbage"), None);
    assert!(GLVersion::default().is_unspecified());
    assert!(GLVersion::new(3, 0) < GLVersion::new(3, 3));
}

#[test]
fn test_defaults() {
    let framebuffer = FramebufferAttributes::default();
    assert_eq!(framebuffer.color_bits(), 32);
    assert!(framebuffer.double_buffered());
    assert!(!framebuffer.stereo());

    let context = ContextAttributes::default();
    assert_eq!(context.profile, GLProfile::Core);
    assert!(context.version.is_unspecified());
    assert!(context.flags.is_empty());

    let window = WindowDescriptor::default();
    assert_eq!(window.title, "Sample Window");
    assert_eq!(window.origin, Point2D::new(400, 400));
    #[cfg(windows)]
    assert_eq!(window.size, Size2D::new(300, 300));
    #[cfg(not(windows))]
    assert_eq!(window.size, Size2D::new(200, 200));

    let options = LoopOptions::default();
    assert_eq!(options.pump_mode, PumpMode::Poll);
    assert_eq!(options.clear_color, ClearColor { r: 0.2, g: 0.3, b: 0.3, a: 1.0 });
    assert_eq!(options.max_frames, None);
}

#[test]
fn test_error_display() {
    assert_eq!(Error::NoPixelFormatFound.to_string(), "no matching pixel format was found");
    assert_eq!(Error::ContextCreationFailed(crate::WindowingApiError::BadVersion).to_string(),
               "failed to create the OpenGL context (BadVersion)");
}

// Tests below need a display and a GL driver. They pass trivially when neither is available.

fn connect() -> Option<Connection> {
    match Connection::new() {
        Ok(connection) => Some(connection),
        Err(Error::ConnectionFailed) |
        Err(Error::NoGLLibraryFound) |
        Err(Error::RequiredExtensionUnavailable) => {
            println!("no usable display; skipping");
            None
        }
        Err(err) => panic!("unexpected connection error: {:?}", err),
    }
}

fn create_test_window(connection: &Connection) -> Window {
    let descriptor = WindowDescriptor::new("glwindow test",
                                           Point2D::new(0, 0),
                                           Size2D::new(64, 64));
    connection.create_window(&descriptor, &FramebufferAttributes::default()).unwrap()
}

#[test]
#[serial]
fn test_choose_pixel_format() {
    let connection = match connect() {
        Some(connection) => connection,
        None => return,
    };
    connection.choose_pixel_format(&FramebufferAttributes::default()).unwrap();

    let impossible = FramebufferAttributes { aux_buffers: 255, ..FramebufferAttributes::default() };
    match connection.choose_pixel_format(&impossible) {
        Ok(_) | Err(Error::NoPixelFormatFound) | Err(Error::PixelFormatSelectionFailed(_)) => {}
        Err(err) => panic!("unexpected error: {:?}", err),
    }
}

#[test]
#[serial]
fn test_window_creation() {
    let connection = match connect() {
        Some(connection) => connection,
        None => return,
    };
    let window = create_test_window(&connection);
    assert!(!window.is_closed());
    assert_eq!(window.size(), Size2D::new(64, 64));
    connection.destroy_window(window).unwrap();
}

#[test]
#[serial]
fn test_context_creation() {
    let connection = match connect() {
        Some(connection) => connection,
        None => return,
    };
    let window = create_test_window(&connection);

    for &version in &[GLVersion::default(), GLVersion::new(3, 0), GLVersion::new(3, 3)] {
        for flag_bits in 0..(ContextFlags::all().bits() + 1) {
            let attributes = ContextAttributes {
                version,
                profile: GLProfile::Core,
                flags: ContextFlags::from_bits_truncate(flag_bits),
            };
            println!("creating context with attributes: {:?}", attributes);
            match connection.create_context(&window, &attributes) {
                Ok(mut context) => {
                    assert_eq!(*context.attributes(), attributes);
                    assert_eq!(context.gl().err(), Some(Error::NoCurrentContext));
                    connection.destroy_context(&mut context).unwrap();
                }
                Err(Error::ContextCreationFailed(_)) => {
                    println!("driver rejected {:?}", attributes);
                }
                Err(err) => panic!("unexpected error: {:?}", err),
            }
        }
    }

    connection.destroy_window(window).unwrap();
}

#[test]
#[serial]
fn test_clear_loop() {
    let connection = match connect() {
        Some(connection) => connection,
        None => return,
    };
    let mut window = create_test_window(&connection);
    let mut context = connection.create_context(&window, &ContextAttributes::default()).unwrap();
    connection.make_context_current(&context, &window).unwrap();
    connection.show_window(&window).unwrap();

    let info = context.info().unwrap();
    assert!(!info.version_string.is_empty());
    assert!(info.version.is_some());

    let options = LoopOptions { max_frames: Some(3), ..LoopOptions::default() };
    let frame_count = run_clear_loop(&connection, &mut window, &context, &options).unwrap();
    assert!(frame_count <= 3);

    connection.destroy_context(&mut context).unwrap();
    connection.destroy_window(window).unwrap();
}

// Binding a context to a window whose config it wasn't created for is reported as an X error on
// GLX. That must come back as `MakeCurrentFailed` instead of taking the process down.
#[test]
#[serial]
fn test_make_current_with_mismatched_window() {
    let connection = match connect() {
        Some(connection) => connection,
        None => return,
    };
    let window = create_test_window(&connection);
    let descriptor = WindowDescriptor::new("glwindow test (other config)",
                                           Point2D::new(0, 0),
                                           Size2D::new(64, 64));
    let other_attributes = FramebufferAttributes {
        red_bits: 5,
        green_bits: 6,
        blue_bits: 5,
        alpha_bits: 0,
        depth_bits: 16,
        flags: FramebufferFlags::empty(),
        ..FramebufferAttributes::default()
    };
    let other_window = match connection.create_window(&descriptor, &other_attributes) {
        Ok(other_window) => other_window,
        Err(Error::NoPixelFormatFound) => {
            connection.destroy_window(window).unwrap();
            return;
        }
        Err(err) => panic!("unexpected error: {:?}", err),
    };

    let mut context = connection.create_context(&window, &ContextAttributes::default()).unwrap();
    match connection.make_context_current(&context, &other_window) {
        Ok(()) | Err(Error::MakeCurrentFailed(_)) => {}
        Err(err) => panic!("unexpected error: {:?}", err),
    }
    connection.make_context_current(&context, &window).unwrap();
    connection.make_no_context_current().unwrap();

    connection.destroy_context(&mut context).unwrap();
    connection.destroy_window(other_window).unwrap();
    connection.destroy_window(window).unwrap();
}

#[cfg(windows)]
#[test]
fn test_null_hidden_window_is_rejected() {
    use crate::platform::windows::wgl::connection::HiddenWindow;
    match HiddenWindow::from_raw(std::ptr::null_mut()) {
        Err(Error::WindowCreationFailed) => {}
        Err(err) => panic!("unexpected error: {:?}", err),
        Ok(_) => panic!("a null window handle was accepted"),
    }
}

#[test]
#[serial]
fn test_destroy_context_twice() {
    let connection = match connect() {
        Some(connection) => connection,
        None => return,
    };
    let window = create_test_window(&connection);
    let mut context = connection.create_context(&window, &ContextAttributes::default()).unwrap();
    connection.destroy_context(&mut context).unwrap();
    connection.destroy_context(&mut context).unwrap();
    connection.destroy_window(window).unwrap();
}
