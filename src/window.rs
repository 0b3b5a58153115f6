// glwindow/src/window.rs
//
//! Platform-independent window parameters.

use euclid::default::{Point2D, Size2D};

/// Default window size: 300x300 on Windows, 200x200 on X11.
#[cfg(windows)]
pub const DEFAULT_WINDOW_SIZE: i32 = 300;
#[cfg(not(windows))]
pub const DEFAULT_WINDOW_SIZE: i32 = 200;

/// How to create a window.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowDescriptor {
    pub title: String,
    /// Position of the top-left corner on the screen, in pixels.
    pub origin: Point2D<i32>,
    pub size: Size2D<i32>,
}

impl Default for WindowDescriptor {
    fn default() -> WindowDescriptor {
        WindowDescriptor {
            title: "Sample Window".to_owned(),
            origin: Point2D::new(400, 400),
            size: Size2D::new(DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_SIZE),
        }
    }
}

impl WindowDescriptor {
    #[inline]
    pub fn new(title: &str, origin: Point2D<i32>, size: Size2D<i32>) -> WindowDescriptor {
        WindowDescriptor { title: title.to_owned(), origin, size }
    }
}
