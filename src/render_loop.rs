// glwindow/src/render_loop.rs
//
//! The pump-clear-swap loop shared by both demo programs.

use crate::event::{Event, PumpMode};
use crate::platform::default::connection::Connection;
use crate::platform::default::context::Context;
use crate::platform::default::window::Window;
use crate::Error;

use glow::HasContext;

/// An RGBA color used to clear the color buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for ClearColor {
    #[inline]
    fn default() -> ClearColor {
        ClearColor { r: 0.2, g: 0.3, b: 0.3, a: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoopOptions {
    pub pump_mode: PumpMode,
    pub clear_color: ClearColor,
    /// Stop after presenting this many frames. `None` runs until the window closes.
    pub max_frames: Option<u64>,
}

/// Pumps events, clears and swaps until the window closes.
///
/// The context must have been made current against `window`. Returns the number of frames
/// presented.
pub fn run_clear_loop(connection: &Connection,
                      window: &mut Window,
                      context: &Context,
                      options: &LoopOptions)
                      -> Result<u64, Error> {
    let gl = context.gl()?;
    let mut frame_count = 0;

    loop {
        if options.max_frames.map_or(false, |max_frames| frame_count >= max_frames) {
            break;
        }

        connection.pump_events(window, options.pump_mode, &mut |event| {
            if let Event::KeyPress(key_code) = event {
                debug!("key press: {}", key_code);
            }
        })?;
        if window.is_closed() {
            break;
        }

        let color = options.clear_color;
        unsafe {
            gl.clear_color(color.r, color.g, color.b, color.a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        connection.swap_buffers(window)?;
        frame_count += 1;
    }

    debug!("render loop finished after {} frames", frame_count);
    Ok(frame_count)
}
