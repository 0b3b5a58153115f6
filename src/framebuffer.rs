// glwindow/src/framebuffer.rs
//
//! The framebuffer layout requested from the pixel format or FB config negotiation.

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FramebufferFlags: u8 {
        const DOUBLE_BUFFER = 0x01;
        const STEREO        = 0x02;
    }
}

impl Default for FramebufferFlags {
    #[inline]
    fn default() -> FramebufferFlags {
        FramebufferFlags::DOUBLE_BUFFER
    }
}

/// Desired properties of a window's color, depth and stencil buffers.
///
/// Color and depth sizes are always requested. The remaining properties are only sent to the
/// platform when they differ from zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramebufferAttributes {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    /// Multisample count. Zero disables multisampling.
    pub samples: u8,
    pub aux_buffers: u8,
    pub flags: FramebufferFlags,
}

impl Default for FramebufferAttributes {
    fn default() -> FramebufferAttributes {
        FramebufferAttributes {
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
            depth_bits: 24,
            stencil_bits: 0,
            samples: 0,
            aux_buffers: 0,
            flags: FramebufferFlags::default(),
        }
    }
}

impl FramebufferAttributes {
    /// Total bits of the color buffer, alpha included.
    #[inline]
    pub fn color_bits(&self) -> u32 {
        self.red_bits as u32 + self.green_bits as u32 + self.blue_bits as u32 +
            self.alpha_bits as u32
    }

    #[inline]
    pub fn double_buffered(&self) -> bool {
        self.flags.contains(FramebufferFlags::DOUBLE_BUFFER)
    }

    #[inline]
    pub fn stereo(&self) -> bool {
        self.flags.contains(FramebufferFlags::STEREO)
    }
}
