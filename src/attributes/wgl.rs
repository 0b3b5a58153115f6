// glwindow/src/attributes/wgl.rs
//
//! Attribute lists for `WGL_ARB_pixel_format` and `WGL_ARB_create_context`.
//!
//! Windows headers don't ship these enumerants, so they're spelled out here.

use super::{bool_to_int, AttributeList};
use crate::{ContextAttributes, ContextFlags, FramebufferAttributes, GLProfile};

use std::os::raw::c_int;

pub const WGL_DRAW_TO_WINDOW_ARB:        c_int = 0x2001;
pub const WGL_ACCELERATION_ARB:          c_int = 0x2003;
pub const WGL_SUPPORT_OPENGL_ARB:        c_int = 0x2010;
pub const WGL_DOUBLE_BUFFER_ARB:         c_int = 0x2011;
pub const WGL_STEREO_ARB:                c_int = 0x2012;
pub const WGL_PIXEL_TYPE_ARB:            c_int = 0x2013;
pub const WGL_COLOR_BITS_ARB:            c_int = 0x2014;
pub const WGL_RED_BITS_ARB:              c_int = 0x2015;
pub const WGL_GREEN_BITS_ARB:            c_int = 0x2017;
pub const WGL_BLUE_BITS_ARB:             c_int = 0x2019;
pub const WGL_ALPHA_BITS_ARB:            c_int = 0x201b;
pub const WGL_DEPTH_BITS_ARB:            c_int = 0x2022;
pub const WGL_STENCIL_BITS_ARB:          c_int = 0x2023;
pub const WGL_AUX_BUFFERS_ARB:           c_int = 0x2024;
pub const WGL_FULL_ACCELERATION_ARB:     c_int = 0x2027;
pub const WGL_TYPE_RGBA_ARB:             c_int = 0x202b;
pub const WGL_SAMPLE_BUFFERS_ARB:        c_int = 0x2041;
pub const WGL_SAMPLES_ARB:               c_int = 0x2042;
pub const WGL_CONTEXT_MAJOR_VERSION_ARB: c_int = 0x2091;
pub const WGL_CONTEXT_MINOR_VERSION_ARB: c_int = 0x2092;
pub const WGL_CONTEXT_FLAGS_ARB:         c_int = 0x2094;
pub const WGL_CONTEXT_PROFILE_MASK_ARB:  c_int = 0x9126;

pub const WGL_CONTEXT_DEBUG_BIT_ARB:                 c_int = 0x0001;
pub const WGL_CONTEXT_FORWARD_COMPATIBLE_BIT_ARB:    c_int = 0x0002;
pub const WGL_CONTEXT_CORE_PROFILE_BIT_ARB:          c_int = 0x0001;
pub const WGL_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB: c_int = 0x0002;

pub type PixelFormatAttributeList = AttributeList<40>;
pub type ContextAttributeList = AttributeList<40>;

/// Builds the integer attribute list for `wglChoosePixelFormatARB`.
pub fn pixel_format_attributes(attributes: &FramebufferAttributes) -> PixelFormatAttributeList {
    let mut list = PixelFormatAttributeList::new();
    list.push(WGL_ACCELERATION_ARB,   WGL_FULL_ACCELERATION_ARB);
    list.push(WGL_ALPHA_BITS_ARB,     attributes.alpha_bits as c_int);
    list.push(WGL_DEPTH_BITS_ARB,     attributes.depth_bits as c_int);
    list.push(WGL_DRAW_TO_WINDOW_ARB, 1);
    list.push(WGL_RED_BITS_ARB,       attributes.red_bits as c_int);
    list.push(WGL_GREEN_BITS_ARB,     attributes.green_bits as c_int);
    list.push(WGL_BLUE_BITS_ARB,      attributes.blue_bits as c_int);
    list.push(WGL_PIXEL_TYPE_ARB,     WGL_TYPE_RGBA_ARB);
    list.push(WGL_SUPPORT_OPENGL_ARB, 1);
    list.push(WGL_COLOR_BITS_ARB,     attributes.color_bits() as c_int);

    list.push_if_set(WGL_DOUBLE_BUFFER_ARB, bool_to_int(attributes.double_buffered()));
    list.push_if_set(WGL_STENCIL_BITS_ARB,  attributes.stencil_bits as c_int);
    list.push_if_set(WGL_STEREO_ARB,        bool_to_int(attributes.stereo()));
    list.push_if_set(WGL_AUX_BUFFERS_ARB,   attributes.aux_buffers as c_int);
    if attributes.samples > 0 {
        list.push(WGL_SAMPLE_BUFFERS_ARB, 1);
        list.push(WGL_SAMPLES_ARB, attributes.samples as c_int);
    }

    list.terminated()
}

/// Builds the attribute list for `wglCreateContextAttribsARB`.
pub fn context_attributes(attributes: &ContextAttributes) -> ContextAttributeList {
    let mut list = ContextAttributeList::new();

    let profile_bit = match attributes.profile {
        GLProfile::Core => WGL_CONTEXT_CORE_PROFILE_BIT_ARB,
        GLProfile::Compatibility => WGL_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB,
    };
    list.push(WGL_CONTEXT_PROFILE_MASK_ARB, profile_bit);

    if !attributes.version.is_unspecified() {
        list.push(WGL_CONTEXT_MAJOR_VERSION_ARB, attributes.version.major as c_int);
        list.push(WGL_CONTEXT_MINOR_VERSION_ARB, attributes.version.minor as c_int);
    }

    let mut flags = 0;
    if attributes.flags.contains(ContextFlags::DEBUG) {
        flags |= WGL_CONTEXT_DEBUG_BIT_ARB;
    }
    if attributes.flags.contains(ContextFlags::FORWARD_COMPATIBLE) {
        flags |= WGL_CONTEXT_FORWARD_COMPATIBLE_BIT_ARB;
    }
    list.push_if_set(WGL_CONTEXT_FLAGS_ARB, flags);

    list.terminated()
}
