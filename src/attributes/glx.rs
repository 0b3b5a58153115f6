// glwindow/src/attributes/glx.rs
//
//! Attribute lists for `glXChooseFBConfig` and `GLX_ARB_create_context`, plus the rule used to
//! pick one of the returned FB configs.

use super::{bool_to_int, AttributeList};
use crate::{ContextAttributes, ContextFlags, FramebufferAttributes, GLProfile};

use std::os::raw::c_int;

pub const GLX_DOUBLEBUFFER:    c_int = 0x0005;
pub const GLX_STEREO:          c_int = 0x0006;
pub const GLX_AUX_BUFFERS:     c_int = 0x0007;
pub const GLX_RED_SIZE:        c_int = 0x0008;
pub const GLX_GREEN_SIZE:      c_int = 0x0009;
pub const GLX_BLUE_SIZE:       c_int = 0x000a;
pub const GLX_ALPHA_SIZE:      c_int = 0x000b;
pub const GLX_DEPTH_SIZE:      c_int = 0x000c;
pub const GLX_STENCIL_SIZE:    c_int = 0x000d;
pub const GLX_X_VISUAL_TYPE:   c_int = 0x0022;
pub const GLX_DRAWABLE_TYPE:   c_int = 0x8010;
pub const GLX_RENDER_TYPE:     c_int = 0x8011;
pub const GLX_X_RENDERABLE:    c_int = 0x8012;
pub const GLX_TRUE_COLOR:      c_int = 0x8002;
pub const GLX_RGBA_BIT:        c_int = 0x0001;
pub const GLX_WINDOW_BIT:      c_int = 0x0001;
pub const GLX_SAMPLE_BUFFERS:  c_int = 100000;
pub const GLX_SAMPLES:         c_int = 100001;

pub const GLX_CONTEXT_MAJOR_VERSION_ARB: c_int = 0x2091;
pub const GLX_CONTEXT_MINOR_VERSION_ARB: c_int = 0x2092;
pub const GLX_CONTEXT_FLAGS_ARB:         c_int = 0x2094;
pub const GLX_CONTEXT_PROFILE_MASK_ARB:  c_int = 0x9126;

pub const GLX_CONTEXT_DEBUG_BIT_ARB:                 c_int = 0x0001;
pub const GLX_CONTEXT_FORWARD_COMPATIBLE_BIT_ARB:    c_int = 0x0002;
pub const GLX_CONTEXT_CORE_PROFILE_BIT_ARB:          c_int = 0x0001;
pub const GLX_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB: c_int = 0x0002;

pub type FBConfigAttributeList = AttributeList<32>;
pub type ContextAttributeList = AttributeList<16>;

/// Builds the attribute list for `glXChooseFBConfig`.
///
/// The sample count isn't part of the request; see `choose_best_config`.
pub fn fb_config_attributes(attributes: &FramebufferAttributes) -> FBConfigAttributeList {
    let mut list = FBConfigAttributeList::new();
    list.push(GLX_X_VISUAL_TYPE, GLX_TRUE_COLOR);
    list.push(GLX_DEPTH_SIZE,    attributes.depth_bits as c_int);
    list.push(GLX_X_RENDERABLE,  1);
    list.push(GLX_RED_SIZE,      attributes.red_bits as c_int);
    list.push(GLX_GREEN_SIZE,    attributes.green_bits as c_int);
    list.push(GLX_BLUE_SIZE,     attributes.blue_bits as c_int);
    list.push(GLX_ALPHA_SIZE,    attributes.alpha_bits as c_int);
    list.push(GLX_RENDER_TYPE,   GLX_RGBA_BIT);
    list.push(GLX_DRAWABLE_TYPE, GLX_WINDOW_BIT);

    list.push_if_set(GLX_DOUBLEBUFFER,  bool_to_int(attributes.double_buffered()));
    list.push_if_set(GLX_STENCIL_SIZE,  attributes.stencil_bits as c_int);
    list.push_if_set(GLX_STEREO,        bool_to_int(attributes.stereo()));
    list.push_if_set(GLX_AUX_BUFFERS,   attributes.aux_buffers as c_int);

    list.terminated()
}

/// Builds the attribute list for `glXCreateContextAttribsARB`.
pub fn context_attributes(attributes: &ContextAttributes) -> ContextAttributeList {
    let mut list = ContextAttributeList::new();

    let profile_bit = match attributes.profile {
        GLProfile::Core => GLX_CONTEXT_CORE_PROFILE_BIT_ARB,
        GLProfile::Compatibility => GLX_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB,
    };
    list.push(GLX_CONTEXT_PROFILE_MASK_ARB, profile_bit);

    if !attributes.version.is_unspecified() {
        list.push(GLX_CONTEXT_MAJOR_VERSION_ARB, attributes.version.major as c_int);
        list.push(GLX_CONTEXT_MINOR_VERSION_ARB, attributes.version.minor as c_int);
    }

    let mut flags = 0;
    if attributes.flags.contains(ContextFlags::DEBUG) {
        flags |= GLX_CONTEXT_DEBUG_BIT_ARB;
    }
    if attributes.flags.contains(ContextFlags::FORWARD_COMPATIBLE) {
        flags |= GLX_CONTEXT_FORWARD_COMPATIBLE_BIT_ARB;
    }
    list.push_if_set(GLX_CONTEXT_FLAGS_ARB, flags);

    list.terminated()
}

/// What `choose_best_config` needs to know about each config `glXChooseFBConfig` returned.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FBConfigCandidate {
    /// Whether `glXGetVisualFromFBConfig` returns a visual for this config.
    pub has_visual: bool,
    /// `GLX_SAMPLE_BUFFERS`.
    pub sample_buffers: c_int,
    /// `GLX_SAMPLES`.
    pub samples: c_int,
}

/// Picks the index of the config to use.
///
/// Configs without a visual are never chosen. The first config with a visual is taken as a
/// fallback; a later one replaces it only if it has sample buffers and exactly the requested
/// number of samples.
pub fn choose_best_config(candidates: &[FBConfigCandidate], requested_samples: c_int)
                          -> Option<usize> {
    let mut best = None;
    for (index, candidate) in candidates.iter().enumerate() {
        if !candidate.has_visual {
            continue;
        }
        match best {
            None => best = Some(index),
            Some(_) => {
                if candidate.sample_buffers != 0 && candidate.samples == requested_samples {
                    best = Some(index);
                }
            }
        }
    }
    best
}
