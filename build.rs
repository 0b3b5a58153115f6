// glwindow/build.rs
//
//! The `glwindow` build script.

use cfg_aliases::cfg_aliases;
use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::env;
use std::fs::File;
use std::path::PathBuf;

fn main() {
    // Setup aliases for #[cfg] checks
    cfg_aliases! {
        // Platforms
        windows: { target_os = "windows" },
        macos: { target_os = "macos" },
        android: { target_os = "android" },
        linux: { all(unix, not(any(macos, android))) },
    }

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap();
    let target_family = env::var("CARGO_CFG_TARGET_FAMILY").ok();
    let dest = PathBuf::from(&env::var("OUT_DIR").unwrap());

    // Generate WGL extension bindings.
    if target_os == "windows" {
        let mut file = File::create(dest.join("wgl_extra_bindings.rs")).unwrap();
        let registry = Registry::new(
            Api::Wgl,
            (1, 0),
            Profile::Core,
            Fallbacks::All,
            [
                "WGL_ARB_create_context",
                "WGL_ARB_create_context_profile",
                "WGL_ARB_extensions_string",
                "WGL_ARB_multisample",
                "WGL_ARB_pixel_format",
                "WGL_EXT_extensions_string",
                "WGL_EXT_swap_control",
            ],
        );
        registry.write_bindings(StructGenerator, &mut file).unwrap();
    }

    // Generate GLX extension bindings.
    if target_family.as_deref() == Some("unix") && target_os != "macos" && target_os != "android"
    {
        let mut file = File::create(dest.join("glx_extra_bindings.rs")).unwrap();
        let registry = Registry::new(
            Api::Glx,
            (1, 4),
            Profile::Core,
            Fallbacks::All,
            [
                "GLX_ARB_create_context",
                "GLX_ARB_create_context_profile",
                "GLX_ARB_multisample",
                "GLX_EXT_swap_control",
            ],
        );
        registry.write_bindings(StructGenerator, &mut file).unwrap();
    }
}
