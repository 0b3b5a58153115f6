// glwindow/src/info.rs
//
//! OpenGL information.

use glow::HasContext;

/// Describes the OpenGL version that is requested when a context is created.
///
/// The version `0.0` asks the driver for whatever it considers the default, which is what the
/// "create context with attributes" extensions do when no version keys are supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GLVersion {
    /// The major OpenGL version (e.g. 4 in 4.2).
    pub major: u8,
    /// The minor OpenGL version (e.g. 2 in 4.2).
    pub minor: u8,
}

impl GLVersion {
    /// Creates a GL version structure with the given major and minor version numbers.
    #[inline]
    pub fn new(major: u8, minor: u8) -> GLVersion {
        GLVersion { major, minor }
    }

    /// Returns true if this is the "driver default" version, `0.0`.
    #[inline]
    pub fn is_unspecified(&self) -> bool {
        self.major == 0 && self.minor == 0
    }

    /// Parses the leading `MAJOR.MINOR` out of a `GL_VERSION` string.
    ///
    /// Vendor suffixes (`"4.6.0 NVIDIA 535.54"`) and the `"OpenGL ES"` prefix are ignored.
    pub fn parse(version_string: &str) -> Option<GLVersion> {
        let version_string = version_string.trim_start_matches("OpenGL ES").trim_start();
        let mut version_string_iter = version_string.split(|c| c == '.' || c == ' ');
        let major = version_string_iter.next()?.parse().ok()?;
        let minor = version_string_iter.next()?.parse().ok()?;
        Some(GLVersion { major, minor })
    }
}

/// Strings describing the implementation behind a current context.
#[derive(Clone, Debug)]
pub struct GLInfo {
    pub version_string: String,
    pub vendor: String,
    pub renderer: String,
    /// The parsed form of `version_string`, if it could be parsed.
    pub version: Option<GLVersion>,
}

impl GLInfo {
    /// Queries `GL_VERSION`, `GL_VENDOR` and `GL_RENDERER` from the given loaded functions.
    ///
    /// The context the functions were loaded for must be current.
    pub fn query(gl: &glow::Context) -> GLInfo {
        unsafe {
            let version_string = gl.get_parameter_string(glow::VERSION);
            let version = GLVersion::parse(&version_string);
            GLInfo {
                vendor: gl.get_parameter_string(glow::VENDOR),
                renderer: gl.get_parameter_string(glow::RENDERER),
                version_string,
                version,
            }
        }
    }
}
