// glwindow/demos/common/mod.rs
//
// Command line handling and the window/context setup shared by the demos.

use clap::{App, Arg, ArgMatches};
use glwindow::{run_clear_loop, Connection, ContextAttributes, ContextFlags, Error};
use glwindow::{FramebufferAttributes, FramebufferFlags, GLProfile, GLVersion, LoopOptions};
use glwindow::{PumpMode, WindowDescriptor};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::io::{self, Write};
use std::process;
use std::str::FromStr;

pub struct DemoOptions {
    pub framebuffer: FramebufferAttributes,
    pub context: ContextAttributes,
    pub swap_interval: Option<i32>,
    pub frames: Option<u64>,
}

pub fn parse_options(app_name: &str) -> DemoOptions {
    let matches = App::new(app_name)
        .arg(
            Arg::with_name("gl-version")
                .long("gl-version")
                .takes_value(true)
                .value_name("MAJOR.MINOR")
                .default_value("0.0")
                .help("OpenGL version to request; 0.0 leaves it to the driver"),
        )
        .arg(
            Arg::with_name("compatibility")
                .long("compatibility")
                .help("Request a compatibility profile context"),
        )
        .arg(
            Arg::with_name("debug-context")
                .long("debug-context")
                .help("Request a debug context"),
        )
        .arg(
            Arg::with_name("stencil")
                .long("stencil")
                .takes_value(true)
                .value_name("BITS")
                .help("Stencil buffer size"),
        )
        .arg(
            Arg::with_name("samples")
                .long("samples")
                .takes_value(true)
                .value_name("N")
                .help("Multisample count"),
        )
        .arg(Arg::with_name("stereo").long("stereo").help("Request a stereo framebuffer"))
        .arg(
            Arg::with_name("aux-buffers")
                .long("aux-buffers")
                .takes_value(true)
                .value_name("N")
                .help("Number of auxiliary buffers"),
        )
        .arg(
            Arg::with_name("single-buffer")
                .long("single-buffer")
                .help("Request a single-buffered framebuffer"),
        )
        .arg(
            Arg::with_name("swap-interval")
                .long("swap-interval")
                .takes_value(true)
                .value_name("N")
                .help("Swap interval; 0 disables vsync"),
        )
        .arg(
            Arg::with_name("frames")
                .long("frames")
                .takes_value(true)
                .value_name("N")
                .help("Exit after presenting this many frames"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log debug output"),
        )
        .get_matches();

    init_logging(matches.is_present("verbose"));

    let mut flags = FramebufferFlags::DOUBLE_BUFFER;
    if matches.is_present("single-buffer") {
        flags.remove(FramebufferFlags::DOUBLE_BUFFER);
    }
    if matches.is_present("stereo") {
        flags.insert(FramebufferFlags::STEREO);
    }
    let framebuffer = FramebufferAttributes {
        stencil_bits: parse_value(&matches, "stencil").unwrap_or(0),
        samples: parse_value(&matches, "samples").unwrap_or(0),
        aux_buffers: parse_value(&matches, "aux-buffers").unwrap_or(0),
        flags,
        ..FramebufferAttributes::default()
    };

    let version = matches.value_of("gl-version").and_then(GLVersion::parse).unwrap_or_else(|| {
        eprintln!("--gl-version expects MAJOR.MINOR");
        process::exit(2)
    });
    let mut context_flags = ContextFlags::empty();
    if matches.is_present("debug-context") {
        context_flags.insert(ContextFlags::DEBUG);
    }
    let context = ContextAttributes {
        version,
        profile: if matches.is_present("compatibility") {
            GLProfile::Compatibility
        } else {
            GLProfile::Core
        },
        flags: context_flags,
    };

    DemoOptions {
        framebuffer,
        context,
        swap_interval: parse_value(&matches, "swap-interval"),
        frames: parse_value(&matches, "frames"),
    }
}

fn parse_value<T: FromStr>(matches: &ArgMatches, name: &str) -> Option<T> {
    let value = matches.value_of(name)?;
    match value.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("invalid value for --{}: {}", name, value);
            process::exit(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        eprintln!("failed to initialize logging");
    }
}

/// Creates the window and context, runs the clear loop, and tears everything down.
pub fn run(options: &DemoOptions, pump_mode: PumpMode) -> Result<(), Error> {
    let connection = Connection::new()?;

    let mut window = connection.create_window(&WindowDescriptor::default(), &options.framebuffer)?;
    info!("pixel format has {} samples", window.pixel_format().samples);

    let mut context = match connection.create_context(&window, &options.context) {
        Ok(context) => context,
        Err(err) => {
            connection.destroy_window(window)?;
            return Err(err);
        }
    };

    let result: Result<(), Error> = (|| {
        connection.make_context_current(&context, &window)?;
        let gl_info = context.info()?;
        info!("OpenGL {} ({}, {})", gl_info.version_string, gl_info.vendor, gl_info.renderer);

        if let Some(interval) = options.swap_interval {
            if let Err(err) = connection.set_swap_interval(&window, interval) {
                warn!("couldn't set swap interval {}: {}", interval, err);
            }
        }

        connection.show_window(&window)?;
        let loop_options = LoopOptions {
            pump_mode,
            max_frames: options.frames,
            ..LoopOptions::default()
        };
        let frame_count = run_clear_loop(&connection, &mut window, &context, &loop_options)?;
        info!("presented {} frames", frame_count);
        Ok(())
    })();

    connection.destroy_context(&mut context)?;
    connection.destroy_window(window)?;
    result
}

/// Runs the demo and exits with a nonzero status on failure.
pub fn main_with_pump_mode(app_name: &str, pump_mode: PumpMode) {
    let options = parse_options(app_name);
    if let Err(err) = run(&options, pump_mode) {
        error!("{}", err);
        let _ = report_failure(&mut io::stdout(), app_name, &err);
        process::exit(-1);
    }
}

/// Writes the one-line failure report the demos print on standard output.
pub fn report_failure<W: Write>(out: &mut W, app_name: &str, err: &Error) -> io::Result<()> {
    writeln!(out, "{}: {}", app_name, err)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::report_failure;
    use glwindow::{Error, WindowingApiError};

    #[test]
    fn test_failure_report() {
        let mut out = Vec::new();
        report_failure(&mut out, "demo", &Error::ConnectionFailed).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(),
                   "demo: couldn't connect to the display server\n");

        let mut out = Vec::new();
        let err = Error::ContextCreationFailed(WindowingApiError::BadMatch);
        report_failure(&mut out, "demo", &err).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(),
                   "demo: failed to create the OpenGL context (BadMatch)\n");
    }
}
