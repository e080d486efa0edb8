//! Image output.
//!
//! Writes linear RGB pixel buffers to disk. Plain-text PPM (`P3`) is
//! written directly; PNG is produced by writing a temporary PPM and handing
//! it to an external converter (`pnmtopng`, else ImageMagick `convert`).
//!
//! All writers:
//! - clamp each channel to [0, 1]
//! - optionally apply gamma correction `c^(1/2.2)`
//! - quantise with `(255.999 * c) as u8`

use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use log::{debug, info};
use prism_math::Interval;
use thiserror::Error;

use crate::Color;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no PNG converter found on PATH (tried pnmtopng, convert)")]
    ConverterMissing,

    #[error("{tool} exited unsuccessfully ({status})")]
    ConverterFailed { tool: &'static str, status: ExitStatus },

    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Display gamma used when gamma correction is enabled.
const DISPLAY_GAMMA: f32 = 2.2;

/// Converters tried in order for PNG output.
const PNG_CONVERTERS: [&str; 2] = ["pnmtopng", "convert"];

/// Write `pixels` (row-major, top row first) to `path`.
///
/// The format is chosen from the extension, case-insensitively: `.ppm` and
/// `.png` are written as such; anything else is written as PPM to
/// `<path>.ppm`. Returns the path of the file actually written.
pub fn write_image(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    pixels: &[Color],
    gamma: bool,
) -> OutputResult<PathBuf> {
    let path = path.as_ref();
    let target = match extension_lowercase(path).as_deref() {
        Some("ppm") => {
            write_ppm(path, width, height, pixels, gamma)?;
            path.to_path_buf()
        }
        Some("png") => {
            write_png(path, width, height, pixels, gamma)?;
            path.to_path_buf()
        }
        _ => {
            let mut fallback = path.as_os_str().to_owned();
            fallback.push(".ppm");
            let fallback = PathBuf::from(fallback);
            write_ppm(&fallback, width, height, pixels, gamma)?;
            fallback
        }
    };

    info!("Image saved as {}", target.display());
    Ok(target)
}

/// Write a plain-text PPM (`P3`) file.
pub fn write_ppm(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    pixels: &[Color],
    gamma: bool,
) -> OutputResult<()> {
    let path = path.as_ref();
    check_dimensions(width, height, pixels)?;
    create_parent_dir(path)?;

    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    encode_ppm(&mut writer, width, height, pixels, gamma).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    debug!("Wrote {}x{} PPM to {}", width, height, path.display());
    Ok(())
}

/// Write a PNG by converting a temporary PPM with an external tool.
///
/// Fails with [`OutputError::ConverterMissing`] when neither `pnmtopng` nor
/// `convert` can be found on `PATH`.
pub fn write_png(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    pixels: &[Color],
    gamma: bool,
) -> OutputResult<()> {
    write_png_searching(path.as_ref(), width, height, pixels, gamma, std::env::var_os("PATH"))
}

fn write_png_searching(
    path: &Path,
    width: u32,
    height: u32,
    pixels: &[Color],
    gamma: bool,
    search_path: Option<OsString>,
) -> OutputResult<()> {
    check_dimensions(width, height, pixels)?;

    let (tool, tool_path) = PNG_CONVERTERS
        .iter()
        .find_map(|tool| find_executable(tool, search_path.as_deref()).map(|p| (*tool, p)))
        .ok_or(OutputError::ConverterMissing)?;

    create_parent_dir(path)?;

    let temp = TempFile::new(
        std::env::temp_dir().join(format!("rt_tmp_{}.ppm", std::process::id())),
    );
    write_ppm(temp.path(), width, height, pixels, gamma)?;

    debug!("Converting {} with {}", temp.path().display(), tool_path.display());

    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    if tool == "pnmtopng" {
        // pnmtopng writes the PNG to stdout
        let out = File::create(path).map_err(io_err)?;
        let status = Command::new(&tool_path)
            .arg(temp.path())
            .stdout(Stdio::from(out))
            .stderr(Stdio::null())
            .status();

        let result = check_status(tool, status.map_err(io_err));
        if result.is_err() {
            // Drop the empty or truncated PNG
            let _ = fs::remove_file(path);
        }
        result
    } else {
        let status = Command::new(&tool_path)
            .arg(temp.path())
            .arg(path)
            .stderr(Stdio::null())
            .status();
        check_status(tool, status.map_err(io_err))
    }
}

fn check_status(tool: &'static str, status: OutputResult<ExitStatus>) -> OutputResult<()> {
    let status = status?;
    if !status.success() {
        return Err(OutputError::ConverterFailed { tool, status });
    }
    Ok(())
}

/// Serialise pixels as PPM `P3` text.
pub fn encode_ppm<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    pixels: &[Color],
    gamma: bool,
) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")?;

    for color in pixels {
        let [r, g, b] = color_to_rgb8(*color, gamma);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }
    Ok(())
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color, gamma: bool) -> [u8; 3] {
    color.to_array().map(|c| {
        let mut c = Interval::UNIT.clamp(c);
        if gamma {
            c = c.powf(1.0 / DISPLAY_GAMMA);
        }
        (255.999 * c) as u8
    })
}

fn check_dimensions(width: u32, height: u32, pixels: &[Color]) -> OutputResult<()> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(OutputError::DimensionMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> OutputResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
}

/// Look up an executable by name in a `PATH`-style list of directories.
fn find_executable(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    std::env::split_paths(search_path?)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// A file removed when dropped.
struct TempFile(PathBuf);

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self(path)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}
