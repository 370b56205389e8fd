use crate::color::Color;
use log::debug;
use png::{BitDepth, ColorType, Encoder, EncodingError};
use std::convert::TryFrom;
use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Error)]
pub enum PngWriteError {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Pixel buffer holds {actual} colors, but the image needs {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Failed to open {} for writing", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("PNG encoder failed")]
    Encoder(#[source] EncodingError),
    #[error("Failed to write PNG data")]
    Write(#[source] io::Error),
    #[error("Failed to move the finished PNG to {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<EncodingError> for PngWriteError {
    fn from(err: EncodingError) -> PngWriteError {
        match err {
            EncodingError::IoError(io_err) => PngWriteError::Write(io_err),
            other => PngWriteError::Encoder(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, PngWriteError>;

/// Writes `colors` (row-major, `width * height` entries) to `path` as an 8-bit RGBA PNG.
///
/// The image is written to a fresh temporary file next to `path` and only
/// renamed into place once it is complete, so a failed call never leaves a
/// truncated PNG at `path`. An existing destination must be a writable file;
/// its permissions carry over to the new image.
pub fn write_png<P>(path: P, colors: &[Color], width: usize, height: usize) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    check_dimensions(colors, width, height)?;
    debug!("Writing a {}x{} PNG to {}", width, height, path.display());

    write_atomically(path, |writer| encode_png(writer, colors, width, height))
}

pub fn to_png_bytes(colors: &[Color], width: usize, height: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_png(&mut buf, colors, width, height)?;
    Ok(buf)
}

/// Encodes `colors` into `sink`, one row at a time.
pub fn encode_png<W>(sink: W, colors: &[Color], width: usize, height: usize) -> Result<()>
where
    W: Write,
{
    let (png_width, png_height) = check_dimensions(colors, width, height)?;

    let mut png_encoder = Encoder::new(sink, png_width, png_height);
    png_encoder.set_color(ColorType::Rgba);
    png_encoder.set_depth(BitDepth::Eight);
    let mut png_writer = png_encoder.write_header()?;
    let mut stream = png_writer.stream_writer()?;

    let mut row = Vec::with_capacity(width * BYTES_PER_PIXEL);
    for line in colors.chunks_exact(width) {
        row.clear();
        for color in line {
            row.extend_from_slice(&color.to_rgba8());
        }
        stream.write_all(&row).map_err(PngWriteError::Write)?;
    }

    stream.finish()?;
    png_writer.finish()?;
    Ok(())
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let permissions = destination_permissions(path)?;

    let tmp_path = temporary_path(path);
    let tmp_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| PngWriteError::Create {
            path: tmp_path.clone(),
            source,
        })?;

    let result = finish_file(tmp_file, write, permissions).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|source| PngWriteError::Persist {
            path: path.to_owned(),
            source,
        })
    });

    if result.is_err() {
        // `create_new` succeeded above, so this file is ours to remove.
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn finish_file<F>(file: File, write: F, permissions: Option<Permissions>) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    let file = writer
        .into_inner()
        .map_err(|err| PngWriteError::Write(err.into_error()))?;
    if let Some(permissions) = permissions {
        file.set_permissions(permissions).map_err(PngWriteError::Write)?;
    }
    Ok(())
}

/// Permissions of an existing destination, which must be a writable regular file.
fn destination_permissions(path: &Path) -> Result<Option<Permissions>> {
    let refuse = |kind: io::ErrorKind, reason: &str| PngWriteError::Create {
        path: path.to_owned(),
        source: io::Error::new(kind, reason),
    };

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(ref err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PngWriteError::Create {
                path: path.to_owned(),
                source,
            })
        }
    };

    if metadata.is_dir() {
        return Err(refuse(io::ErrorKind::Other, "destination is a directory"));
    }
    if metadata.permissions().readonly() {
        return Err(refuse(io::ErrorKind::PermissionDenied, "destination is read-only"));
    }
    Ok(Some(metadata.permissions()))
}

fn check_dimensions(colors: &[Color], width: usize, height: usize) -> Result<(u32, u32)> {
    let invalid = || PngWriteError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    let png_width = u32::try_from(width).map_err(|_| invalid())?;
    let png_height = u32::try_from(height).map_err(|_| invalid())?;

    let expected = width.checked_mul(height).ok_or_else(invalid)?;
    if colors.len() != expected {
        return Err(PngWriteError::SizeMismatch {
            expected,
            actual: colors.len(),
        });
    }
    Ok((png_width, png_height))
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(format!(".{}.tmp", std::process::id()));
    PathBuf::from(tmp_path)
}
