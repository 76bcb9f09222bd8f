//! Saving the canvas buffer to an image file.

use crate::buffer::CanvasBuffer;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

/// Largest icon side the ICO container can hold.
const MAX_ICON_SIDE: u32 = 256;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown image format: {0}")]
    UnknownFormat(String),
    #[error("Unsupported image format: {0}")]
    Unsupported(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Encode error: {0}")]
    Encode(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// File formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Bmp,
    Png,
    Ico,
    /// Windows metafile; recognised but cannot be produced from pixels.
    Wmf,
}

impl ImageFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> ExportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "bmp" => Ok(ImageFormat::Bmp),
            "png" => Ok(ImageFormat::Png),
            "ico" => Ok(ImageFormat::Ico),
            "wmf" => Ok(ImageFormat::Wmf),
            _ => Err(ExportError::UnknownFormat(path.display().to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Bmp => "bmp",
            ImageFormat::Png => "png",
            ImageFormat::Ico => "ico",
            ImageFormat::Wmf => "wmf",
        }
    }
}

/// Writes a canvas buffer to disk.
pub trait ImageEncoder {
    fn encode(&self, image: &CanvasBuffer, path: &Path) -> ExportResult<()>;
}

/// Default encoder: `png` for PNG files, `image` for BMP and ICO.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileEncoder;

impl ImageEncoder for FileEncoder {
    fn encode(&self, image: &CanvasBuffer, path: &Path) -> ExportResult<()> {
        let format = ImageFormat::from_path(path)?;
        match format {
            ImageFormat::Png => write_png(image, path)?,
            ImageFormat::Bmp => write_with_image(image, path, image::ImageFormat::Bmp)?,
            ImageFormat::Ico => write_with_image(image, path, image::ImageFormat::Ico)?,
            ImageFormat::Wmf => {
                return Err(ExportError::Unsupported(
                    "metafiles cannot be written from a pixel buffer".to_string(),
                ));
            }
        }
        log::info!(
            "Saved {}x{} {} to {}",
            image.width(),
            image.height(),
            format.extension(),
            path.display()
        );
        Ok(())
    }
}

fn write_png(image: &CanvasBuffer, path: &Path) -> ExportResult<()> {
    let file = File::create(path).map_err(|e| ExportError::Io(e.to_string()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| ExportError::Encode(format!("PNG header: {}", e)))?;
    writer
        .write_image_data(&image.to_rgb_bytes())
        .map_err(|e| ExportError::Encode(format!("PNG data: {}", e)))?;
    writer
        .finish()
        .map_err(|e| ExportError::Encode(format!("PNG finish: {}", e)))
}

fn write_with_image(image: &CanvasBuffer, path: &Path, format: image::ImageFormat) -> ExportResult<()> {
    let mut rgba = image::RgbaImage::from_raw(image.width(), image.height(), image.rgba_data().to_vec())
        .ok_or_else(|| ExportError::Encode("pixel buffer size mismatch".to_string()))?;
    if format == image::ImageFormat::Ico {
        let (width, height) = icon_size(image.width(), image.height());
        if (width, height) != rgba.dimensions() {
            log::debug!(
                "Scaling {}x{} canvas to a {}x{} icon",
                image.width(),
                image.height(),
                width,
                height
            );
            rgba = image::imageops::resize(&rgba, width, height, image::imageops::FilterType::Nearest);
        }
    }
    rgba.save_with_format(path, format).map_err(|e| match e {
        image::ImageError::IoError(io) => ExportError::Io(io.to_string()),
        other => ExportError::Encode(other.to_string()),
    })
}

/// Fit `width` x `height` inside the icon limit, keeping the aspect ratio.
fn icon_size(width: u32, height: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= MAX_ICON_SIDE {
        return (width, height);
    }
    let scale = |side: u32| ((side as u64 * MAX_ICON_SIDE as u64 / longest as u64) as u32).max(1);
    (scale(width), scale(height))
}
