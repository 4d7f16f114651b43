use anyhow::{Result, anyhow};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::config::ThumbnailSize;

/// Suffix inserted between the stem and the extension of a thumbnail filename.
pub const THUMB_SUFFIX: &str = "_thumb";

/// Derives the thumbnail filename for an uploaded original.
///
/// `a.jpg` becomes `a_thumb.jpg`. The split follows the usual "last dot, ignoring
/// leading dots" rule, so `a.b.png` gives `a.b_thumb.png` and `.hidden` gives
/// `.hidden_thumb`. Upload and cleanup both go through this function; the result
/// is never stored.
pub fn thumbname(original: &str) -> String {
    let (stem, ext) = split_extension(original);
    format!("{}{}{}", stem, THUMB_SUFFIX, ext)
}

/// Splits `name` into `(stem, ".ext")`; the extension is empty when there is none.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name[leading_dots..].rfind('.') {
        Some(idx) => name.split_at(leading_dots + idx),
        None => (name, ""),
    }
}

pub struct ThumbnailService;

impl ThumbnailService {
    /// Decodes `data` and renders a thumbnail encoded in the format implied by
    /// `filename`'s extension.
    pub fn generate_thumbnail(data: &[u8], filename: &str, size: ThumbnailSize) -> Result<Vec<u8>> {
        let format = ImageFormat::from_path(filename)
            .map_err(|_| anyhow!("Cannot infer image format from '{}'", filename))?;

        let img = image::load_from_memory(data)
            .map_err(|e| anyhow!("Failed to load image: {}", e))?;

        let thumbnail = Self::resize(&img, size);
        Self::encode(&thumbnail, format)
    }

    pub fn resize(img: &DynamicImage, size: ThumbnailSize) -> DynamicImage {
        if size.force {
            img.resize_to_fill(size.width, size.height, FilterType::Lanczos3)
        } else if img.width() <= size.width && img.height() <= size.height {
            img.clone()
        } else {
            img.thumbnail(size.width, size.height)
        }
    }

    fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        // The extension picks the encoder, so the buffer must suit it whatever was uploaded.
        let img = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
            ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8()),
            // No grey+alpha TIFF layout
            ImageFormat::Tiff if img.color() == image::ColorType::La8 => {
                DynamicImage::ImageRgba8(img.to_rgba8())
            }
            // 8-bit buffers only
            _ => match img.color() {
                image::ColorType::Rgba16 | image::ColorType::La16 | image::ColorType::Rgba32F => {
                    DynamicImage::ImageRgba8(img.to_rgba8())
                }
                image::ColorType::Rgb16 | image::ColorType::L16 | image::ColorType::Rgb32F => {
                    DynamicImage::ImageRgb8(img.to_rgb8())
                }
                _ => img.clone(),
            },
        };

        let mut out_data = Vec::new();
        img.write_to(&mut Cursor::new(&mut out_data), format)
            .map_err(|e| anyhow!("Failed to encode {:?} thumbnail: {}", format, e))?;
        Ok(out_data)
    }
}
