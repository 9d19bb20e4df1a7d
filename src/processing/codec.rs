use image::{
    DynamicImage, ImageError, ImageFormat, ImageReader, codecs::jpeg::JpegEncoder,
    imageops::FilterType,
};
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

use super::dimensions::target_dimensions;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Unable to identify image file")]
    Unidentified,
    #[error("Failed to read image data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image (format: {format:?}): {source}")]
    Decode {
        format: ImageFormat,
        source: ImageError,
    },
    #[error("Failed to encode image (format: {format:?}): {source}")]
    Encode {
        format: ImageFormat,
        source: ImageError,
    },
}

/// A decoded image together with the container format it was read from.
/// The format is what the image is written back as.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

impl DecodedImage {
    /// Detects the format from the content itself, ignoring the filename,
    /// then decodes the first frame.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let format = reader.format().ok_or(CodecError::Unidentified)?;

        let image = reader
            .decode()
            .map_err(|source| CodecError::Decode { format, source })?;

        debug!(
            "Decoded {:?} image: {}x{} {:?}",
            format,
            image.width(),
            image.height(),
            image.color()
        );

        Ok(Self { image, format })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Shrinks the image so neither side exceeds `max_size`.
    /// Images that already fit are returned untouched.
    pub fn fit_within(self, max_size: u32) -> Self {
        let (width, height) = self.dimensions();
        let (new_width, new_height) = target_dimensions(width, height, max_size);
        if (new_width, new_height) == (width, height) {
            return self;
        }

        debug!(
            "Resizing {}x{} to {}x{}",
            width, height, new_width, new_height
        );

        Self {
            image: self
                .image
                .resize_exact(new_width, new_height, FilterType::Lanczos3),
            format: self.format,
        }
    }

    /// Encodes the image in its original format.
    /// `quality` applies to JPEG; lossless formats ignore it.
    pub fn encode(&self, quality: u8) -> Result<Vec<u8>, CodecError> {
        let format = self.format;
        let mut buffer = Cursor::new(Vec::new());

        let result = match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
                self.image.write_with_encoder(encoder)
            }
            _ => self.image.write_to(&mut buffer, format),
        };
        result.map_err(|source| CodecError::Encode { format, source })?;

        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
pub(crate) mod test_images {
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encodes a gradient image of the given size in `format`.
    pub fn encoded(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let image = if format == ImageFormat::Gif {
            DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
                Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
            }))
        } else {
            DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
                Rgb([(x % 256) as u8, (y % 256) as u8, 64])
            }))
        };

        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }
}
