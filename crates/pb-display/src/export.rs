// SPDX-License-Identifier: MIT
//
// Frame export: rasterize a SimulatedDisplay into an image file.
//
// Each source pixel becomes an N×N block of identical 24-bit pixels,
// where N is the display's pixel scale. RGB565 fields are expanded
// proportionally to 8 bits per channel.
//
// Files are written to a temporary sibling in the destination directory
// and renamed into place once fully encoded. A failed export leaves no
// file behind and never touches the framebuffer.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use tempfile::NamedTempFile;

use crate::sim::SimulatedDisplay;

/// Why a frame could not be written.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot write frame: {0}")]
    Io(#[from] io::Error),

    #[error("cannot encode frame: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported frame format `{0}` (expected ppm or png)")]
    UnsupportedFormat(String),

    #[error("frame of {width}x{height} at scale {scale} is too large to rasterize")]
    TooLarge { width: i32, height: i32, scale: u32 },
}

/// Output encodings the simulator can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameFormat {
    /// Binary PPM (P6).
    #[default]
    Ppm,
    Png,
}

impl FrameFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Ppm => "ppm",
            Self::Png => "png",
        }
    }

    /// Pick a format from a path's extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl std::str::FromStr for FrameFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ppm" => Ok(Self::Ppm),
            "png" => Ok(Self::Png),
            _ => Err(ExportError::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl SimulatedDisplay {
    /// Render the framebuffer to an upscaled 24-bit image.
    ///
    /// # Errors
    ///
    /// [`ExportError::TooLarge`] when the scaled size does not fit in
    /// `u32` per side or in memory addressable as one RGB buffer.
    pub fn to_image(&self) -> Result<RgbImage, ExportError> {
        use crate::display::Display;

        let scale = self.pixel_scale();
        let too_large = || ExportError::TooLarge {
            width: self.width(),
            height: self.height(),
            scale,
        };
        #[allow(clippy::cast_sign_loss)] // dimensions are never negative
        let (w, h) = (self.width() as u32, self.height() as u32);
        let out_w = w.checked_mul(scale).ok_or_else(too_large)?;
        let out_h = h.checked_mul(scale).ok_or_else(too_large)?;
        usize::try_from(out_w)
            .ok()
            .zip(usize::try_from(out_h).ok())
            .and_then(|(a, b)| a.checked_mul(b)?.checked_mul(3))
            .ok_or_else(too_large)?;

        Ok(RgbImage::from_fn(out_w, out_h, |ox, oy| {
            #[allow(clippy::cast_possible_wrap)] // bounded by the i32 surface size
            let (x, y) = ((ox / scale) as i32, (oy / scale) as i32);
            let (r, g, b) = self.pixel(x, y).to_rgb888();
            image::Rgb([r, g, b])
        }))
    }

    /// Write the current frame to `path`, format chosen by its extension.
    ///
    /// # Errors
    ///
    /// Fails if the extension is not `ppm`/`png`, if the destination
    /// directory cannot be written, or if encoding fails. No partial file
    /// is left at `path` in any of these cases.
    pub fn save_frame(&self, path: &Path) -> Result<(), ExportError> {
        let format = FrameFormat::from_path(path)?;
        self.save_frame_as(path, format)
    }

    /// Write the current frame to `path` in an explicit format.
    ///
    /// # Errors
    ///
    /// See [`SimulatedDisplay::save_frame`].
    pub fn save_frame_as(&self, path: &Path, format: FrameFormat) -> Result<(), ExportError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let img = self.to_image()?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut out = BufWriter::new(tmp.as_file_mut());
            encode(&img, format, &mut out)?;
            out.flush()?;
        }
        tmp.persist(path).map_err(|e| e.error)?;

        log::trace!("wrote {}x{} frame to {}", img.width(), img.height(), path.display());
        Ok(())
    }
}

fn encode<W: Write>(img: &RgbImage, format: FrameFormat, out: W) -> Result<(), ExportError> {
    let (w, h) = img.dimensions();
    match format {
        FrameFormat::Ppm => PnmEncoder::new(out)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
            .write_image(img.as_raw(), w, h, ExtendedColorType::Rgb8)?,
        FrameFormat::Png => {
            PngEncoder::new(out).write_image(img.as_raw(), w, h, ExtendedColorType::Rgb8)?;
        }
    }
    Ok(())
}
