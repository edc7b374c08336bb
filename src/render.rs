use std::io::{Cursor, Seek, Write};
use std::path::Path;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::builder::SymbolTemplate;
use crate::common::error::{QRError, QRResult};

/// Smallest quiet zone, in modules, that readers can rely on.
pub const MIN_BORDER: usize = 4;

// Render
//------------------------------------------------------------------------------

/// Draws the symbol on a `dimensions x dimensions` canvas with a quiet zone of
/// `border` modules. Modules are drawn at the largest whole pixel size that fits
/// and the canvas is then resampled, nearest neighbour, to the exact size. When
/// a module would be smaller than a pixel, each pixel samples its module directly.
pub fn render(
    tmpl: &SymbolTemplate,
    dimensions: u32,
    border: usize,
    background: Rgba<u8>,
    foreground: Rgba<u8>,
) -> QRResult<RgbaImage> {
    if dimensions == 0 {
        return Err(QRError::InvalidDimensions);
    }

    let border = border.max(MIN_BORDER);
    let w = tmpl.width();
    let total_modules = (w as u64).saturating_add((border as u64).saturating_mul(2));
    if total_modules > dimensions as u64 {
        return Ok(render_sampled(tmpl, dimensions, border, total_modules, background, foreground));
    }

    let module_sz = dimensions / total_modules as u32;
    let canvas_sz = module_sz * total_modules as u32;

    let mut canvas = RgbaImage::from_pixel(canvas_sz, canvas_sz, background);
    for r in 0..w {
        for c in 0..w {
            if !tmpl.get(r as i16, c as i16).is_dark() {
                continue;
            }
            let x = ((border + c) as u32 * module_sz) as i32;
            let y = ((border + r) as u32 * module_sz) as i32;
            draw_filled_rect_mut(&mut canvas, Rect::at(x, y).of_size(module_sz, module_sz), foreground);
        }
    }

    if canvas_sz != dimensions {
        canvas = imageops::resize(&canvas, dimensions, dimensions, FilterType::Nearest);
    }
    Ok(canvas)
}

// Pixel p shows module p * total_modules / dimensions, quiet zone included
fn render_sampled(
    tmpl: &SymbolTemplate,
    dimensions: u32,
    border: usize,
    total_modules: u64,
    background: Rgba<u8>,
    foreground: Rgba<u8>,
) -> RgbaImage {
    let w = tmpl.width() as u128;
    let border = border as u128;
    let module_of = |p: u32| {
        (p as u128 * total_modules as u128 / dimensions as u128).checked_sub(border).filter(|&m| m < w)
    };

    let mut canvas = RgbaImage::from_pixel(dimensions, dimensions, background);
    for y in 0..dimensions {
        let Some(r) = module_of(y) else { continue };
        for x in 0..dimensions {
            let Some(c) = module_of(x) else { continue };
            if tmpl.get(r as i16, c as i16).is_dark() {
                canvas.put_pixel(x, y, foreground);
            }
        }
    }
    canvas
}

/// Text rendering for terminals, light modules as full blocks.
pub fn to_str(tmpl: &SymbolTemplate, module_sz: usize) -> String {
    let qz_sz = MIN_BORDER * module_sz;
    let qr_sz = tmpl.width() * module_sz;
    let total_sz = qz_sz + qr_sz + qz_sz;

    let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
    for i in 0..total_sz {
        for j in 0..total_sz {
            if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                canvas.push('█');
                continue;
            }
            let r = ((i - qz_sz) / module_sz) as i16;
            let c = ((j - qz_sz) / module_sz) as i16;
            canvas.push(tmpl.get(r, c).select('█', ' '));
        }
        canvas.push('\n');
    }

    canvas
}


// Image container
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Picks the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> QRResult<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or(QRError::UnsupportedFormat)?
            .parse()
    }

    fn codec(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "image/png" => Ok(Self::Png),
            "jpeg" | "jpg" | "image/jpeg" => Ok(Self::Jpeg),
            _ => Err(QRError::UnsupportedFormat),
        }
    }
}

/// Encodes the image into the bytes of a PNG or JPEG file.
pub fn encode_image(img: &RgbaImage, format: ImageFormat) -> QRResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    write_image(img, format, &mut buf)?;
    Ok(buf.into_inner())
}

/// Writes the image to `sink`. JPEG has no alpha channel, so it's dropped.
pub fn write_image<W: Write + Seek>(img: &RgbaImage, format: ImageFormat, sink: &mut W) -> QRResult<()> {
    let res = match format {
        ImageFormat::Png => img.write_to(sink, format.codec()),
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            rgb.write_to(sink, format.codec())
        }
    };
    res.map_err(|_| QRError::ImageEncodingFailed)
}
