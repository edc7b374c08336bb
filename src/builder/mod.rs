mod cache;
mod matrix;
mod placement;
mod sequence;
mod template;

pub use cache::TemplateCache;
pub use matrix::{Module, ModuleMatrix};
pub use placement::{codeword_placements, CodewordPlacement};
pub use sequence::{build_message_sequence, frame, interleave, select_version, MessageSequence};
pub use template::SymbolTemplate;

use image::{Rgba, RgbaImage};

use crate::common::{
    config,
    error::{QRError, QRResult},
    macros::qr_debug,
    mask::apply_best_mask,
    metadata::ECLevel,
};
use crate::render::render;

pub const DEFAULT_DIMENSIONS: u32 = 100;
pub const DEFAULT_BORDER: usize = 4;
pub const DEFAULT_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 0]);
pub const DEFAULT_FOREGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub struct QRBuilder<'a> {
    data: &'a [u8],
    ec_level: ECLevel,
    dimensions: u32,
    border: usize,
    background: Rgba<u8>,
    foreground: Rgba<u8>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            ec_level: ECLevel::default(),
            dimensions: DEFAULT_DIMENSIONS,
            border: DEFAULT_BORDER,
            background: DEFAULT_BACKGROUND,
            foreground: DEFAULT_FOREGROUND,
        }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Minimum level wanted. The symbol may end up stronger if the chosen version
    /// has room for it.
    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Width and height of the rendered image in pixels.
    pub fn dimensions(&mut self, dimensions: u32) -> &mut Self {
        self.dimensions = dimensions;
        self
    }

    /// Quiet zone in modules, raised to 4 when smaller.
    pub fn border(&mut self, border: usize) -> &mut Self {
        self.border = border;
        self
    }

    pub fn background(&mut self, background: Rgba<u8>) -> &mut Self {
        self.background = background;
        self
    }

    pub fn foreground(&mut self, foreground: Rgba<u8>) -> &mut Self {
        self.foreground = foreground;
        self
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Ec level: {:?}, Dimensions: {}, Border: {} }}",
            self.ec_level,
            self.dimensions,
            self.border.max(DEFAULT_BORDER)
        )
    }
}


// Build
//------------------------------------------------------------------------------

impl QRBuilder<'_> {
    /// Encodes the payload into a finished symbol.
    pub fn build(&self) -> QRResult<SymbolTemplate> {
        validate(self.data)?;
        qr_debug!("generating {}", self.metadata());

        let raw = frame(self.data, self.ec_level);
        let seq = build_message_sequence(&raw, self.ec_level)?;
        qr_debug!(
            "{} payload bytes framed into {}, version {} at {:?}",
            self.data.len(),
            raw.len(),
            *seq.version,
            seq.ec_level
        );

        let mut tmpl = TemplateCache::global().get(seq.version);
        tmpl.populate(&seq.codewords);
        let mask = apply_best_mask(&mut tmpl);
        tmpl.apply_format_info(seq.ec_level, mask);

        if config::debug_enabled() {
            let w = tmpl.width();
            let total_modules = w * w;
            let dark_modules = tmpl.count_dark_modules();
            qr_debug!(
                "dark cells: {}, light cells: {}, balance: {}%",
                dark_modules,
                total_modules - dark_modules,
                dark_modules * 100 / total_modules
            );
        }

        Ok(tmpl)
    }

    /// Encodes and renders the payload with the configured size and colors.
    pub fn render(&self) -> QRResult<RgbaImage> {
        let tmpl = self.build()?;
        render(&tmpl, self.dimensions, self.border, self.background, self.foreground)
    }
}

fn validate(data: &[u8]) -> QRResult<()> {
    if data.is_empty() {
        return Err(QRError::EmptyData);
    }
    if !data.iter().all(|b| (0x20..=0x7E).contains(b)) {
        return Err(QRError::InvalidChar);
    }
    Ok(())
}

/// Single call encoder: payload in, `dimensions x dimensions` RGBA image out.
pub fn encode(
    payload: &[u8],
    ec_level: ECLevel,
    dimensions: u32,
    border: usize,
    background: Rgba<u8>,
    foreground: Rgba<u8>,
) -> QRResult<RgbaImage> {
    QRBuilder::new(payload)
        .ec_level(ec_level)
        .dimensions(dimensions)
        .border(border)
        .background(background)
        .foreground(foreground)
        .render()
}
