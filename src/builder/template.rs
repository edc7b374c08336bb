use std::sync::Arc;

use super::matrix::{Module, ModuleMatrix};
use super::placement::{codeword_placements, CodewordPlacement};
use crate::common::mask::MaskPattern;
use crate::common::metadata::{Color, ECLevel, Version};
use crate::common::version_db::{format_info, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN};

/// Structural skeleton of a symbol, and once populated, the finished symbol.
#[derive(Debug, Clone)]
pub struct SymbolTemplate {
    matrix: ModuleMatrix,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
    // Shared between clones, derived from the reserved layout which never changes
    placements: Arc<[CodewordPlacement]>,
}

// Symbol template
//------------------------------------------------------------------------------

impl SymbolTemplate {
    pub fn new(ver: Version) -> Self {
        let matrix = ModuleMatrix::new(ver.width());
        let mut tmpl =
            Self { matrix, ver, ecl: ECLevel::default(), mask: None, placements: Arc::from(Vec::new()) };
        tmpl.draw_timing_pattern();
        tmpl.draw_finder_patterns();
        tmpl.reserve_format_area();
        tmpl.draw_alignment_patterns();
        tmpl.draw_version_info();
        tmpl.placements = codeword_placements(&tmpl.matrix).into();
        tmpl
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.matrix.width()
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }

    pub fn placements(&self) -> &[CodewordPlacement] {
        &self.placements
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.matrix.get(r, c)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.matrix.count_dark_modules()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        self.matrix.to_debug_str()
    }
}

// Finder pattern
//------------------------------------------------------------------------------

impl SymbolTemplate {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 pattern centred at (r, c) along with its separator
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_left, dr_right) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_top, dc_bottom) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_left..=dr_right {
            for j in dc_top..=dc_bottom {
                let clr = match (i, j) {
                    (4 | -4, _) | (_, 4 | -4) => Color::Light,
                    (3 | -3, _) | (_, 3 | -3) => Color::Dark,
                    (2 | -2, _) | (_, 2 | -2) => Color::Light,
                    _ => Color::Dark,
                };
                self.matrix.set(r + i, c + j, Module::func(clr), true);
            }
        }
    }
}

#[cfg(test)]
mod finder_pattern_tests {
    use crate::builder::SymbolTemplate;
    use crate::common::metadata::Version;

    #[test]
    fn test_finder_corners() {
        let tmpl = SymbolTemplate::new(Version::new(2).unwrap());
        let w = tmpl.width() as i16;
        for (r, c) in [(0, 0), (0, w - 7), (w - 7, 0)] {
            for i in 0..7 {
                for j in 0..7 {
                    let outer = i == 0 || i == 6 || j == 0 || j == 6;
                    let core = (2..=4).contains(&i) && (2..=4).contains(&j);
                    let m = tmpl.get(r + i, c + j);
                    assert!(m.is_reserved());
                    assert_eq!(m.is_dark(), outer || core, "Module {} {}", r + i, c + j);
                }
            }
        }
        // Bottom right corner is free
        assert!(!tmpl.get(-1, -1).is_reserved());
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl SymbolTemplate {
    fn draw_timing_pattern(&mut self) {
        let w = self.matrix.width() as i16;
        self.draw_line(6, 0, 6, w - 1);
        self.draw_line(0, 6, w - 1, 6);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                let clr = Color::from(j & 1 == 0);
                self.matrix.set(r1, j, Module::func(clr), false);
            }
        } else {
            for i in r1..=r2 {
                let clr = Color::from(i & 1 == 0);
                self.matrix.set(i, c1, Module::func(clr), false);
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl SymbolTemplate {
    fn draw_alignment_patterns(&mut self) {
        for (r, c) in self.ver.alignment_pattern_centers() {
            self.draw_alignment_pattern_at(r, c)
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2 {
            for j in -2..=2 {
                let clr = match (i, j) {
                    (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Color::Dark,
                    _ => Color::Light,
                };
                self.matrix.set(r + i, c + j, Module::func(clr), false);
            }
        }
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl SymbolTemplate {
    fn reserve_format_area(&mut self) {
        for &(r, c) in FORMAT_INFO_COORDS_QR_MAIN.iter().chain(FORMAT_INFO_COORDS_QR_SIDE.iter()) {
            self.matrix.set(r, c, Module::func(Color::Light), false);
        }
        self.matrix.set(-8, 8, Module::func(Color::Light), false);
    }

    fn draw_version_info(&mut self) {
        let Some(ver_info) = self.ver.info() else { return };
        let w = self.matrix.width() as i16;
        for i in 0..VERSION_INFO_BIT_LEN as i16 {
            let clr = Color::from((ver_info >> i) & 1 == 1);
            let (a, b) = (i / 3, w - 11 + i % 3);
            self.matrix.set(a, b, Module::func(clr), true);
            self.matrix.set(b, a, Module::func(clr), true);
        }
    }

    /// Writes the format information for the level and mask in use, both copies.
    pub fn apply_format_info(&mut self, ecl: ECLevel, mask: MaskPattern) {
        self.ecl = ecl;
        self.mask = Some(mask);
        let info = format_info(ecl, mask);
        self.draw_number(info as u32, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_QR_MAIN);
        self.draw_number(info as u32, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_QR_SIDE);
        self.matrix.set(-8, 8, Module::func(Color::Dark), true);
    }

    fn draw_number(&mut self, number: u32, bit_len: usize, coords: &[(i16, i16)]) {
        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            let clr = Color::from(number & mask != 0);
            self.matrix.set(r, c, Module::func(clr), true);
            mask >>= 1;
        }
    }

    /// Reads back the main copy of the format information.
    pub fn read_format_info(&self) -> u16 {
        FORMAT_INFO_COORDS_QR_MAIN
            .iter()
            .fold(0, |acc, &(r, c)| (acc << 1) | self.matrix.is_dark(r, c) as u16)
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl SymbolTemplate {
    /// Writes codewords into the unreserved cells in placement order. Cells past
    /// the last codeword stay light.
    pub fn populate(&mut self, codewords: &[u8]) {
        debug_assert!(
            codewords.len() <= self.placements.len(),
            "Too many codewords: Capacity {}, Len {}",
            self.placements.len(),
            codewords.len()
        );

        let placements = Arc::clone(&self.placements);
        for (placement, &byte) in placements.iter().zip(codewords) {
            for ((r, c), dark) in placement.modules(byte) {
                self.matrix.set(r, c, Module::new(Color::from(dark), false), true);
            }
        }
    }

    /// Reads the codewords currently held by the unreserved cells.
    pub fn codewords(&self) -> Vec<u8> {
        self.placements.iter().map(|p| p.read(&self.matrix)).collect()
    }

    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        pattern.apply(&mut self.matrix);
    }

    pub(crate) fn set_masked_matrix(&mut self, matrix: ModuleMatrix, mask: MaskPattern) {
        debug_assert_eq!(matrix.width(), self.matrix.width(), "Width mismatch");
        self.matrix = matrix;
        self.mask = Some(mask);
    }
}

#[cfg(test)]
mod encoding_region_tests {
    use crate::builder::SymbolTemplate;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::Version;

    #[test]
    fn test_populate_and_read() {
        let v = Version::new(5).unwrap();
        let mut tmpl = SymbolTemplate::new(v);
        let reserved_before = tmpl.clone();
        let codewords = (0..v.total_codewords()).map(|i| (i * 37 % 256) as u8).collect::<Vec<_>>();
        tmpl.populate(&codewords);
        assert_eq!(tmpl.codewords(), codewords);

        let w = tmpl.width() as i16;
        for r in 0..w {
            for c in 0..w {
                if reserved_before.get(r, c).is_reserved() {
                    assert_eq!(tmpl.get(r, c), reserved_before.get(r, c));
                }
            }
        }
    }

    #[test]
    fn test_mask_is_involution() {
        let v = Version::new(2).unwrap();
        let mut tmpl = SymbolTemplate::new(v);
        let codewords = vec![0xA5; v.total_codewords()];
        tmpl.populate(&codewords);
        let mask = MaskPattern::new(4).unwrap();
        tmpl.apply_mask(mask);
        assert_ne!(tmpl.codewords(), codewords);
        tmpl.apply_mask(mask);
        assert_eq!(tmpl.codewords(), codewords);
    }
}

// Global constants
//------------------------------------------------------------------------------

// Format info bit positions, most significant bit first, ISO/IEC 18004 Figure 25
pub static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];
