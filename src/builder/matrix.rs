use std::ops::Deref;

use crate::common::metadata::Color;

// Module
//------------------------------------------------------------------------------

/// A single cell packed into 2 bits: bit 0 is the color, bit 1 marks cells
/// owned by function patterns, format or version information.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Module(u8);

impl Module {
    const DARK_BIT: u8 = 0b01;
    const RESERVED_BIT: u8 = 0b10;

    pub const LIGHT: Module = Module(0);
    pub const DARK: Module = Module(Self::DARK_BIT);

    pub const fn new(color: Color, reserved: bool) -> Self {
        let clr = match color {
            Color::Light => 0,
            Color::Dark => Self::DARK_BIT,
        };
        let rsv = if reserved { Self::RESERVED_BIT } else { 0 };
        Self(clr | rsv)
    }

    pub const fn func(color: Color) -> Self {
        Self::new(color, true)
    }

    pub const fn is_dark(self) -> bool {
        self.0 & Self::DARK_BIT != 0
    }

    pub const fn is_light(self) -> bool {
        !self.is_dark()
    }

    pub const fn is_reserved(self) -> bool {
        self.0 & Self::RESERVED_BIT != 0
    }

    const fn bits(self) -> u8 {
        self.0
    }

    const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        if self.is_dark() {
            &Color::Dark
        } else {
            &Color::Light
        }
    }
}

// Module matrix
//------------------------------------------------------------------------------

/// Row major grid of 2 bit modules, four per byte. Clones are deep copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    grid: Box<[u8]>,
    w: usize,
}

impl ModuleMatrix {
    pub fn new(width: usize) -> Self {
        debug_assert!(
            (21..=177).contains(&width) && (width - 21) % 4 == 0,
            "Invalid width {width}"
        );
        let len = (width * width + 3) / 4;
        Self { grid: vec![0; len].into_boxed_slice(), w: width }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    /// Size of the packed buffer in bytes.
    pub fn packed_len(&self) -> usize {
        self.grid.len()
    }

    pub fn count_dark_modules(&self) -> usize {
        let cells = self.w * self.w;
        let full = cells / 4;
        let mut cnt = self.grid[..full]
            .iter()
            .map(|b| (b & 0b0101_0101).count_ones() as usize)
            .sum::<usize>();
        for idx in full * 4..cells {
            cnt += self.module_at(idx).is_dark() as usize;
        }
        cnt
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let m = self.get(i, j);
                let c = match (m.is_reserved(), *m) {
                    (false, Color::Light) => '.',
                    (false, Color::Dark) => 'd',
                    (true, Color::Light) => 'F',
                    (true, Color::Dark) => 'f',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        r as usize * self.w + c as usize
    }

    fn module_at(&self, idx: usize) -> Module {
        Module::from_bits(self.grid[idx >> 2] >> ((idx & 3) << 1))
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.module_at(self.coord_to_index(r, c))
    }

    pub fn is_dark(&self, r: i16, c: i16) -> bool {
        self.get(r, c).is_dark()
    }

    pub fn is_light(&self, r: i16, c: i16) -> bool {
        !self.is_dark(r, c)
    }

    pub fn is_reserved(&self, r: i16, c: i16) -> bool {
        self.get(r, c).is_reserved()
    }

    /// Writes a module. Without `overwrite` the bits are OR'ed into the cell,
    /// so a dark or reserved cell stays dark or reserved.
    pub fn set(&mut self, r: i16, c: i16, module: Module, overwrite: bool) {
        let idx = self.coord_to_index(r, c);
        let shift = (idx & 3) << 1;
        let byte = &mut self.grid[idx >> 2];
        if overwrite {
            *byte &= !(0b11 << shift);
        }
        *byte |= module.bits() << shift;
    }

    /// Inverts the color of a cell, leaving the reserved flag untouched.
    pub fn flip_color(&mut self, r: i16, c: i16) {
        let idx = self.coord_to_index(r, c);
        self.grid[idx >> 2] ^= Module::DARK_BIT << ((idx & 3) << 1);
    }
}

#[cfg(test)]
mod matrix_tests {
    use super::{Module, ModuleMatrix};
    use crate::common::metadata::{Color, Version};

    #[test]
    fn test_packed_len() {
        for v in Version::all() {
            let w = v.width();
            assert_eq!(ModuleMatrix::new(w).packed_len(), (w * w + 3) / 4);
        }
        assert_eq!(ModuleMatrix::new(21).packed_len(), 111);
    }

    #[test]
    fn test_module_bits() {
        let m = Module::new(Color::Dark, true);
        assert!(m.is_dark() && m.is_reserved());
        assert_eq!(*m, Color::Dark);
        assert!(!Module::LIGHT.is_dark() && !Module::LIGHT.is_reserved());
        assert!(Module::LIGHT.is_light() && Module::func(Color::Light).is_light());
        assert!(!m.is_light() && !Module::DARK.is_light());
        assert!(Module::DARK.is_dark() && !Module::DARK.is_reserved());
        assert_eq!(Module::func(Color::Light), Module::new(Color::Light, true));
    }

    #[test]
    fn test_index_wrap() {
        let mut mat = ModuleMatrix::new(21);
        let w = mat.width() as i16;
        mat.set(-1, -1, Module::func(Color::Dark), true);
        assert_eq!(mat.get(w - 1, w - 1), Module::func(Color::Dark));
        mat.set(0, 0, Module::DARK, true);
        assert_eq!(mat.get(-w, -w), Module::DARK);
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_bound() {
        let mat = ModuleMatrix::new(21);
        let w = mat.width() as i16;
        mat.get(w, 0);
    }

    #[test]
    #[should_panic]
    fn test_col_index_overwrap() {
        let mat = ModuleMatrix::new(21);
        let w = mat.width() as i16;
        mat.get(0, -(w + 1));
    }

    #[test]
    fn test_set_or_and_overwrite() {
        let mut mat = ModuleMatrix::new(21);
        mat.set(3, 4, Module::func(Color::Light), false);
        mat.set(3, 4, Module::DARK, false);
        assert_eq!(mat.get(3, 4), Module::func(Color::Dark));
        mat.set(3, 4, Module::LIGHT, false);
        assert_eq!(mat.get(3, 4), Module::func(Color::Dark));
        mat.set(3, 4, Module::LIGHT, true);
        assert_eq!(mat.get(3, 4), Module::LIGHT);
    }

    #[test]
    fn test_neighbours_untouched() {
        let mut mat = ModuleMatrix::new(21);
        mat.set(0, 1, Module::func(Color::Dark), true);
        assert!(mat.is_light(0, 0) && !mat.is_reserved(0, 0));
        assert!(mat.is_light(0, 2) && !mat.is_reserved(0, 2));
        mat.set(0, 0, Module::DARK, true);
        mat.set(0, 2, Module::DARK, true);
        mat.set(0, 1, Module::LIGHT, true);
        assert!(mat.is_dark(0, 0) && mat.is_dark(0, 2) && mat.is_light(0, 1));
    }

    #[test]
    fn test_flip_color() {
        let mut mat = ModuleMatrix::new(21);
        mat.set(5, 5, Module::func(Color::Light), true);
        mat.flip_color(5, 5);
        assert_eq!(mat.get(5, 5), Module::func(Color::Dark));
        mat.flip_color(-1, -1);
        assert_eq!(mat.get(20, 20), Module::DARK);
        mat.flip_color(-1, -1);
        assert_eq!(mat.get(20, 20), Module::LIGHT);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut mat = ModuleMatrix::new(25);
        mat.set(1, 1, Module::DARK, true);
        let mut copy = mat.clone();
        copy.flip_color(1, 1);
        copy.set(2, 2, Module::DARK, true);
        assert!(mat.is_dark(1, 1) && mat.is_light(2, 2));
        assert!(copy.is_light(1, 1) && copy.is_dark(2, 2));
    }

    #[test]
    fn test_count_dark_modules() {
        let mut mat = ModuleMatrix::new(21);
        assert_eq!(mat.count_dark_modules(), 0);
        mat.set(0, 0, Module::func(Color::Dark), true);
        mat.set(10, 10, Module::func(Color::Light), true);
        mat.set(-1, -1, Module::DARK, true);
        assert_eq!(mat.count_dark_modules(), 2);
    }
}
