use std::ops::Deref;

use rayon::prelude::*;

use super::config;
use super::error::{QRError, QRResult};
use super::macros::qr_debug;
use crate::builder::{ModuleMatrix, SymbolTemplate};

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskingPattern),
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        debug_assert!(*self < 8, "Invalid pattern");

        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!(),
        }
    }

    /// Flips every unreserved module selected by the pattern.
    pub fn apply(self, matrix: &mut ModuleMatrix) {
        let mask_fn = self.mask_functions();
        let w = matrix.width() as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(r, c) && !matrix.is_reserved(r, c) {
                    matrix.flip_color(r, c);
                }
            }
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Masks the populated template with the lowest penalty pattern and returns it.
pub fn apply_best_mask(tmpl: &mut SymbolTemplate) -> MaskPattern {
    let parallel = config::parallel_masks() && *tmpl.version() >= config::parallel_min_version();
    let (mask, matrix, penalty) = best_mask(tmpl.matrix(), parallel);
    qr_debug!("mask {} selected with penalty {penalty} (parallel: {parallel})", *mask);
    tmpl.set_masked_matrix(matrix, mask);
    mask
}

// Ties go to the lowest pattern index in both modes
fn best_mask(matrix: &ModuleMatrix, parallel: bool) -> (MaskPattern, ModuleMatrix, u32) {
    let score = |m: MaskPattern| {
        let mut candidate = matrix.clone();
        m.apply(&mut candidate);
        (compute_total_penalty(&candidate), m, candidate)
    };
    let pick = |best: (u32, MaskPattern, ModuleMatrix), next: (u32, MaskPattern, ModuleMatrix)| {
        if (next.0, next.1) < (best.0, best.1) {
            next
        } else {
            best
        }
    };

    let scored = if parallel {
        (0..8u8).into_par_iter().map(|m| score(MaskPattern(m))).reduce_with(pick)
    } else {
        MaskPattern::all().map(score).reduce(pick)
    };
    match scored {
        Some((penalty, mask, candidate)) => (mask, candidate, penalty),
        None => unreachable!("There are always 8 mask candidates"),
    }
}

// Penalty
//------------------------------------------------------------------------------

pub fn compute_total_penalty(matrix: &ModuleMatrix) -> u32 {
    let adj_pen = compute_adjacent_penalty(matrix);
    let blk_pen = compute_block_penalty(matrix);
    let fp_pen_h = compute_finder_pattern_penalty(matrix, true);
    let fp_pen_v = compute_finder_pattern_penalty(matrix, false);
    let bal_pen = compute_balance_penalty(matrix);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Runs of 5 or more same colored modules score run length - 2
fn compute_adjacent_penalty(matrix: &ModuleMatrix) -> u32 {
    let mut pen = 0;
    let w = matrix.width();
    let mut cols = vec![(false, 0u32); w];
    for r in 0..w {
        let mut last = false;
        let mut consec_row_len = 0;
        for (c, col) in cols.iter_mut().enumerate() {
            let clr = matrix.is_dark(r as i16, c as i16);
            if c == 0 || last != clr {
                last = clr;
                consec_row_len = 0;
            }
            consec_row_len += 1;
            pen += run_penalty(consec_row_len);
            if r == 0 || col.0 != clr {
                col.0 = clr;
                col.1 = 0;
            }
            col.1 += 1;
            pen += run_penalty(col.1);
        }
    }
    pen
}

// Incremental score of a run reaching `len`
fn run_penalty(len: u32) -> u32 {
    match len {
        0..=4 => 0,
        5 => 3,
        _ => 1,
    }
}

fn compute_block_penalty(matrix: &ModuleMatrix) -> u32 {
    let mut pen = 0;
    let w = matrix.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = matrix.is_dark(r, c);
            if clr == matrix.is_dark(r + 1, c)
                && clr == matrix.is_dark(r, c + 1)
                && clr == matrix.is_dark(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// 1:1:3:1:1 finder-like pattern with 4 light modules on either side
fn compute_finder_pattern_penalty(matrix: &ModuleMatrix, is_hor: bool) -> u32 {
    const PATTERN: u16 = 0b101_1101_0000;
    const PATTERN_REV: u16 = 0b000_0101_1101;

    let mut pen = 0;
    let w = matrix.width() as i16;
    for i in 0..w {
        let mut window = 0u16;
        for j in 0..w {
            let dark = if is_hor { matrix.is_dark(i, j) } else { matrix.is_dark(j, i) };
            window = ((window << 1) | dark as u16) & 0x7FF;
            if j >= 10 && (window == PATTERN || window == PATTERN_REV) {
                pen += 40;
            }
        }
    }
    pen
}

fn compute_balance_penalty(matrix: &ModuleMatrix) -> u32 {
    let w = matrix.width();
    balance_penalty(matrix.count_dark_modules(), w * w)
}

fn balance_penalty(dark_cnt: usize, total: usize) -> u32 {
    let majority = dark_cnt.max(total - dark_cnt);
    let pct = majority * 100 / total;
    ((pct - 50) / 5 * 10) as u32
}
