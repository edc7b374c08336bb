use super::matrix::ModuleMatrix;
use crate::common::iter::ZigZagIter;

// Codeword placement
//------------------------------------------------------------------------------

/// Coordinates of the 8 modules holding one codeword, most significant bit first.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CodewordPlacement {
    bits: [(i16, i16); 8],
}

impl CodewordPlacement {
    pub fn bits(&self) -> &[(i16, i16); 8] {
        &self.bits
    }

    /// Yields each coordinate with the color of the matching bit of `byte`.
    pub fn modules(&self, byte: u8) -> impl Iterator<Item = ((i16, i16), bool)> + '_ {
        self.bits.iter().enumerate().map(move |(i, &rc)| (rc, (byte >> (7 - i)) & 1 == 1))
    }

    /// Reads a codeword back out of a matrix.
    pub fn read(&self, matrix: &ModuleMatrix) -> u8 {
        self.bits.iter().fold(0, |acc, &(r, c)| (acc << 1) | matrix.is_dark(r, c) as u8)
    }
}

/// Zig-zag order of all codewords fitting in the unreserved cells of `matrix`.
/// Trailing cells that don't make up a whole codeword are left out.
pub fn codeword_placements(matrix: &ModuleMatrix) -> Vec<CodewordPlacement> {
    let coords = ZigZagIter::new(matrix.width())
        .filter(|&(r, c)| !matrix.is_reserved(r, c))
        .collect::<Vec<_>>();

    coords
        .chunks_exact(8)
        .map(|chunk| {
            let mut bits = [(0, 0); 8];
            bits.copy_from_slice(chunk);
            CodewordPlacement { bits }
        })
        .collect()
}

#[cfg(test)]
mod placement_tests {
    use std::collections::HashSet;

    use super::codeword_placements;
    use crate::builder::matrix::{Module, ModuleMatrix};
    use crate::builder::template::SymbolTemplate;
    use crate::common::metadata::{Color, Version};

    #[test]
    fn test_placement_count_matches_capacity() {
        for v in Version::all() {
            let tmpl = SymbolTemplate::new(v);
            assert_eq!(tmpl.placements().len(), v.total_codewords(), "Version {}", *v);
        }
    }

    #[test]
    fn test_placements_visit_unreserved_cells_once() {
        for v in Version::all() {
            let tmpl = SymbolTemplate::new(v);
            let mat = tmpl.matrix();
            let w = mat.width() as i16;
            let visited = tmpl
                .placements()
                .iter()
                .flat_map(|p| p.bits().iter().copied())
                .collect::<Vec<_>>();
            let unique = visited.iter().copied().collect::<HashSet<_>>();
            assert_eq!(visited.len(), unique.len());
            assert!(visited.iter().all(|&(r, c)| !mat.is_reserved(r, c)));

            let unreserved =
                (0..w).flat_map(|r| (0..w).map(move |c| (r, c))).filter(|&(r, c)| !mat.is_reserved(r, c));
            let remainder = unreserved.filter(|rc| !unique.contains(rc)).count();
            assert!(remainder < 8, "Version {} leaves {remainder} cells", *v);
        }
    }

    #[test]
    fn test_first_placement_v1() {
        let tmpl = SymbolTemplate::new(Version::new(1).unwrap());
        let first = tmpl.placements()[0];
        assert_eq!(
            first.bits(),
            &[(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19), (17, 20), (17, 19)]
        );
    }

    #[test]
    fn test_reserved_cells_skipped() {
        let mut mat = ModuleMatrix::new(21);
        mat.set(20, 19, Module::func(Color::Light), true);
        let placements = codeword_placements(&mat);
        assert_eq!(placements[0].bits()[1], (19, 20));
        assert_eq!(placements.len(), (21 * 20 - 1) / 8);
    }

    #[test]
    fn test_read_back() {
        let mut mat = ModuleMatrix::new(21);
        let placements = codeword_placements(&mat);
        for ((r, c), dark) in placements[3].modules(0b1010_0110) {
            if dark {
                mat.set(r, c, Module::DARK, true);
            }
        }
        assert_eq!(placements[3].read(&mat), 0b1010_0110);
        assert_eq!(placements[2].read(&mat), 0);
    }
}
