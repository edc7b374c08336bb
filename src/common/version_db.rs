use super::mask::MaskPattern;
use super::metadata::{ECLevel, Version};

// Block layout
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockInfo {
    pub total_bytes: usize,
    pub data_bytes: usize,
    pub error_bytes: usize,
}

impl BlockInfo {
    pub const fn new(total_bytes: usize, data_bytes: usize) -> Self {
        assert!(data_bytes <= total_bytes, "Block has more data bytes than total bytes");
        Self { total_bytes, data_bytes, error_bytes: total_bytes - data_bytes }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockCountInfo {
    pub block_count: usize,
    pub block: BlockInfo,
}

/// Block structure of one (version, level) pair, ISO/IEC 18004 Table 9.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ErrorCorrectionInfo {
    groups: [BlockCountInfo; 2],
    group_count: usize,
    total_data_bytes: usize,
    total_error_bytes: usize,
}

impl ErrorCorrectionInfo {
    const EMPTY: Self = Self::from_row([0, 0, 0, 0, 0, 0]);

    // Row layout: [count1, total1, data1, count2, total2, data2]; count2 is 0
    // when every block has the same size.
    const fn from_row(row: [usize; 6]) -> Self {
        let groups = [
            BlockCountInfo { block_count: row[0], block: BlockInfo::new(row[1], row[2]) },
            BlockCountInfo { block_count: row[3], block: BlockInfo::new(row[4], row[5]) },
        ];
        let group_count = if row[3] == 0 { 1 } else { 2 };

        let mut total_data_bytes = 0;
        let mut total_error_bytes = 0;
        let mut i = 0;
        while i < group_count {
            total_data_bytes += groups[i].block_count * groups[i].block.data_bytes;
            total_error_bytes += groups[i].block_count * groups[i].block.error_bytes;
            i += 1;
        }
        Self { groups, group_count, total_data_bytes, total_error_bytes }
    }

    pub fn block_groups(&self) -> &[BlockCountInfo] {
        &self.groups[..self.group_count]
    }

    pub fn block_count(&self) -> usize {
        self.block_groups().iter().map(|g| g.block_count).sum()
    }

    /// Every block in placement order.
    pub fn blocks(&self) -> impl Iterator<Item = BlockInfo> + '_ {
        self.block_groups()
            .iter()
            .flat_map(|g| std::iter::repeat(g.block).take(g.block_count))
    }

    pub fn total_data_bytes(&self) -> usize {
        self.total_data_bytes
    }

    pub fn total_error_bytes(&self) -> usize {
        self.total_error_bytes
    }

    pub fn total_bytes(&self) -> usize {
        self.total_data_bytes + self.total_error_bytes
    }
}

/// The four levels of one version. All four share the same physical capacity.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct CodeVersion {
    pub l: ErrorCorrectionInfo,
    pub m: ErrorCorrectionInfo,
    pub q: ErrorCorrectionInfo,
    pub h: ErrorCorrectionInfo,
}

impl CodeVersion {
    const EMPTY: Self = Self {
        l: ErrorCorrectionInfo::EMPTY,
        m: ErrorCorrectionInfo::EMPTY,
        q: ErrorCorrectionInfo::EMPTY,
        h: ErrorCorrectionInfo::EMPTY,
    };

    const fn new(rows: [[usize; 6]; 4]) -> Self {
        let l = ErrorCorrectionInfo::from_row(rows[0]);
        let m = ErrorCorrectionInfo::from_row(rows[1]);
        let q = ErrorCorrectionInfo::from_row(rows[2]);
        let h = ErrorCorrectionInfo::from_row(rows[3]);
        let total = l.total_data_bytes + l.total_error_bytes;
        assert!(
            total == m.total_data_bytes + m.total_error_bytes
                && total == q.total_data_bytes + q.total_error_bytes
                && total == h.total_data_bytes + h.total_error_bytes,
            "Levels of a version must share total capacity"
        );
        Self { l, m, q, h }
    }

    pub fn info(&self, ec_level: ECLevel) -> &ErrorCorrectionInfo {
        match ec_level {
            ECLevel::L => &self.l,
            ECLevel::M => &self.m,
            ECLevel::Q => &self.q,
            ECLevel::H => &self.h,
        }
    }
}

const fn build_versions() -> [CodeVersion; 40] {
    let mut res = [CodeVersion::EMPTY; 40];
    let mut i = 0;
    while i < 40 {
        res[i] = CodeVersion::new(VERSION_TABLE[i]);
        i += 1;
    }
    res
}

static VERSIONS: [CodeVersion; 40] = build_versions();

impl Version {
    pub fn code_version(self) -> &'static CodeVersion {
        &VERSIONS[self.index()]
    }

    pub fn ec_info(self, ec_level: ECLevel) -> &'static ErrorCorrectionInfo {
        self.code_version().info(ec_level)
    }

    pub fn total_codewords(self) -> usize {
        self.code_version().l.total_bytes()
    }

    pub fn data_capacity(self, ec_level: ECLevel) -> usize {
        self.ec_info(ec_level).total_data_bytes()
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.index()]
    }

    /// Alignment pattern centres as (row, col), leaving out the three that
    /// would overlap the finder patterns.
    pub fn alignment_pattern_centers(self) -> impl Iterator<Item = (i16, i16)> {
        let poses = self.alignment_pattern();
        let last = poses.len().saturating_sub(1);
        (0..poses.len())
            .flat_map(move |i| (0..poses.len()).map(move |j| (i, j)))
            .filter(move |&(i, j)| (i, j) != (0, 0) && (i, j) != (0, last) && (i, j) != (last, 0))
            .map(move |(i, j)| (poses[i], poses[j]))
    }

    /// 18 bit BCH coded version information, present from version 7.
    pub fn info(self) -> Option<u32> {
        match *self {
            7..=40 => Some(VERSION_INFOS[*self - 7]),
            _ => None,
        }
    }
}


// Format information
//------------------------------------------------------------------------------

/// 15 bit BCH coded format information for an error correction level and mask.
pub fn format_info(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.format_indicator() as usize) << 3) | *mask as usize;
    FORMAT_INFOS_QR[data]
}

// Global constants
//------------------------------------------------------------------------------

pub static FORMAT_INFO_BIT_LEN: usize = 15;

pub static VERSION_INFO_BIT_LEN: usize = 18;

// Format information with the 0x5412 mask applied, ISO/IEC 18004 Annex C, indexed
// by (level indicator << 3) | mask pattern
static FORMAT_INFOS_QR: [u16; 32] = [
    0x5412, 0x5125, 0x5E7C, 0x5B4B, 0x45F9, 0x40CE, 0x4F97, 0x4AA0, 0x77C4, 0x72F3, 0x7DAA, 0x789D,
    0x662F, 0x6318, 0x6C41, 0x6976, 0x1689, 0x13BE, 0x1CE7, 0x19D0, 0x0762, 0x0255, 0x0D0C, 0x083B,
    0x355F, 0x3068, 0x3F31, 0x3A06, 0x24B4, 0x2183, 0x2EDA, 0x2BED,
];

// Version information for versions 7 to 40, ISO/IEC 18004 Annex D
static VERSION_INFOS: [u32; 34] = [
    0x07C94, 0x085BC, 0x09A99, 0x0A4D3, 0x0BBF6, 0x0C762, 0x0D847, 0x0E60D, 0x0F928, 0x10B78,
    0x1145D, 0x12A17, 0x13532, 0x149A6, 0x15683, 0x168C9, 0x177EC, 0x18EC4, 0x191E1, 0x1AFAB,
    0x1B08E, 0x1CC1A, 0x1D33F, 0x1ED75, 0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B,
    0x2542E, 0x26A64, 0x27541, 0x28C69,
];

// Alignment pattern row/column positions, ISO/IEC 18004 Annex E
static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// Blocks per level as [count1, total1, data1, count2, total2, data2], ISO/IEC 18004
// Table 9. Columns are L, M, Q, H.
#[rustfmt::skip]
const VERSION_TABLE: [[[usize; 6]; 4]; 40] = [
    // Version 1
    [[1, 26, 19, 0, 0, 0], [1, 26, 16, 0, 0, 0], [1, 26, 13, 0, 0, 0], [1, 26, 9, 0, 0, 0]],
    // Version 2
    [[1, 44, 34, 0, 0, 0], [1, 44, 28, 0, 0, 0], [1, 44, 22, 0, 0, 0], [1, 44, 16, 0, 0, 0]],
    // Version 3
    [[1, 70, 55, 0, 0, 0], [1, 70, 44, 0, 0, 0], [2, 35, 17, 0, 0, 0], [2, 35, 13, 0, 0, 0]],
    // Version 4
    [[1, 100, 80, 0, 0, 0], [2, 50, 32, 0, 0, 0], [2, 50, 24, 0, 0, 0], [4, 25, 9, 0, 0, 0]],
    // Version 5
    [[1, 134, 108, 0, 0, 0], [2, 67, 43, 0, 0, 0], [2, 33, 15, 2, 34, 16], [2, 33, 11, 2, 34, 12]],
    // Version 6
    [[2, 86, 68, 0, 0, 0], [4, 43, 27, 0, 0, 0], [4, 43, 19, 0, 0, 0], [4, 43, 15, 0, 0, 0]],
    // Version 7
    [[2, 98, 78, 0, 0, 0], [4, 49, 31, 0, 0, 0], [2, 32, 14, 4, 33, 15], [4, 39, 13, 1, 40, 14]],
    // Version 8
    [[2, 121, 97, 0, 0, 0], [2, 60, 38, 2, 61, 39], [4, 40, 18, 2, 41, 19], [4, 40, 14, 2, 41, 15]],
    // Version 9
    [[2, 146, 116, 0, 0, 0], [3, 58, 36, 2, 59, 37], [4, 36, 16, 4, 37, 17], [4, 36, 12, 4, 37, 13]],
    // Version 10
    [[2, 86, 68, 2, 87, 69], [4, 69, 43, 1, 70, 44], [6, 43, 19, 2, 44, 20], [6, 43, 15, 2, 44, 16]],
    // Version 11
    [[4, 101, 81, 0, 0, 0], [1, 80, 50, 4, 81, 51], [4, 50, 22, 4, 51, 23], [3, 36, 12, 8, 37, 13]],
    // Version 12
    [[2, 116, 92, 2, 117, 93], [6, 58, 36, 2, 59, 37], [4, 46, 20, 6, 47, 21], [7, 42, 14, 4, 43, 15]],
    // Version 13
    [[4, 133, 107, 0, 0, 0], [8, 59, 37, 1, 60, 38], [8, 44, 20, 4, 45, 21], [12, 33, 11, 4, 34, 12]],
    // Version 14
    [[3, 145, 115, 1, 146, 116], [4, 64, 40, 5, 65, 41], [11, 36, 16, 5, 37, 17], [11, 36, 12, 5, 37, 13]],
    // Version 15
    [[5, 109, 87, 1, 110, 88], [5, 65, 41, 5, 66, 42], [5, 54, 24, 7, 55, 25], [11, 36, 12, 7, 37, 13]],
    // Version 16
    [[5, 122, 98, 1, 123, 99], [7, 73, 45, 3, 74, 46], [15, 43, 19, 2, 44, 20], [3, 45, 15, 13, 46, 16]],
    // Version 17
    [[1, 135, 107, 5, 136, 108], [10, 74, 46, 1, 75, 47], [1, 50, 22, 15, 51, 23], [2, 42, 14, 17, 43, 15]],
    // Version 18
    [[5, 150, 120, 1, 151, 121], [9, 69, 43, 4, 70, 44], [17, 50, 22, 1, 51, 23], [2, 42, 14, 19, 43, 15]],
    // Version 19
    [[3, 141, 113, 4, 142, 114], [3, 70, 44, 11, 71, 45], [17, 47, 21, 4, 48, 22], [9, 39, 13, 16, 40, 14]],
    // Version 20
    [[3, 135, 107, 5, 136, 108], [3, 67, 41, 13, 68, 42], [15, 54, 24, 5, 55, 25], [15, 43, 15, 10, 44, 16]],
    // Version 21
    [[4, 144, 116, 4, 145, 117], [17, 68, 42, 0, 0, 0], [17, 50, 22, 6, 51, 23], [19, 46, 16, 6, 47, 17]],
    // Version 22
    [[2, 139, 111, 7, 140, 112], [17, 74, 46, 0, 0, 0], [7, 54, 24, 16, 55, 25], [34, 37, 13, 0, 0, 0]],
    // Version 23
    [[4, 151, 121, 5, 152, 122], [4, 75, 47, 14, 76, 48], [11, 54, 24, 14, 55, 25], [16, 45, 15, 14, 46, 16]],
    // Version 24
    [[6, 147, 117, 4, 148, 118], [6, 73, 45, 14, 74, 46], [11, 54, 24, 16, 55, 25], [30, 46, 16, 2, 47, 17]],
    // Version 25
    [[8, 132, 106, 4, 133, 107], [8, 75, 47, 13, 76, 48], [7, 54, 24, 22, 55, 25], [22, 45, 15, 13, 46, 16]],
    // Version 26
    [[10, 142, 114, 2, 143, 115], [19, 74, 46, 4, 75, 47], [28, 50, 22, 6, 51, 23], [33, 46, 16, 4, 47, 17]],
    // Version 27
    [[8, 152, 122, 4, 153, 123], [22, 73, 45, 3, 74, 46], [8, 53, 23, 26, 54, 24], [12, 45, 15, 28, 46, 16]],
    // Version 28
    [[3, 147, 117, 10, 148, 118], [3, 73, 45, 23, 74, 46], [4, 54, 24, 31, 55, 25], [11, 45, 15, 31, 46, 16]],
    // Version 29
    [[7, 146, 116, 7, 147, 117], [21, 73, 45, 7, 74, 46], [1, 53, 23, 37, 54, 24], [19, 45, 15, 26, 46, 16]],
    // Version 30
    [[5, 145, 115, 10, 146, 116], [19, 75, 47, 10, 76, 48], [15, 54, 24, 25, 55, 25], [23, 45, 15, 25, 46, 16]],
    // Version 31
    [[13, 145, 115, 3, 146, 116], [2, 74, 46, 29, 75, 47], [42, 54, 24, 1, 55, 25], [23, 45, 15, 28, 46, 16]],
    // Version 32
    [[17, 145, 115, 0, 0, 0], [10, 74, 46, 23, 75, 47], [10, 54, 24, 35, 55, 25], [19, 45, 15, 35, 46, 16]],
    // Version 33
    [[17, 145, 115, 1, 146, 116], [14, 74, 46, 21, 75, 47], [29, 54, 24, 19, 55, 25], [11, 45, 15, 46, 46, 16]],
    // Version 34
    [[13, 145, 115, 6, 146, 116], [14, 74, 46, 23, 75, 47], [44, 54, 24, 7, 55, 25], [59, 46, 16, 1, 47, 17]],
    // Version 35
    [[12, 151, 121, 7, 152, 122], [12, 75, 47, 26, 76, 48], [39, 54, 24, 14, 55, 25], [22, 45, 15, 41, 46, 16]],
    // Version 36
    [[6, 151, 121, 14, 152, 122], [6, 75, 47, 34, 76, 48], [46, 54, 24, 10, 55, 25], [2, 45, 15, 64, 46, 16]],
    // Version 37
    [[17, 152, 122, 4, 153, 123], [29, 74, 46, 14, 75, 47], [49, 54, 24, 10, 55, 25], [24, 45, 15, 46, 46, 16]],
    // Version 38
    [[4, 152, 122, 18, 153, 123], [13, 74, 46, 32, 75, 47], [48, 54, 24, 14, 55, 25], [42, 45, 15, 32, 46, 16]],
    // Version 39
    [[20, 147, 117, 4, 148, 118], [40, 75, 47, 7, 76, 48], [43, 54, 24, 22, 55, 25], [10, 45, 15, 67, 46, 16]],
    // Version 40
    [[19, 148, 118, 6, 149, 119], [18, 75, 47, 31, 76, 48], [34, 54, 24, 34, 55, 25], [20, 45, 15, 61, 46, 16]],
];
