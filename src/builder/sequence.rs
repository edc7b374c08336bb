use std::ops::Deref;

use crate::common::bit_utils::BitWriter;
use crate::common::ec::ecc;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{ECLevel, Version};
use crate::common::version_db::ErrorCorrectionInfo;

const BYTE_MODE: u8 = 0b0100;
const TERMINATOR: u8 = 0b0000;

// Framing
//------------------------------------------------------------------------------

/// Wraps the payload in a byte mode segment: mode indicator, character count,
/// data and terminator. The count is 8 bits wide if the segment fits a version 9
/// symbol at `ec_level`, 16 bits otherwise.
pub fn frame(data: &[u8], ec_level: ECLevel) -> Vec<u8> {
    let len = data.len();
    let short_len_limit = Version::new_unchecked(9).data_capacity(ec_level) - 2;

    let mut bw = BitWriter::with_capacity(len + 3);
    bw.write_nibble(BYTE_MODE);
    if len <= short_len_limit {
        bw.write_byte(len as u8);
    } else {
        bw.write_word(len as u16);
    }
    bw.write_bytes(data);
    bw.write_nibble(TERMINATOR);

    debug_assert_eq!(bw.bit_len() % 8, 0, "Framed segment must be byte aligned");
    bw.into_bytes()
}


// Version selection
//------------------------------------------------------------------------------

/// Finds the smallest version holding `len` data bytes at `desired`, then the
/// strongest level that still fits in that version.
pub fn select_version(
    len: usize,
    desired: ECLevel,
) -> QRResult<(Version, ECLevel, &'static ErrorCorrectionInfo)> {
    let version = Version::all()
        .find(|v| v.data_capacity(desired) >= len)
        .ok_or(QRError::DataTooLong)?;
    let ec_level = ECLevel::DESCENDING
        .into_iter()
        .find(|&ecl| version.data_capacity(ecl) >= len)
        .unwrap_or(desired);
    Ok((version, ec_level, version.ec_info(ec_level)))
}


// Message sequence
//------------------------------------------------------------------------------

/// Final codeword stream of a symbol with the version and level it was sized for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSequence {
    pub codewords: Vec<u8>,
    pub version: Version,
    pub ec_level: ECLevel,
}

/// Pads the framed data with zeros to the capacity of the selected version,
/// computes the error correction blocks and interleaves everything.
pub fn build_message_sequence(raw: &[u8], desired: ECLevel) -> QRResult<MessageSequence> {
    let (version, ec_level, info) = select_version(raw.len(), desired)?;

    let mut data = raw.to_vec();
    data.resize(info.total_data_bytes(), 0);

    let (data_blocks, ecc_blocks) = compute_ecc(&data, info)?;

    let mut codewords = Vec::with_capacity(info.total_bytes());
    codewords.extend(interleave(&data_blocks));
    codewords.extend(interleave(&ecc_blocks));

    debug_assert_eq!(codewords.len(), version.total_codewords(), "Codeword count mismatch");
    Ok(MessageSequence { codewords, version, ec_level })
}

// ECC: Error correction codewords of every block
pub(crate) fn compute_ecc<'a>(
    data: &'a [u8],
    info: &ErrorCorrectionInfo,
) -> QRResult<(Vec<&'a [u8]>, Vec<Vec<u8>>)> {
    let data_blocks = blockify(data, info);
    let ecc_blocks = data_blocks
        .iter()
        .zip(info.blocks())
        .map(|(b, blk)| ecc(b, blk.error_bytes))
        .collect::<QRResult<Vec<_>>>()?;

    Ok((data_blocks, ecc_blocks))
}

pub(crate) fn blockify<'a>(data: &'a [u8], info: &ErrorCorrectionInfo) -> Vec<&'a [u8]> {
    debug_assert!(
        info.total_data_bytes() == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        info.total_data_bytes()
    );

    let mut data_blocks = Vec::with_capacity(info.block_count());
    let mut rest = data;
    for blk in info.blocks() {
        let (head, tail) = rest.split_at(blk.data_bytes);
        data_blocks.push(head);
        rest = tail;
    }
    data_blocks
}

/// Emits byte 0 of every block, then byte 1, and so on. Shorter blocks drop out
/// once exhausted.
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}
