use std::fmt::Display;
use std::mem;

use num_traits::PrimInt;

// Bit writer
//------------------------------------------------------------------------------

/// Accumulates MSB first writes of arbitrary bit length into bytes.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    // Pending bits, right aligned
    acc: u64,
    // Number of pending bits in acc, always < 8 between writes
    acc_len: usize,
}

impl BitWriter {
    pub fn with_capacity(bytes: usize) -> Self {
        Self { data: Vec::with_capacity(bytes), acc: 0, acc_len: 0 }
    }

    /// Total bits written so far.
    pub fn bit_len(&self) -> usize {
        (self.data.len() << 3) + self.acc_len
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.acc_len == 0
    }

    pub fn write_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= 32, "Cannot write more than 32 bits at once: Size {size}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        if size == 0 {
            return;
        }
        let Some(bits) = bits.to_u64() else { return };

        self.acc = (self.acc << size) | (bits & ((1 << size) - 1));
        self.acc_len += size;
        while self.acc_len >= 8 {
            self.acc_len -= 8;
            self.data.push((self.acc >> self.acc_len) as u8);
        }
        self.acc &= (1 << self.acc_len) - 1;
    }

    pub fn write_nibble(&mut self, nibble: u8) {
        self.write_bits(nibble & 0x0F, 4);
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.write_bits(byte, 8);
    }

    pub fn write_word(&mut self, word: u16) {
        self.write_bits(word, 16);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.is_byte_aligned() {
            self.data.extend_from_slice(bytes);
        } else {
            bytes.iter().for_each(|b| self.write_byte(*b));
        }
    }

    /// Completed bytes. Pending bits that don't fill a byte are dropped.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod bit_writer_tests {

    use super::BitWriter;

    #[test]
    fn test_len() {
        let mut bw = BitWriter::default();
        assert_eq!(bw.bit_len(), 0);
        bw.write_bits(0, 0);
        assert_eq!(bw.bit_len(), 0);
        bw.write_bits(0b1000, 4);
        assert_eq!(bw.bit_len(), 4);
        bw.write_bits(0b1000, 8);
        assert_eq!(bw.bit_len(), 12);
        bw.write_bits(0b1000, 4);
        assert_eq!(bw.bit_len(), 16);
        bw.write_bits(0b1111111, 7);
        assert_eq!(bw.bit_len(), 23);
        bw.write_bits(0b111111111111u16, 12);
        assert_eq!(bw.bit_len(), 35);
        bw.write_bits(0b111111111111u16, 16);
        assert_eq!(bw.bit_len(), 51);
    }

    #[test]
    #[should_panic]
    fn test_invalid_len() {
        let mut bw = BitWriter::default();
        bw.write_bits(256u16, 7);
    }

    #[test]
    fn test_write_bits() {
        let mut bw = BitWriter::default();
        bw.write_bits(0b1u8, 1);
        bw.write_bits(0b10u8, 2);
        bw.write_bits(0b10011u8, 5);
        bw.write_bits(0b0011_0100_1u16, 9);
        bw.write_bits(0b0001101u8, 7);
        assert_eq!(bw.into_bytes(), vec![0b11010011, 0b00110100, 0b10001101]);
    }

    #[test]
    fn test_wrappers() {
        let mut bw = BitWriter::default();
        bw.write_nibble(0b0100);
        bw.write_byte(0xAB);
        bw.write_word(0x1234);
        bw.write_bytes(&[0xCD, 0xEF]);
        bw.write_nibble(0);
        assert!(bw.is_byte_aligned());
        assert_eq!(bw.into_bytes(), vec![0x4A, 0xB1, 0x23, 0x4C, 0xDE, 0xF0]);
    }

    #[test]
    fn test_aligned_bytes() {
        let mut bw = BitWriter::with_capacity(4);
        bw.write_byte(0x01);
        bw.write_bytes(b"abc");
        assert_eq!(bw.into_bytes(), b"\x01abc".to_vec());
    }

    #[test]
    fn test_mask_excess_bits() {
        let mut bw = BitWriter::default();
        bw.write_nibble(0xF4);
        bw.write_nibble(0x0E);
        assert_eq!(bw.into_bytes(), vec![0x4E]);
    }
}
