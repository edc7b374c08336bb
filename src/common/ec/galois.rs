use std::sync::OnceLock;

use crate::common::error::{QRError, QRResult};

/// Reducer polynomial x^8 + x^4 + x^3 + x^2 + 1 used by QR codes.
pub const QR_REDUCER: u32 = 0x11D;

// Galois field
//------------------------------------------------------------------------------

/// GF(2^8) with generator 2, built from a reducer polynomial such as 0x11D.
/// Polynomials are coefficient slices with the highest degree first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaloisField {
    exp: [u8; 255],
    log: [u8; 256],
}

impl GaloisField {
    pub fn new(reducer: u32) -> Self {
        debug_assert!(
            (0x100..0x200).contains(&reducer),
            "Reducer must be a degree 8 polynomial: {reducer:#x}"
        );

        let mut exp = [0u8; 255];
        let mut log = [0u8; 256];
        let mut x = 1u32;
        exp[0] = 1;
        for i in 1..255 {
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= reducer;
            }
            exp[i] = x as u8;
            log[x as usize] = i as u8;
        }
        Self { exp, log }
    }

    /// Field for QR codes, built once per process.
    pub fn qr() -> &'static GaloisField {
        static QR_FIELD: OnceLock<GaloisField> = OnceLock::new();
        QR_FIELD.get_or_init(|| GaloisField::new(QR_REDUCER))
    }

    pub fn exp_table(&self) -> &[u8; 255] {
        &self.exp
    }

    pub fn log_table(&self) -> &[u8; 256] {
        &self.log
    }

    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_sum = self.log[a as usize] as usize + self.log[b as usize] as usize;
        self.exp[log_sum % 255]
    }

    /// a^b. Zero to the power zero is undefined here.
    pub fn pow(&self, a: u8, b: u32) -> QRResult<u8> {
        match (a, b) {
            (0, 0) => Err(QRError::Arithmetic),
            (0, _) => Ok(0),
            (_, 0) => Ok(1),
            _ => {
                let log_pow = self.log[a as usize] as u64 * b as u64;
                Ok(self.exp[(log_pow % 255) as usize])
            }
        }
    }

    pub fn mul_poly(&self, a: &[u8], b: &[u8]) -> Vec<u8> {
        debug_assert!(!a.is_empty() && !b.is_empty(), "Polynomials must have a coefficient");

        let mut res = vec![0u8; a.len() + b.len() - 1];
        for (i, &x) in a.iter().enumerate() {
            for (j, &y) in b.iter().enumerate() {
                res[i + j] ^= self.mul(x, y);
            }
        }
        res
    }

    /// Remainder of synthetic division by a monic divisor. The remainder has
    /// `divisor.len() - 1` coefficients.
    pub fn poly_mod(&self, dividend: &[u8], divisor: &[u8]) -> Vec<u8> {
        debug_assert!(divisor.first() == Some(&1), "Divisor must be monic");

        let rem_len = divisor.len() - 1;
        if dividend.len() < divisor.len() {
            let mut res = vec![0u8; rem_len];
            res[rem_len - dividend.len()..].copy_from_slice(dividend);
            return res;
        }

        let mut res = dividend.to_vec();
        for i in 0..=dividend.len() - divisor.len() {
            let factor = res[i];
            if factor == 0 {
                continue;
            }
            for (u, &v) in res[i..].iter_mut().zip(divisor) {
                *u ^= self.mul(factor, v);
            }
        }
        res.split_off(dividend.len() - rem_len)
    }
}

#[cfg(test)]
mod galois_tests {
    use super::{GaloisField, QR_REDUCER};
    use crate::common::error::QRError;

    #[test]
    fn test_tables() {
        let gf = GaloisField::new(QR_REDUCER);
        assert_eq!(gf.exp_table()[..10], [1, 2, 4, 8, 16, 32, 64, 128, 29, 58]);
        assert_eq!(gf.exp_table()[254], 142);
        for (i, &x) in gf.exp_table().iter().enumerate() {
            assert_eq!(gf.log_table()[x as usize] as usize, i);
        }
    }

    #[test]
    fn test_exp_is_permutation() {
        let gf = GaloisField::qr();
        let mut seen = [false; 256];
        for &x in gf.exp_table() {
            assert!(!seen[x as usize], "{x} generated twice");
            seen[x as usize] = true;
        }
        assert!(!seen[0]);
    }

    #[test]
    fn test_multiplicative_order() {
        let gf = GaloisField::qr();
        for a in 1..=255u8 {
            assert_eq!(gf.pow(a, 255), Ok(1), "a = {a}");
        }
    }

    #[test]
    fn test_inverse() {
        let gf = GaloisField::qr();
        for a in 1..=255u8 {
            let inv = gf.pow(a, 254).unwrap();
            assert_eq!(gf.mul(a, inv), 1, "a = {a}");
        }
    }

    #[test]
    fn test_pow_edge_cases() {
        let gf = GaloisField::qr();
        assert_eq!(gf.pow(0, 0), Err(QRError::Arithmetic));
        assert_eq!(gf.pow(0, 3), Ok(0));
        assert_eq!(gf.pow(7, 0), Ok(1));
        assert_eq!(gf.pow(2, 8), Ok(29));
    }

    #[test]
    fn test_mul_poly() {
        let gf = GaloisField::qr();
        // (x + 1)(x + 2) = x^2 + 3x + 2
        assert_eq!(gf.mul_poly(&[1, 1], &[1, 2]), vec![1, 3, 2]);
        assert_eq!(gf.mul_poly(&[1], &[5, 6, 7]), vec![5, 6, 7]);
    }

    #[test]
    fn test_poly_mod() {
        let gf = GaloisField::qr();
        let gen = gf.mul_poly(&[1, 1], &[1, 2]);
        let multiple = gf.mul_poly(&gen, &[9, 4, 200]);
        assert_eq!(gf.poly_mod(&multiple, &gen), vec![0, 0]);
        assert_eq!(gf.poly_mod(&[5], &gen), vec![0, 5]);
    }
}
