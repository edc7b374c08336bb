mod galois;

use std::sync::OnceLock;

pub use galois::{GaloisField, QR_REDUCER};

use crate::common::error::{QRError, QRResult};

/// Largest generator polynomial degree that can be requested. QR blocks use at most 30.
pub const MAX_EC_SIZE: usize = 127;

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Generator polynomials g_n(x) = (x - 2^0)(x - 2^1)...(x - 2^(n-1)), built lazily.
/// Each slot is published once and never mutated.
static GENERATOR_POLYNOMIALS: [OnceLock<Box<[u8]>>; MAX_EC_SIZE + 1] =
    [const { OnceLock::new() }; MAX_EC_SIZE + 1];

pub fn generator_polynomial(degree: usize) -> QRResult<&'static [u8]> {
    if degree > MAX_EC_SIZE {
        return Err(QRError::Arithmetic);
    }
    if let Some(poly) = GENERATOR_POLYNOMIALS[degree].get() {
        return Ok(poly);
    }

    let poly = match degree {
        0 => vec![1],
        _ => {
            let gf = GaloisField::qr();
            let prev = generator_polynomial(degree - 1)?;
            let root = gf.pow(2, degree as u32 - 1)?;
            gf.mul_poly(prev, &[1, root])
        }
    };

    // Concurrent builders compute identical polynomials, the first one wins
    Ok(GENERATOR_POLYNOMIALS[degree].get_or_init(|| poly.into_boxed_slice()))
}

// ECC: Error correction codewords of a single block. The data polynomial is
// multiplied by x^n and divided by g_n(x), the remainder holds the codewords.
pub fn ecc(data: &[u8], ecc_count: usize) -> QRResult<Vec<u8>> {
    let gen_poly = generator_polynomial(ecc_count)?;

    let mut shifted = Vec::with_capacity(data.len() + ecc_count);
    shifted.extend_from_slice(data);
    shifted.resize(data.len() + ecc_count, 0);

    Ok(GaloisField::qr().poly_mod(&shifted, gen_poly))
}
