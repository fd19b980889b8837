//! P-256 scalar arithmetic operations

use crate::constants::P256_SCALAR_SIZE;
use crate::error::{validate, Result};
use p256verify_params::ecdsa::NIST_P256;
use subtle::ConstantTimeEq;

/// P-256 scalar value: an integer modulo the curve order n.
///
/// Stored as big-endian bytes, always below n. In a verifier every scalar
/// (digest, signature words, the derived u and v) is public input, so the
/// representation carries no secrecy obligations.
#[derive(Clone, Copy, Debug)]
pub struct Scalar([u8; P256_SCALAR_SIZE]);

impl Scalar {
    /// Create a scalar from big-endian bytes, requiring the canonical
    /// range [1, n−1].
    ///
    /// Out-of-range values are rejected, not reduced: ECDSA verification
    /// treats a signature word of zero or ≥ n as malformed.
    pub fn new(bytes: &[u8; P256_SCALAR_SIZE]) -> Result<Self> {
        validate::parameter(
            !bytes.iter().all(|&b| b == 0),
            "P-256 Scalar",
            "Scalar cannot be zero",
        )?;
        let limbs = Self::to_le_limbs(bytes);
        validate::parameter(
            !Self::geq(&limbs, &Self::N_LIMBS),
            "P-256 Scalar",
            "Scalar ≥ curve order",
        )?;
        Ok(Scalar(*bytes))
    }

    /// Create a scalar from big-endian bytes, reducing modulo n.
    ///
    /// Zero is a valid result here. Used for the message digest (ECDSA
    /// reduces it implicitly) and for the final x-coordinate comparison.
    pub fn from_bytes_reduced(bytes: &[u8; P256_SCALAR_SIZE]) -> Self {
        let mut limbs = Self::to_le_limbs(bytes);
        // Any 256-bit value is below 2n, so one conditional subtraction
        // fully reduces.
        if Self::geq(&limbs, &Self::N_LIMBS) {
            Self::sub_in_place(&mut limbs, &Self::N_LIMBS);
        }
        Scalar(Self::limbs_to_be(&limbs))
    }

    /// Serialize the scalar to big-endian bytes.
    pub fn serialize(&self) -> [u8; P256_SCALAR_SIZE] {
        self.0
    }

    /// Check if the scalar represents zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Constant-time equality
    pub fn ct_eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }

    /// Bit at `index` (0 = least significant). Used by the joint
    /// multiplication scan; `index` must be below 256.
    pub(crate) fn bit(&self, index: usize) -> u8 {
        (self.0[P256_SCALAR_SIZE - 1 - index / 8] >> (index % 8)) & 1
    }

    /// Add two scalars modulo the curve order n
    pub fn add_mod_n(&self, other: &Self) -> Self {
        let self_limbs = Self::to_le_limbs(&self.0);
        let other_limbs = Self::to_le_limbs(&other.0);

        let mut r = [0u32; 8];
        let mut carry = 0u64;

        // Plain 256-bit add
        #[allow(clippy::needless_range_loop)] // Index used for multiple arrays
        for i in 0..8 {
            let tmp = self_limbs[i] as u64 + other_limbs[i] as u64 + carry;
            r[i] = tmp as u32;
            carry = tmp >> 32;
        }

        // If we overflowed OR r >= n, subtract n once
        if carry == 1 || Self::geq(&r, &Self::N_LIMBS) {
            Self::sub_in_place(&mut r, &Self::N_LIMBS);
        }

        Scalar(Self::limbs_to_be(&r))
    }

    /// Multiply two scalars modulo the curve order n.
    ///
    /// Bit-serial double-and-add over `add_mod_n`, MSB first. The order n
    /// has no sparse reduction identity, so the 512-bit intermediate of a
    /// schoolbook product buys nothing here; this path runs a handful of
    /// times per verification.
    pub fn mul_mod_n(&self, other: &Self) -> Self {
        let mut acc = Scalar([0u8; P256_SCALAR_SIZE]);

        for byte in other.0 {
            for i in (0..8).rev() {
                // acc = acc * 2 (mod n)
                acc = acc.add_mod_n(&acc);

                if (byte >> i) & 1 == 1 {
                    acc = acc.add_mod_n(self);
                }
            }
        }

        acc
    }

    /// Compute multiplicative inverse modulo n using Fermat's little
    /// theorem: a⁻¹ ≡ a^(n−2) (mod n), left-to-right binary exponentiation
    /// over the precomputed exponent.
    ///
    /// Total: inverting zero yields zero, which callers interpret as
    /// "denominator was zero".
    pub fn invert(&self) -> Self {
        let mut one = [0u8; P256_SCALAR_SIZE];
        one[P256_SCALAR_SIZE - 1] = 1;
        let mut result = Scalar(one);
        let base = *self;

        for byte in NIST_P256.n_minus_2 {
            for bit in (0..8).rev() {
                result = result.mul_mod_n(&result);
                if (byte >> bit) & 1 == 1 {
                    result = result.mul_mod_n(&base);
                }
            }
        }

        result
    }

    /// Compute the additive inverse (negation) modulo n.
    ///
    /// Returns n − self when self != 0, and 0 when self is 0.
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            return Scalar([0u8; P256_SCALAR_SIZE]);
        }

        let self_limbs = Self::to_le_limbs(&self.0);
        let mut r = Self::N_LIMBS;
        Self::sub_in_place(&mut r, &self_limbs);

        Scalar(Self::limbs_to_be(&r))
    }

    /* ================================================================= */
    /*  Private helpers                                                  */
    /* ================================================================= */

    /// Curve order n, little-endian limbs:
    /// n = 0xFFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551
    const N_LIMBS: [u32; 8] = [
        0xFC63_2551,
        0xF3B9_CAC2,
        0xA717_9E84,
        0xBCE6_FAAD,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0x0000_0000,
        0xFFFF_FFFF,
    ];

    /// Convert big-endian bytes to little-endian limbs
    #[inline(always)]
    fn to_le_limbs(bytes_be: &[u8; 32]) -> [u32; 8] {
        let mut limbs = [0u32; 8];

        // limb 0 holds the 4 least-significant bytes, limb 7 the 4 most-significant
        #[allow(clippy::needless_range_loop)] // Index used for offset calculation
        for i in 0..8 {
            let start = 28 - i * 4;
            limbs[i] = u32::from_be_bytes([
                bytes_be[start],
                bytes_be[start + 1],
                bytes_be[start + 2],
                bytes_be[start + 3],
            ]);
        }
        limbs
    }

    /// Convert little-endian limbs to big-endian bytes
    #[inline(always)]
    fn limbs_to_be(limbs: &[u32; 8]) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, &w) in limbs.iter().enumerate() {
            let start = 28 - i * 4;
            out[start..start + 4].copy_from_slice(&w.to_be_bytes());
        }
        out
    }

    /// Compare two limb arrays for greater-than-or-equal
    #[inline(always)]
    fn geq(a: &[u32; 8], b: &[u32; 8]) -> bool {
        for i in (0..8).rev() {
            if a[i] > b[i] {
                return true;
            }
            if a[i] < b[i] {
                return false;
            }
        }
        true // equal
    }

    /// Subtract b from a in-place; a must be ≥ b
    #[inline(always)]
    fn sub_in_place(a: &mut [u32; 8], b: &[u32; 8]) {
        let mut borrow = 0u64;
        #[allow(clippy::needless_range_loop)] // Index used for multiple arrays
        for i in 0..8 {
            let tmp = (a[i] as u64).wrapping_sub(b[i] as u64).wrapping_sub(borrow);
            a[i] = tmp as u32;
            borrow = (tmp >> 63) & 1; // 1 if we wrapped
        }
    }
}
