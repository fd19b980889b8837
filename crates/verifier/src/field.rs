//! P-256 base field arithmetic

use crate::constants::P256_FIELD_ELEMENT_SIZE;
use crate::error::{validate, Result};
use p256verify_params::ecdsa::NIST_P256;
use subtle::{Choice, ConditionallySelectable};

/// Number of 32-bit limbs for a P-256 field element (8 × 32 = 256 bits)
const NLIMBS: usize = 8;

/// P-256 field element representing values in 𝔽ₚ, where
/// p = 2²⁵⁶ − 2²²⁴ + 2¹⁹² + 2⁹⁶ − 1.
/// Internally stored as 8 little-endian 32-bit limbs, always fully reduced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement(pub(crate) [u32; NLIMBS]);

impl FieldElement {
    /* ---------------------------------------------------------------- */
    /*  NIST P-256 field constants (little-endian 32-bit limbs)         */
    /* ---------------------------------------------------------------- */

    /// p = 0xFFFFFFFF 00000001 00000000 00000000 00000000 FFFFFFFF FFFFFFFF FFFFFFFF
    /// Big-endian words above; little-endian limbs below.
    pub(crate) const MOD_LIMBS: [u32; NLIMBS] = [
        0xFFFFFFFF, // least significant
        0xFFFFFFFF, 0xFFFFFFFF, 0x00000000, 0x00000000, 0x00000000, 0x00000001,
        0xFFFFFFFF, // most significant
    ];

    /// a = −3 mod p = p − 3: subtract 3 from the least-significant limb.
    pub(crate) const A_M3: [u32; NLIMBS] = [
        0xFFFFFFFC, 0xFFFFFFFF, 0xFFFFFFFF, 0x00000000, 0x00000000, 0x00000000, 0x00000001,
        0xFFFFFFFF,
    ];

    /// Curve coefficient
    /// b = 0x5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B
    pub(crate) const B: [u32; NLIMBS] = [
        0x27D2604B, 0x3BCE3C3E, 0xCC53B0F6, 0x651D06B0, 0x769886BC, 0xB3EBBD55, 0xAA3A93E7,
        0x5AC635D8,
    ];

    /// 5·p as nine limbs, added before subtracting the negative reduction
    /// terms so the running value never goes below zero (the four
    /// subtractive terms sum to less than 4·2²⁵⁶ < 5p).
    const FIVE_P: [u32; 9] = [
        0xFFFFFFFB, 0xFFFFFFFF, 0xFFFFFFFF, 0x00000004, 0x00000000, 0x00000000, 0x00000005,
        0xFFFFFFFB, 0x00000004,
    ];

    /// 2²⁵⁶ − p = 2²²⁴ − 2¹⁹² − 2⁹⁶ + 1, used to fold the limb above bit 255
    /// back into range (2²⁵⁶ ≡ 2²⁵⁶ − p mod p).
    const FOLD: [u32; NLIMBS] = [
        0x00000001, 0x00000000, 0x00000000, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFE,
        0x00000000,
    ];

    /* ================================================================= */
    /*  Tiny helpers                                                     */
    /* ================================================================= */

    /// The additive identity: 0
    #[inline]
    pub fn zero() -> Self {
        FieldElement([0u32; NLIMBS])
    }

    /// The multiplicative identity: 1
    #[inline]
    pub fn one() -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = 1;
        FieldElement(limbs)
    }

    /// Create a field element from big-endian bytes.
    /// Values of p or above are rejected, not reduced: coordinates that are
    /// out of range must fail validation rather than alias a smaller value.
    pub fn from_bytes(bytes: &[u8; P256_FIELD_ELEMENT_SIZE]) -> Result<Self> {
        let mut limbs = [0u32; NLIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            *limb = u32::from_be_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]);
        }
        // borrow == 1 iff limbs < p
        let (_, borrow) = Self::sbb8(limbs, Self::MOD_LIMBS);
        validate::parameter(borrow == 1, "P-256 FieldElement", "Value ≥ field modulus")?;
        Ok(FieldElement(limbs))
    }

    /// Convert this field element into big-endian bytes.
    pub fn to_bytes(&self) -> [u8; P256_FIELD_ELEMENT_SIZE] {
        let mut out = [0u8; P256_FIELD_ELEMENT_SIZE];
        for (i, &limb) in self.0.iter().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            out[offset..offset + 4].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Constant-time addition: (self + other) mod p
    pub fn add(&self, other: &Self) -> Self {
        let (sum, carry) = Self::adc8(self.0, other.0);

        // Reduce if the addition overflowed 2²⁵⁶ or the sum is >= p
        let (reduced, borrow) = Self::sbb8(sum, Self::MOD_LIMBS);
        let need_reduce = (carry | (borrow ^ 1)) & 1;

        Self::conditional_select(&sum, &reduced, Choice::from(need_reduce as u8))
    }

    /// Constant-time subtraction: (self - other) mod p
    pub fn sub(&self, other: &Self) -> Self {
        let (diff, borrow) = Self::sbb8(self.0, other.0);
        // If borrow == 1, add p back
        let (diff_plus_p, _) = Self::adc8(diff, Self::MOD_LIMBS);
        Self::conditional_select(&diff, &diff_plus_p, Choice::from(borrow as u8))
    }

    /// Field multiplication: (self * other) mod p
    /// Schoolbook 8×8 → 16-limb product, then fast reduction for the P-256
    /// prime.
    pub fn mul(&self, other: &Self) -> Self {
        // Phase 1: 8×8 → 16 128-bit partial accumulators
        let mut t = [0u128; NLIMBS * 2];
        for i in 0..NLIMBS {
            for j in 0..NLIMBS {
                t[i + j] += (self.0[i] as u128) * (other.0[j] as u128);
            }
        }

        // Phase 2: carry-propagate into 16 × u32 limbs
        let mut wide = [0u32; NLIMBS * 2];
        let mut carry: u128 = 0;
        for i in 0..(NLIMBS * 2) {
            let v = t[i] + carry;
            wide[i] = (v & 0xFFFF_FFFF) as u32;
            carry = v >> 32;
        }

        // Phase 3: reduce 16 limbs → 8 limbs mod p
        Self::reduce_wide(wide)
    }

    /// Field squaring: (self²) mod p
    #[inline(always)]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Modular exponentiation over big-endian exponent bytes,
    /// left-to-right square-and-multiply.
    fn pow(&self, exp: &[u8; 32]) -> Self {
        let mut result = FieldElement::one();
        let base = self.clone();

        for &byte in exp.iter() {
            for bit in (0..8).rev() {
                result = result.square();
                if (byte >> bit) & 1 == 1 {
                    result = result.mul(&base);
                }
            }
        }

        result
    }

    /// Compute multiplicative inverse via Fermat: a^(p-2) mod p.
    ///
    /// Total: inverting zero yields zero (0^(p−2) = 0), which the x-only
    /// point normalization uses to map the point at infinity to x = 0.
    pub fn invert(&self) -> Self {
        self.pow(&NIST_P256.p_minus_2)
    }

    /* ================================================================= */
    /*  Private helper methods (constant-time arithmetic)                */
    /* ================================================================= */

    /// 8-limb addition with carry
    #[inline(always)]
    fn adc8(a: [u32; 8], b: [u32; 8]) -> ([u32; 8], u32) {
        let mut r = [0u32; 8];
        let mut carry = 0u64;
        for ((&a_limb, &b_limb), r_limb) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
            let tmp = (a_limb as u64) + (b_limb as u64) + carry;
            *r_limb = (tmp & 0xFFFF_FFFF) as u32;
            carry = tmp >> 32;
        }
        (r, carry as u32)
    }

    /// 8-limb subtraction with borrow (constant-time)
    #[inline(always)]
    fn sbb8(a: [u32; 8], b: [u32; 8]) -> ([u32; 8], u32) {
        let mut r = [0u32; 8];
        let mut borrow = 0u32;

        for ((&a_limb, &b_limb), r_limb) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
            // a[i] − b[i] − borrow, done in u64 and truncated back
            let ai = a_limb as u64;
            let bi = b_limb as u64;
            let tmp = ai.wrapping_sub(bi + borrow as u64);

            *r_limb = tmp as u32;

            // New borrow = 1 iff ai < bi + old_borrow
            borrow = (ai < bi + borrow as u64) as u32;
        }

        (r, borrow)
    }

    /// Constant-time select: if flag == 0 return a else return b
    fn conditional_select(a: &[u32; 8], b: &[u32; 8], flag: Choice) -> Self {
        let mut out = [0u32; 8];
        for ((a_limb, b_limb), out_limb) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
            *out_limb = u32::conditional_select(a_limb, b_limb, flag);
        }
        FieldElement(out)
    }

    /// Reduce a 16-word (512-bit) value modulo
    /// p = 2²⁵⁶ − 2²²⁴ + 2¹⁹² + 2⁹⁶ − 1.
    ///
    /// FIPS 186-5 D.2 fast reduction: the product words A₈..A₁₅ enter the
    /// result as a fixed pattern of added and subtracted 256-bit terms
    /// (T + 2S₁ + 2S₂ + S₃ + S₄ − D₁ − D₂ − D₃ − D₄). The per-word sums of
    /// those terms are accumulated separately as `pos` and `neg`, combined
    /// as pos + 5p − neg to stay non-negative, folded once above bit 255,
    /// and finished with two conditional subtractions of p.
    fn reduce_wide(t: [u32; 16]) -> FieldElement {
        let a = |i: usize| t[i] as u64;

        //------------------------------------------------------------------
        // step 1 – word-wise sums of the additive and subtractive terms
        //------------------------------------------------------------------
        let pos: [u64; 8] = [
            a(0) + a(8) + a(9),
            a(1) + a(9) + a(10),
            a(2) + a(10) + a(11),
            a(3) + 2 * a(11) + 2 * a(12) + a(13),
            a(4) + 2 * a(12) + 2 * a(13) + a(14),
            a(5) + 2 * a(13) + 2 * a(14) + a(15),
            a(6) + 3 * a(14) + 2 * a(15) + a(13),
            a(7) + 3 * a(15) + a(8),
        ];
        let neg: [u64; 8] = [
            a(11) + a(12) + a(13) + a(14),
            a(12) + a(13) + a(14) + a(15),
            a(13) + a(14) + a(15),
            a(15) + a(8) + a(9),
            a(9) + a(10),
            a(10) + a(11),
            a(8) + a(9),
            a(10) + a(11) + a(12) + a(13),
        ];

        //------------------------------------------------------------------
        // step 2 – propagate each into nine 32-bit limbs (top limb = spill)
        //------------------------------------------------------------------
        let mut pos9 = [0u32; 9];
        let mut carry = 0u64;
        for i in 0..8 {
            let v = pos[i] + carry;
            pos9[i] = v as u32;
            carry = v >> 32;
        }
        pos9[8] = carry as u32;

        let mut neg9 = [0u32; 9];
        carry = 0;
        for i in 0..8 {
            let v = neg[i] + carry;
            neg9[i] = v as u32;
            carry = v >> 32;
        }
        neg9[8] = carry as u32;

        //------------------------------------------------------------------
        // step 3 – diff = pos + 5p − neg  (always non-negative, < 2²⁸⁸)
        //------------------------------------------------------------------
        let mut diff = [0u32; 9];
        carry = 0;
        for i in 0..9 {
            let v = pos9[i] as u64 + Self::FIVE_P[i] as u64 + carry;
            diff[i] = v as u32;
            carry = v >> 32;
        }
        let mut borrow = 0u64;
        for i in 0..9 {
            let ai = diff[i] as u64;
            let bi = neg9[i] as u64 + borrow;
            diff[i] = ai.wrapping_sub(bi) as u32;
            borrow = (ai < bi) as u64;
        }

        //------------------------------------------------------------------
        // step 4 – fold the ninth limb: hi·2²⁵⁶ ≡ hi·(2²⁵⁶ − p)  (mod p)
        //------------------------------------------------------------------
        let hi = diff[8] as u64;
        let mut lo = [0u32; 8];
        lo.copy_from_slice(&diff[..8]);

        let mut hi_fold = [0u32; 8];
        let mut c = 0u64;
        for i in 0..8 {
            let v = hi * Self::FOLD[i] as u64 + c;
            hi_fold[i] = v as u32;
            c = v >> 32;
        }

        let (mut r, mut carry) = Self::adc8(lo, hi_fold);
        // A carry out of bit 255 is another 2²⁵⁶ term; folding it can carry
        // at most once more.
        while carry == 1 {
            let (folded, c2) = Self::adc8(r, Self::FOLD);
            r = folded;
            carry = c2;
        }

        //------------------------------------------------------------------
        // step 5 – at most two conditional subtractions of p
        //------------------------------------------------------------------
        let mut out = r;
        for _ in 0..2 {
            let (sub, borrow) = Self::sbb8(out, Self::MOD_LIMBS);
            /* if borrow == 0 → out ≥ p → use the subtracted value */
            let selected = Self::conditional_select(&out, &sub, Choice::from((borrow ^ 1) as u8));
            out = selected.0;
        }

        FieldElement(out)
    }
}
