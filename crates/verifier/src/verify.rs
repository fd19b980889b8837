//! ECDSA signature verification glue

use crate::constants::{P256_DIGEST_SIZE, P256_FIELD_ELEMENT_SIZE, P256_SCALAR_SIZE};
use crate::error::Result;
use crate::point::{joint_scalar_mul, Point};
use crate::scalar::Scalar;

/// Verify an ECDSA signature (r, s) over a 32-byte message digest against
/// the public key (Qx, Qy), all big-endian.
///
/// Implements the standard verification equation: with w = s⁻¹ mod n,
/// u = h·w and v = r·w, the signature is valid iff the affine x-coordinate
/// of u·G + v·Q is congruent to r mod n.
///
/// Every malformed input collapses to `false`: r or s outside [1, n−1], a
/// public key that is out of range, at infinity, or off the curve, and a
/// combined point at infinity. The digest is not range-checked; values ≥ n
/// are reduced implicitly, as in FIPS 186 verification. The low-s form is
/// not enforced: both (r, s) and (r, n − s) verify.
pub fn verify(
    digest: &[u8; P256_DIGEST_SIZE],
    r: &[u8; P256_SCALAR_SIZE],
    s: &[u8; P256_SCALAR_SIZE],
    qx: &[u8; P256_FIELD_ELEMENT_SIZE],
    qy: &[u8; P256_FIELD_ELEMENT_SIZE],
) -> bool {
    try_verify(digest, r, s, qx, qy).unwrap_or(false)
}

fn try_verify(
    digest: &[u8; P256_DIGEST_SIZE],
    r: &[u8; P256_SCALAR_SIZE],
    s: &[u8; P256_SCALAR_SIZE],
    qx: &[u8; P256_FIELD_ELEMENT_SIZE],
    qy: &[u8; P256_FIELD_ELEMENT_SIZE],
) -> Result<bool> {
    // Signature words must be canonical: 0 < r, s < n
    let r = Scalar::new(r)?;
    let s = Scalar::new(s)?;

    // Full public-key validation: range, not infinity, on curve
    let q = Point::new_uncompressed(qx, qy)?;

    let z = Scalar::from_bytes_reduced(digest);

    // u = h·s⁻¹ mod n,  v = r·s⁻¹ mod n
    let s_inv = s.invert();
    let u = z.mul_mod_n(&s_inv);
    let v = r.mul_mod_n(&s_inv);

    // x-coordinate of u·G + v·Q; zero if the sum is the point at infinity,
    // which can never match r ∈ [1, n−1]
    let x = joint_scalar_mul(&q, &u, &v);
    let x_mod_n = Scalar::from_bytes_reduced(&x.to_bytes());

    Ok(x_mod_n.ct_eq(&r))
}
