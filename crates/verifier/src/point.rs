//! P-256 point operations in affine and extended XYZZ coordinates

use crate::constants::P256_FIELD_ELEMENT_SIZE;
use crate::error::{validate, Result};
use crate::field::FieldElement;
use crate::scalar::Scalar;
use p256verify_params::ecdsa::NIST_P256;

/// Affine point (x, y) on the P-256 curve, or the point at infinity.
///
/// Infinity is encoded as (0, 0). The encoding cannot collide with a curve
/// point: b ≠ 0, so (0, 0) never satisfies y² = x³ − 3x + b.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

/// Extended-Jacobian coordinates (X, Y, ZZ, ZZZ) with ZZ = z² and ZZZ = z³,
/// so the affine point is (X/ZZ, Y/ZZZ). The redundant pair saves a
/// squaring on every mixed addition. Infinity is (0, 0, 0, 0).
#[derive(Clone, Debug)]
pub(crate) struct XyzzPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) zz: FieldElement,
    pub(crate) zzz: FieldElement,
}

impl Point {
    /// Create an affine point from big-endian coordinate bytes, performing
    /// the full public-key validity check: both coordinates below p, not
    /// the point at infinity, and on the curve.
    pub fn new_uncompressed(
        x_bytes: &[u8; P256_FIELD_ELEMENT_SIZE],
        y_bytes: &[u8; P256_FIELD_ELEMENT_SIZE],
    ) -> Result<Self> {
        let x_fe = FieldElement::from_bytes(x_bytes)?;
        let y_fe = FieldElement::from_bytes(y_bytes)?;
        validate::parameter(
            !(x_fe.is_zero() && y_fe.is_zero()),
            "P-256 Point",
            "Point at infinity",
        )?;
        validate::parameter(
            Self::is_on_curve(&x_fe, &y_fe),
            "P-256 Point",
            "Point not on curve",
        )?;
        Ok(Point { x: x_fe, y: y_fe })
    }

    /// The identity (point at infinity)
    pub fn identity() -> Self {
        Point {
            x: FieldElement::zero(),
            y: FieldElement::zero(),
        }
    }

    /// Is this the identity point?
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    /// The standard base point G of the P-256 curve
    pub fn generator() -> Self {
        Point::new_uncompressed(&NIST_P256.g_x, &NIST_P256.g_y)
            .expect("Standard base point must be valid")
    }

    /// Extract x-coordinate as big-endian bytes
    pub fn x_coordinate_bytes(&self) -> [u8; P256_FIELD_ELEMENT_SIZE] {
        self.x.to_bytes()
    }

    /// Extract y-coordinate as big-endian bytes
    pub fn y_coordinate_bytes(&self) -> [u8; P256_FIELD_ELEMENT_SIZE] {
        self.y.to_bytes()
    }

    /// Add two points (group law)
    pub fn add(&self, other: &Self) -> Self {
        XyzzPoint::from_affine(self).add_affine(other).to_affine()
    }

    /// Check that (x, y) satisfies y² = x³ − 3x + b,
    /// evaluated left-to-right as (x·x·x) + a·x + b.
    fn is_on_curve(x: &FieldElement, y: &FieldElement) -> bool {
        let y2 = y.square();
        let x3 = x.square().mul(x);
        let a = FieldElement(FieldElement::A_M3);
        let b = FieldElement(FieldElement::B);
        let rhs = x3.add(&a.mul(x)).add(&b);
        y2 == rhs
    }
}

impl XyzzPoint {
    /// Identity in XYZZ form: (0, 0, 0, 0)
    pub fn identity() -> Self {
        XyzzPoint {
            x: FieldElement::zero(),
            y: FieldElement::zero(),
            zz: FieldElement::zero(),
            zzz: FieldElement::zero(),
        }
    }

    /// Is this the identity? ZZ = 0 ∧ ZZZ = 0 is the canonical predicate.
    pub fn is_identity(&self) -> bool {
        self.zz.is_zero() && self.zzz.is_zero()
    }

    /// Lift an affine point to XYZZ with z = 1; infinity maps to infinity.
    pub fn from_affine(p: &Point) -> Self {
        if p.is_identity() {
            return Self::identity();
        }
        XyzzPoint {
            x: p.x.clone(),
            y: p.y.clone(),
            zz: FieldElement::one(),
            zzz: FieldElement::one(),
        }
    }

    /// Mixed addition self + (x₂, y₂) per madd-2008-s, complete over all
    /// infinity and degenerate cases.
    pub fn add_affine(&self, other: &Point) -> Self {
        if other.is_identity() {
            return self.clone();
        }
        if self.is_identity() {
            return Self::from_affine(other);
        }

        // R = y₂·ZZZ₁ − Y₁,  P = x₂·ZZ₁ − X₁
        let r = other.y.mul(&self.zzz).sub(&self.y);
        let p = other.x.mul(&self.zz).sub(&self.x);

        if !p.is_zero() {
            let pp = p.square();
            let ppp = p.mul(&pp);
            let q = self.x.mul(&pp);

            // X₃ = R² − PPP − 2Q
            let x3 = r.square().sub(&ppp).sub(&q).sub(&q);
            // Y₃ = R·(Q − X₃) − Y₁·PPP
            let y3 = r.mul(&q.sub(&x3)).sub(&self.y.mul(&ppp));

            XyzzPoint {
                x: x3,
                y: y3,
                zz: self.zz.mul(&pp),
                zzz: self.zzz.mul(&ppp),
            }
        } else if r.is_zero() {
            // Same point: fall through to the affine doubling
            Self::double_affine(other)
        } else {
            // Opposite points: X₁/ZZ₁ = x₂ but Y₁/ZZZ₁ = −y₂
            Self::identity()
        }
    }

    /// Double an affine point into XYZZ per mdbl-2008-s-1 (z₁ = 1, so
    /// ZZ₃ = V and ZZZ₃ = W directly). The input must not be infinity.
    fn double_affine(p: &Point) -> Self {
        let u = p.y.add(&p.y);
        let v = u.square();
        let w = u.mul(&v);
        let s = p.x.mul(&v);

        // M = 3x₁² + a
        let x2 = p.x.square();
        let m = x2.add(&x2).add(&x2).add(&FieldElement(FieldElement::A_M3));

        // X₃ = M² − 2S
        let x3 = m.square().sub(&s).sub(&s);
        // Y₃ = M·(S − X₃) − W·y₁
        let y3 = m.mul(&s.sub(&x3)).sub(&w.mul(&p.y));

        XyzzPoint {
            x: x3,
            y: y3,
            zz: v,
            zzz: w,
        }
    }

    /// Point doubling per dbl-2008-s-1; infinity passes through.
    pub fn double(&self) -> Self {
        if self.is_identity() {
            return self.clone();
        }

        let u = self.y.add(&self.y);
        let v = u.square();
        let w = u.mul(&v);
        let s = self.x.mul(&v);

        // M = 3X₁² + a·ZZ₁²
        let x2 = self.x.square();
        let a = FieldElement(FieldElement::A_M3);
        let m = x2.add(&x2).add(&x2).add(&a.mul(&self.zz.square()));

        // X₃ = M² − 2S
        let x3 = m.square().sub(&s).sub(&s);
        // Y₃ = M·(S − X₃) − W·Y₁
        let y3 = m.mul(&s.sub(&x3)).sub(&w.mul(&self.y));

        XyzzPoint {
            x: x3,
            y: y3,
            zz: v.mul(&self.zz),
            zzz: w.mul(&self.zzz),
        }
    }

    /// Convert back to affine coordinates. One field inversion: ZZZ⁻¹ gives
    /// y directly, and z⁻¹ = ZZ·ZZZ⁻¹ squares into the x denominator.
    pub fn to_affine(&self) -> Point {
        if self.is_identity() {
            return Point::identity();
        }
        let zzz_inv = self.zzz.invert();
        let z_inv = self.zz.mul(&zzz_inv);
        let zz_inv = z_inv.square();
        Point {
            x: self.x.mul(&zz_inv),
            y: self.y.mul(&zzz_inv),
        }
    }

    /// The affine x-coordinate alone: only ZZ needs inverting, since
    /// x = X/z² = X/ZZ. Branch-free at infinity: the total inversion maps
    /// ZZ = 0 to 0, so the result is 0 there.
    pub fn affine_x(&self) -> FieldElement {
        self.x.mul(&self.zz.invert())
    }
}

/// Summand for a non-zero bit pair (vᵢ << 1) | uᵢ: 1 → G, 2 → Q, 3 → H.
fn summand<'a>(pair: u8, g: &'a Point, q: &'a Point, h: &'a Point) -> &'a Point {
    match pair {
        1 => g,
        2 => q,
        _ => h,
    }
}

/// Affine x-coordinate of u·G + v·Q via Straus–Shamir joint scalar
/// multiplication.
///
/// H = G + Q is precomputed with one full mixed addition (correct even for
/// Q = ±G), giving the 4-entry summand table {∅, G, Q, H} indexed by the
/// bit pair (vᵢ << 1) | uᵢ. The scan starts at the most significant
/// non-zero pair so the accumulator never doubles infinity; each remaining
/// bit costs one doubling and at most one mixed addition.
///
/// Returns zero when u = v = 0 or when the sum lands on infinity.
pub(crate) fn joint_scalar_mul(q: &Point, u: &Scalar, v: &Scalar) -> FieldElement {
    if u.is_zero() && v.is_zero() {
        return FieldElement::zero();
    }

    let g = Point::generator();
    let h = XyzzPoint::from_affine(&g).add_affine(q).to_affine();

    let mut i = 255usize;
    let mut acc = loop {
        let pair = u.bit(i) | (v.bit(i) << 1);
        if pair != 0 {
            break XyzzPoint::from_affine(summand(pair, &g, q, &h));
        }
        // Cannot underflow: (u, v) ≠ (0, 0)
        i -= 1;
    };

    while i > 0 {
        i -= 1;
        acc = acc.double();
        let pair = u.bit(i) | (v.bit(i) << 1);
        if pair != 0 {
            acc = acc.add_affine(summand(pair, &g, q, &h));
        }
    }

    acc.affine_x()
}
