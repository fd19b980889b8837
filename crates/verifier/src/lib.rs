//! ECDSA signature verification over NIST P-256
//!
//! A self-contained verifier for ECDSA signatures on the secp256r1 curve:
//! given a 32-byte message digest, a signature pair (r, s), and an
//! uncompressed affine public key (Qx, Qy), it answers valid / not valid
//! and nothing else.
//!
//! The kernel works in extended-Jacobian XYZZ coordinates so that every
//! step of the scalar multiplication costs only field multiplications, with
//! a single Fermat inversion amortized at the end. The two scalars are
//! processed in lockstep (Straus–Shamir) against the precomputed table
//! {𝒪, G, Q, G+Q}, halving the addition count of a naive double-and-add.
//!
//! There is no signing, key generation, or hashing here; the digest arrives
//! precomputed. Verification is a pure function of its inputs: no I/O, no
//! allocation, no shared state, and safe to run from any number of threads
//! concurrently.
//!
//! # Example
//!
//! ```
//! use p256verify::verify;
//!
//! let digest = [0u8; 32];
//! let r = [0u8; 32];
//! let s = [0u8; 32];
//! let qx = [0u8; 32];
//! let qy = [0u8; 32];
//!
//! // A zero signature is malformed and rejected.
//! assert!(!verify(&digest, &r, &s, &qx, &qy));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

mod constants;
pub use constants::{P256_DIGEST_SIZE, P256_FIELD_ELEMENT_SIZE, P256_SCALAR_SIZE};

mod field;
pub use field::FieldElement;

mod scalar;
pub use scalar::Scalar;

mod point;
pub use point::Point;

mod verify;
pub use verify::verify;

pub mod dispatch;
