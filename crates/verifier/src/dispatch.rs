//! Fixed-layout request/response surface
//!
//! For packaging the verifier behind a byte-oriented endpoint: the request
//! is five consecutive 32-byte big-endian words, and the response is a
//! single 32-byte big-endian word.
//!
//! | offset | bytes | meaning            |
//! |--------|-------|--------------------|
//! | 0      | 32    | message digest h   |
//! | 32     | 32    | signature r        |
//! | 64     | 32    | signature s        |
//! | 96     | 32    | public key Qx      |
//! | 128    | 32    | public key Qy      |

use crate::error::{validate, Result};
use crate::verify::verify;

/// Exact request length in bytes: h ‖ r ‖ s ‖ Qx ‖ Qy
pub const VERIFY_REQUEST_SIZE: usize = 160;

/// Response length in bytes
pub const VERIFY_RESPONSE_SIZE: usize = 32;

/// Decode a fixed-layout request and run the verification.
///
/// Returns the 32-byte word `0x…01` for a valid signature and the all-zero
/// word otherwise. A request whose length is not exactly 160 bytes yields
/// the all-zero word; no error escapes this surface.
pub fn verify_request(input: &[u8]) -> [u8; VERIFY_RESPONSE_SIZE] {
    let mut output = [0u8; VERIFY_RESPONSE_SIZE];
    if let Ok(true) = try_dispatch(input) {
        output[VERIFY_RESPONSE_SIZE - 1] = 1;
    }
    output
}

/// Length-check and decode the request words, then verify. A mis-sized
/// request is the only error path; the caller renders it as the zero word.
fn try_dispatch(input: &[u8]) -> Result<bool> {
    validate::length("P-256 verify request", input.len(), VERIFY_REQUEST_SIZE)?;

    let digest = word(input, 0);
    let r = word(input, 1);
    let s = word(input, 2);
    let qx = word(input, 3);
    let qy = word(input, 4);

    Ok(verify(&digest, &r, &s, &qx, &qy))
}

/// Copy the `index`-th 32-byte word out of a length-checked request.
fn word(input: &[u8], index: usize) -> [u8; 32] {
    let mut w = [0u8; 32];
    w.copy_from_slice(&input[index * 32..(index + 1) * 32]);
    w
}
