//! Shared size constants for P-256 verification

/// Size of a P-256 base field element in bytes (32 bytes = 256 bits)
pub const P256_FIELD_ELEMENT_SIZE: usize = 32;

/// Size of a P-256 scalar in bytes (32 bytes = 256 bits)
pub const P256_SCALAR_SIZE: usize = 32;

/// Size of the message digest accepted by the verifier
pub const P256_DIGEST_SIZE: usize = 32;
