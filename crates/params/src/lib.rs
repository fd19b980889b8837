//! Curve domain parameters for the p256verify crates
//!
//! This crate holds nothing but constants: the NIST P-256 domain parameters
//! in big-endian byte form, together with the precomputed Fermat exponents
//! used for modular inversion. Keeping the numbers in their own crate keeps
//! the arithmetic code free of literal tables and lets other tooling reuse
//! the same source of truth.

#![no_std]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod ecdsa;
