//! Correctness oracle for a multi-precision modular-arithmetic library.
//!
//! The library under test writes a textual trace of its own test run: a digit
//! width, a working modulus, and a stream of operation records. This crate
//! replays that trace, rebuilding every operand with arbitrary-precision
//! arithmetic and recomputing each claimed result, so any disagreement in the
//! library's math surfaces as a counted, diagnosed mismatch.

pub mod digits;
pub mod report;
pub mod trace;
pub mod verifier;
