//! Integer arithmetic behind the exported symbols.
//!
//! The FFI layer in `ffi/` wraps these functions. They must never panic,
//! since a panic unwinding into a foreign caller aborts the process.

/// Adds two 32-bit signed integers with two's-complement wrapping.
///
/// Matches `int` addition in C and on the JVM, so the result is the same
/// whichever side of the boundary computes it.
#[inline]
pub fn add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}
