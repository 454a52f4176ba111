//! Plain C ABI addition export.

use crate::arith;

/// Adds two integers. Resolved by hosts under the symbol name `add`.
///
/// Overflow wraps; this function never panics.
#[no_mangle]
pub extern "C" fn add(a: i32, b: i32) -> i32 {
    arith::add(a, b)
}
