//! Native exports of the `ffi_adder` shared library.
//!
//! All functions are marked with `#[no_mangle]` so hosts can resolve them by
//! name. The actual logic is in the `arith` module; these are thin wrappers.

#[cfg(feature = "jni")]
pub mod jni;
pub mod simple;

#[cfg(feature = "jni")]
pub use self::jni::Java_net_lilifei_learning_jni_JniWrapper_add;
pub use simple::add;
