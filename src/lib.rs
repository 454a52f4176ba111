//! ffi-adder - native addition across a C ABI boundary
//!
//! Built as a `cdylib` this crate is the native library: it exports `add`
//! (and, with the `jni` feature, the `JniWrapper.add` JNI entry point).
//! Used as a Rust library it is the host: `host` loads a native library once
//! per process and calls `add` through a resolved function pointer.

pub mod arith;
pub mod ffi;
pub mod host;

/// Library name the host loads when none is given.
pub const DEFAULT_LIBRARY: &str = "ffi_adder";

pub use ffi::add;
