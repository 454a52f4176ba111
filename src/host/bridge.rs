//! Calls into the loaded library through resolved C function pointers.

use libloading::Symbol;

use super::error::BridgeError;
use super::loader::NativeLibrary;

/// Name of the exported addition symbol.
pub const ADD_SYMBOL: &str = "add";

/// Signature of the exported `add` symbol.
pub type AddFn = unsafe extern "C" fn(i32, i32) -> i32;

/// Handle to the `add` function of a resident library. Cannot outlive it.
pub struct Bridge<'lib> {
    add: Symbol<'lib, AddFn>,
}

impl<'lib> Bridge<'lib> {
    /// Resolves the `add` symbol, which host libraries export as `AddFn`.
    pub fn resolve(library: &'lib NativeLibrary) -> Result<Self, BridgeError> {
        // SAFETY: `ADD_SYMBOL` is exported with the `AddFn` signature by the
        // libraries this host loads (`ffi::simple::add`).
        unsafe { Self::resolve_named(library, ADD_SYMBOL) }
    }

    /// Resolves an `AddFn`-shaped symbol under a custom name.
    ///
    /// # Safety
    /// - `symbol`, if exported by `library`, must have exactly the `AddFn`
    ///   signature: `extern "C" fn(i32, i32) -> i32`
    /// - the function must be callable with any pair of `i32` values
    ///
    /// A name exported with any other signature makes `Bridge::add` undefined
    /// behavior.
    ///
    /// ```compile_fail,E0133
    /// # fn resolve(library: &ffi_adder::host::NativeLibrary) {
    /// let _ = ffi_adder::host::Bridge::resolve_named(library, "getpid");
    /// # }
    /// ```
    pub unsafe fn resolve_named(
        library: &'lib NativeLibrary,
        symbol: &str,
    ) -> Result<Self, BridgeError> {
        let add = library.library().get::<AddFn>(symbol.as_bytes()).map_err(|source| {
            BridgeError::SymbolMissing {
                symbol: symbol.to_string(),
                library: library.name().to_string(),
                source,
            }
        })?;
        Ok(Self { add })
    }

    /// Calls the resolved function.
    pub fn add(&self, a: i32, b: i32) -> i32 {
        // SAFETY: `add` stays valid while the borrowed library is resident, and
        // its signature is guaranteed by `resolve` or the caller of
        // `resolve_named`.
        unsafe { (*self.add)(a, b) }
    }
}
