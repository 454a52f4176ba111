//! Host side of the bridge: load a native library once, then call into it.
//!
//! ```no_run
//! use ffi_adder::host::{self, LibrarySpec};
//!
//! host::load(&LibrarySpec::default())?;
//! assert_eq!(host::bridge()?.add(1, 2), 3);
//! # Ok::<(), ffi_adder::host::BridgeError>(())
//! ```

pub mod bridge;
pub mod error;
pub mod loader;

pub use bridge::{AddFn, Bridge, ADD_SYMBOL};
pub use error::BridgeError;
pub use loader::{bridge, load, loaded, LibrarySpec, Loader, NativeLibrary};
