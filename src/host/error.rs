//! Failures on the host side of the bridge.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Why the host could not load a library or resolve a call into it.
#[derive(Debug)]
pub enum BridgeError {
    /// The library could not be located or opened: missing file, invalid
    /// object, unresolved dependencies or ABI mismatch.
    LoadFailed {
        name: String,
        path: PathBuf,
        source: libloading::Error,
    },
    /// A different library already occupies the loader.
    AlreadyLoaded { loaded: String, requested: String },
    /// A bridge was requested before any library was loaded.
    NotLoaded,
    /// The library is resident but does not export the symbol.
    SymbolMissing {
        symbol: String,
        library: String,
        source: libloading::Error,
    },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::LoadFailed { name, path, .. } => {
                write!(f, "failed to load native library '{}' from {}", name, path.display())
            }
            BridgeError::AlreadyLoaded { loaded, requested } => write!(
                f,
                "cannot load native library '{}': '{}' is already loaded",
                requested, loaded
            ),
            BridgeError::NotLoaded => write!(f, "native library has not been loaded"),
            BridgeError::SymbolMissing { symbol, library, .. } => {
                write!(f, "symbol '{}' not found in native library '{}'", symbol, library)
            }
        }
    }
}

impl Error for BridgeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BridgeError::LoadFailed { source, .. } | BridgeError::SymbolMissing { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
