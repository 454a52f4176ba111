//! Library name resolution and the load-once guard.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use libloading::Library;
use once_cell::sync::OnceCell;

use super::bridge::Bridge;
use super::error::BridgeError;
use crate::DEFAULT_LIBRARY;

/// Which native library to load and where to look for it first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySpec {
    name: String,
    search_dirs: Vec<PathBuf>,
}

impl LibrarySpec {
    /// A bare library name such as `ffi_adder`, without prefix or extension.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search_dirs: Vec::new(),
        }
    }

    /// Appends a directory to probe before the platform search path.
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Adds the directory holding the running executable, where cargo places
    /// the `cdylib` next to the binary.
    pub fn beside_executable(self) -> Self {
        match env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
            Some(dir) => self.with_search_dir(dir),
            None => self,
        }
    }

    /// The bare library name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directories probed in order.
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Platform file name: `libNAME.so`, `libNAME.dylib` or `NAME.dll`.
    pub fn file_name(&self) -> OsString {
        libloading::library_filename(&self.name)
    }

    /// First existing file among the search directories, otherwise the bare
    /// file name so the platform search path applies.
    pub fn resolve(&self) -> PathBuf {
        let file_name = self.file_name();
        self.search_dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
            .unwrap_or_else(|| PathBuf::from(file_name))
    }
}

impl Default for LibrarySpec {
    fn default() -> Self {
        LibrarySpec::new(DEFAULT_LIBRARY).beside_executable()
    }
}

/// A library kept resident for as long as this value lives.
#[derive(Debug)]
pub struct NativeLibrary {
    name: String,
    path: PathBuf,
    library: Library,
}

impl NativeLibrary {
    /// Opens the library named by `spec`.
    ///
    /// Opening runs the library's initializers (ELF `.init_array`,
    /// `DllMain`). Only point a `LibrarySpec` at libraries whose initializers
    /// are sound to run in this process, such as the `ffi_adder` `cdylib`.
    pub fn open(spec: &LibrarySpec) -> Result<Self, BridgeError> {
        let path = spec.resolve();
        // SAFETY: see the initializer contract above. `ffi_adder` itself has
        // no initializers beyond the Rust runtime's.
        let library = unsafe { Library::new(&path) }.map_err(|source| BridgeError::LoadFailed {
            name: spec.name().to_string(),
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            name: spec.name().to_string(),
            path,
            library,
        })
    }

    /// Bare name the library was requested under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path handed to the platform loader.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn library(&self) -> &Library {
        &self.library
    }
}

/// Holds at most one native library, opened on the first successful `load`.
#[derive(Debug, Default)]
pub struct Loader {
    library: OnceCell<NativeLibrary>,
}

impl Loader {
    /// An empty loader.
    pub const fn new() -> Self {
        Self {
            library: OnceCell::new(),
        }
    }

    /// Opens the library the first time; later calls with the same name
    /// return the resident library without reopening it.
    ///
    /// A failed open leaves the loader empty. See `NativeLibrary::open` for
    /// what opening runs.
    pub fn load(&self, spec: &LibrarySpec) -> Result<&NativeLibrary, BridgeError> {
        let library = self.library.get_or_try_init(|| NativeLibrary::open(spec))?;
        if library.name() != spec.name() {
            return Err(BridgeError::AlreadyLoaded {
                loaded: library.name().to_string(),
                requested: spec.name().to_string(),
            });
        }
        Ok(library)
    }

    /// The resident library, if any.
    pub fn get(&self) -> Option<&NativeLibrary> {
        self.library.get()
    }

    /// Whether a library has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.library.get().is_some()
    }

    /// Resolves `add` from the loaded library. Fails with `NotLoaded` until
    /// `load` has succeeded.
    pub fn bridge(&self) -> Result<Bridge<'_>, BridgeError> {
        let library = self.library.get().ok_or(BridgeError::NotLoaded)?;
        Bridge::resolve(library)
    }
}

static PROCESS: Loader = Loader::new();

/// Loads a library into the process-wide loader. It stays resident until
/// the process exits.
pub fn load(spec: &LibrarySpec) -> Result<&'static NativeLibrary, BridgeError> {
    PROCESS.load(spec)
}

/// Bridge over the process-wide library.
pub fn bridge() -> Result<Bridge<'static>, BridgeError> {
    PROCESS.bridge()
}

/// The process-wide library, once `load` has succeeded.
pub fn loaded() -> Option<&'static NativeLibrary> {
    PROCESS.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_name_has_platform_affixes() {
        let spec = LibrarySpec::new("ffi_adder");
        let file_name = spec.file_name();
        let file_name = file_name.to_string_lossy();
        assert!(file_name.contains("ffi_adder"));
        assert!(file_name.starts_with(std::env::consts::DLL_PREFIX));
        assert!(file_name.ends_with(std::env::consts::DLL_SUFFIX));
    }

    #[test]
    fn test_resolve_falls_back_to_bare_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let spec = LibrarySpec::new("ffi_adder").with_search_dir(dir.path());
        assert_eq!(spec.resolve(), PathBuf::from(spec.file_name()));
    }

    #[test]
    fn test_resolve_prefers_first_existing_candidate() {
        let empty = tempfile::tempdir().unwrap();
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let spec = LibrarySpec::new("ffi_adder")
            .with_search_dir(empty.path())
            .with_search_dir(first.path())
            .with_search_dir(second.path());

        fs::write(first.path().join(spec.file_name()), b"").unwrap();
        fs::write(second.path().join(spec.file_name()), b"").unwrap();

        assert_eq!(spec.resolve(), first.path().join(spec.file_name()));
    }

    #[test]
    fn test_default_spec_searches_beside_executable() {
        let spec = LibrarySpec::default();
        assert_eq!(spec.name(), DEFAULT_LIBRARY);
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(spec.search_dirs(), &[exe_dir]);
    }

    #[test]
    fn test_bridge_before_load_fails() {
        let loader = Loader::new();
        assert!(!loader.is_loaded());
        assert!(matches!(loader.bridge(), Err(BridgeError::NotLoaded)));
    }

    #[test]
    fn test_missing_library_leaves_loader_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loader = Loader::new();
        let spec = LibrarySpec::new("ffi_adder_does_not_exist").with_search_dir(dir.path());

        let err = loader.load(&spec).unwrap_err();
        assert!(matches!(err, BridgeError::LoadFailed { ref name, .. } if name == "ffi_adder_does_not_exist"));
        assert!(!loader.is_loaded());
        assert!(matches!(loader.bridge(), Err(BridgeError::NotLoaded)));
    }

    #[test]
    fn test_corrupt_library_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let spec = LibrarySpec::new("corrupt").with_search_dir(dir.path());
        let path = dir.path().join(spec.file_name());
        fs::write(&path, b"this is not a shared object").unwrap();

        let loader = Loader::new();
        match loader.load(&spec) {
            Err(BridgeError::LoadFailed { path: tried, .. }) => assert_eq!(tried, path),
            other => panic!("expected LoadFailed, got {:?}", other.map(NativeLibrary::name)),
        }
        assert!(!loader.is_loaded());
    }
}
