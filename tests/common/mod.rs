use std::path::PathBuf;

use ffi_adder::host::LibrarySpec;
use ffi_adder::DEFAULT_LIBRARY;

/// Directory cargo built this test binary into. The `cdylib` is emitted
/// alongside it in `deps/`.
pub fn artifact_dir() -> PathBuf {
    let exe = std::env::current_exe().expect("test executable path");
    exe.parent().expect("test executable directory").to_path_buf()
}

/// Spec pointing at the freshly built `ffi_adder` shared library.
#[allow(dead_code)]
pub fn built_library() -> LibrarySpec {
    let deps = artifact_dir();
    let spec = LibrarySpec::new(DEFAULT_LIBRARY).with_search_dir(&deps);
    match deps.parent() {
        Some(profile_dir) => spec.with_search_dir(profile_dir),
        None => spec,
    }
}

/// Path of the C library mapped into this process.
#[cfg(target_os = "linux")]
#[allow(dead_code)]
pub fn system_libc() -> PathBuf {
    let maps = std::fs::read_to_string("/proc/self/maps").expect("read /proc/self/maps");
    maps.lines()
        .filter_map(|line| line.split_whitespace().nth(5))
        .map(PathBuf::from)
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("libc.so") || name.starts_with("libc-"))
        })
        .expect("libc mapped into the test process")
}

/// Links the system C library into `dir` as `lib<name>.so`: a real shared
/// object that loads fine but exports no `add`.
#[cfg(target_os = "linux")]
#[allow(dead_code)]
pub fn library_without_add(dir: &std::path::Path, name: &str) -> LibrarySpec {
    let spec = LibrarySpec::new(name).with_search_dir(dir);
    std::os::unix::fs::symlink(system_libc(), dir.join(spec.file_name()))
        .expect("symlink libc into scratch dir");
    spec
}
