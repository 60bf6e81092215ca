use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions treated as candidate PE images (compared ASCII
/// case-insensitively).
pub const EXECUTABLE_EXTENSIONS: [&str; 2] = ["exe", "dll"];

pub fn has_executable_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            EXECUTABLE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Collects candidate images under `search_path`.
///
/// A file is returned on its own if it has an executable extension. A
/// directory is walked recursively; unreadable subtrees are logged and
/// skipped. Paths are absolute and sorted.
pub fn find_executables<P: AsRef<Path>>(search_path: P) -> Vec<PathBuf> {
    let search_path = search_path.as_ref();
    let root = std::fs::canonicalize(search_path).unwrap_or_else(|_| search_path.to_path_buf());

    let mut files = Vec::new();
    if root.is_file() {
        files.push(root);
    } else if root.is_dir() {
        for entry in WalkDir::new(&root).follow_links(false) {
            match entry {
                // is_file() on the path follows symlinks to files
                Ok(entry) if entry.path().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(err) => log::warn!("{err}"),
            }
        }
    } else {
        log::warn!("{}: no such file or directory", search_path.display());
    }

    files.retain(|f| has_executable_extension(f));
    files.sort();
    files
}

/// Directory holding the running executable, searched when no path is given.
pub fn default_search_root() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
