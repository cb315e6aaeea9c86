use anyhow::Context;
use filetime::FileTime;
use std::fs;
use std::path::Path;

fn file_name_start(name: &str) -> usize {
    name.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0)
}

/// Split `name` into (stem, extension) where the extension keeps its dot.
///
/// Only the last path component is considered, and leading dots of that
/// component never start an extension, so `".mp3"` has none.
pub fn split_extension(name: &str) -> (&str, &str) {
    let start = file_name_start(name);
    let file_name = &name[start..];
    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();

    match file_name.rfind('.') {
        Some(dot) if dot >= leading_dots && leading_dots < file_name.len() => {
            name.split_at(start + dot)
        }
        _ => (name, ""),
    }
}

/// Base-name: `name` without its extension suffix
pub fn strip_extension(name: &str) -> &str {
    split_extension(name).0
}

/// Lower-cased extension without the dot, if any
pub fn extension_lower(name: &str) -> Option<String> {
    let (_, ext) = split_extension(name);
    ext.strip_prefix('.').map(|e| e.to_lowercase())
}

fn entry_names(path: &Path, want_dirs: bool) -> anyhow::Result<Vec<String>> {
    let entries = fs::read_dir(path)
        .with_context(|| format!("Failed to list directory: {}", path.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in: {}", path.display()))?;
        // Follows symlinks, like a plain `is_dir`/`is_file` check on the joined path
        let entry_path = entry.path();
        let matches = if want_dirs {
            entry_path.is_dir()
        } else {
            entry_path.is_file()
        };
        if matches {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Immediate subdirectory names of `path`, in enumeration order.
pub fn list_subdirs(path: &Path) -> anyhow::Result<Vec<String>> {
    entry_names(path, true)
}

/// Immediate file names of `path`, in enumeration order.
pub fn list_files(path: &Path) -> anyhow::Result<Vec<String>> {
    entry_names(path, false)
}

/// Path of `dir` relative to `root`, `"."` for the root itself
pub fn relative_dir(root: &Path, dir: &Path) -> anyhow::Result<String> {
    let relative = dir.strip_prefix(root).with_context(|| {
        format!("{} is not inside {}", dir.display(), root.display())
    })?;
    if relative.as_os_str().is_empty() {
        Ok(".".to_string())
    } else {
        Ok(relative.to_string_lossy().into_owned())
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy a file, overwriting `dest`, keeping permissions and access/modification times.
///
/// Fails without touching either file when `dest` is `src` itself.
pub fn copy_preserving(src: &Path, dest: &Path) -> anyhow::Result<u64> {
    if is_same_file(src, dest) {
        anyhow::bail!("{} and {} are the same file", src.display(), dest.display());
    }

    let bytes = fs::copy(src, dest)
        .with_context(|| format!("Failed to copy {} -> {}", src.display(), dest.display()))?;

    let metadata = fs::metadata(src)
        .with_context(|| format!("Failed to read metadata: {}", src.display()))?;
    filetime::set_file_times(
        dest,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
    .with_context(|| format!("Failed to set file times: {}", dest.display()))?;

    Ok(bytes)
}
