//! Input enumeration: expand glob patterns and directories into an ordered list of image paths.

use anyhow::{Context, Result, bail};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::engine::tools::{glob_match, has_glob_chars, is_derived_path, is_image_path};

/// Expand every pattern in order and concatenate the results. Duplicates across patterns are kept.
///
/// - an existing directory yields its image files (not recursive, sorted by name)
/// - an existing file yields itself
/// - otherwise the last component is a `*`/`?` glob matched against its parent directory
///
/// Files carrying one of our derived tags (`_thumbnail`, `_rotated`, `_final`) are left out of
/// directory and glob expansion. Paths that are not valid UTF-8 cannot be passed to the tools
/// unchanged, so they are dropped with a warning.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for pattern in patterns {
        let matched = expand_pattern(pattern)?;
        if matched.is_empty() {
            warn!("{pattern}: no images matched");
        }
        debug!("{pattern}: {} matches", matched.len());
        out.extend(matched.into_iter().filter_map(utf8_path));
    }
    Ok(out)
}

fn utf8_path(path: PathBuf) -> Option<String> {
    match path.into_os_string().into_string() {
        Ok(s) => Some(s),
        Err(raw) => {
            warn!(
                "{}: file name is not valid UTF-8, skipping",
                Path::new(&raw).display()
            );
            None
        }
    }
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    if path.is_dir() {
        return list_dir(path, is_image_path);
    }
    if !has_glob_chars(pattern) {
        return Ok(if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let parent = path.parent().unwrap_or(Path::new(""));
    let name_pattern = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid pattern {pattern}"))?;
    if has_glob_chars(&parent.to_string_lossy()) {
        bail!("{pattern}: wildcards are only supported in the file name");
    }
    if !parent.as_os_str().is_empty() && !parent.is_dir() {
        return Ok(Vec::new());
    }
    list_dir(parent, |p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| glob_match(name_pattern, n))
    })
}

/// Files directly inside `dir` (sorted by name) accepted by `keep`, minus derived outputs.
/// An empty `dir` means the current directory; returned paths then carry no `./` prefix.
fn list_dir<F>(dir: &Path, keep: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let root = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let mut out = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("read directory {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = dir.join(entry.file_name());
        if keep(&path) && !is_derived_path(&path) {
            out.push(path);
        }
    }
    Ok(out)
}
