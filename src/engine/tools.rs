//! Path and filter utilities

use std::path::Path;

use crate::utils::config::{DerivedTags, IMAGE_EXTENSIONS};

/// Derive a sibling path by inserting `_<tag>` before the extension.
///
/// The last `.` in the final path component is the extension boundary, so
/// `archive.tar.gz` becomes `archive.tar_tn.gz`. Without an extension the tag is simply
/// appended (`noext` -> `noext_tn`, no trailing dot). Both stages call this on the same
/// original path, so the thumbnail they compute is always identical.
pub fn derive_sibling_path(path: &str, tag: &str) -> String {
    let name_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) => {
            let dot = name_start + dot;
            format!("{}_{}.{}", &path[..dot], tag, &path[dot + 1..])
        }
        None => format!("{path}_{tag}"),
    }
}

/// True when the file name has a known image extension (case-insensitive).
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// True when the stem ends in one of our derived tags (output of an earlier run).
pub fn is_derived_path(path: &Path) -> bool {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    DerivedTags::ALL
        .iter()
        .any(|tag| stem.strip_suffix(tag).is_some_and(|rest| rest.ends_with('_')))
}

/// File stem as text, used as the caption when prompting is off.
pub fn file_stem_caption(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Simple glob pattern matching (supports * and ?)
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let mut pattern_chars = pattern.chars().peekable();
    let mut text_chars = text.chars().peekable();

    while let Some(&p) = pattern_chars.peek() {
        match p {
            '*' => {
                pattern_chars.next();
                if pattern_chars.peek().is_none() {
                    return true; // trailing * matches everything
                }
                let rest: String = pattern_chars.clone().collect();
                loop {
                    if glob_match(&rest, &text_chars.clone().collect::<String>()) {
                        return true;
                    }
                    if text_chars.next().is_none() {
                        return false;
                    }
                }
            }
            '?' => {
                pattern_chars.next();
                if text_chars.next().is_none() {
                    return false;
                }
            }
            _ => {
                pattern_chars.next();
                if text_chars.next() != Some(p) {
                    return false;
                }
            }
        }
    }

    text_chars.peek().is_none()
}

/// True when `pattern` contains glob metacharacters.
pub fn has_glob_chars(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// Truncate `s` to at most `max_chars` characters, on a char boundary. Returns true if anything was cut.
pub fn truncate_chars(s: &mut String, max_chars: usize) -> bool {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            s.truncate(byte_idx);
            true
        }
        None => false,
    }
}
