//! Load `.album.toml` (CLI only). Library callers build [`Opts`] directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct AlbumToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    thumbnail_percent: Option<u32>,
    final_percent: Option<u32>,
    resize_program: Option<String>,
    rotate_program: Option<String>,
    caption_max_len: Option<usize>,
    channel_capacity: Option<usize>,
    output: Option<String>,
    summary: Option<String>,
    no_prompt: Option<bool>,
    verbose: Option<bool>,
}

/// Parse config text. Errors are returned so the caller decides whether to warn or fail.
pub fn parse_album_toml(s: &str) -> Result<AlbumToml, toml::de::Error> {
    toml::from_str(s)
}

/// Load the config file: `explicit` if given, else `.album.toml` in `dir`.
/// `Ok(None)` when the default file is absent; a named file that is missing, or any malformed
/// file, is an error so the caller can report it once logging is up.
pub fn load_album_toml(dir: &Path, explicit: Option<&Path>) -> Result<Option<AlbumToml>> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = dir.join(PackagePaths::get().config_filename());
            if !p.is_file() {
                return Ok(None);
            }
            p
        }
    };
    let s = std::fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    let file = parse_album_toml(&s).with_context(|| format!("parse config {}", path.display()))?;
    Ok(Some(file))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $opts_field:ident) => {
        if let Some(ref v) = $sec.$sec_field {
            $opts.$opts_field = v.clone();
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
pub fn apply_file_to_opts(file: &AlbumToml, opts: &mut Opts) {
    let sec = &file.settings;
    apply_file_opt!(sec, opts, thumbnail_percent => thumbnail_percent);
    apply_file_opt!(sec, opts, final_percent => final_percent);
    apply_file_opt!(sec, opts, resize_program => resize_program);
    apply_file_opt!(sec, opts, rotate_program => rotate_program);
    apply_file_opt!(sec, opts, caption_max_len => caption_max_len);
    apply_file_opt!(sec, opts, channel_capacity => channel_capacity);
    apply_file_opt!(sec, opts, no_prompt => no_prompt);
    apply_file_opt!(sec, opts, verbose => verbose);
    if let Some(ref p) = sec.output {
        opts.output = PathBuf::from(p);
    }
    if let Some(ref p) = sec.summary {
        opts.summary = (!p.is_empty()).then(|| PathBuf::from(p));
    }
}
