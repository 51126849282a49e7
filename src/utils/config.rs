//! Application configuration constants.
//! Tool defaults, prompt limits and channel sizing in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    manifest_filename: String,
    summary_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                manifest_filename: "index.html".to_string(),
                summary_filename: format!("{pkg}.json"),
            }
        })
    }

    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    pub fn manifest_filename(&self) -> &str {
        &self.manifest_filename
    }

    pub fn summary_filename(&self) -> &str {
        &self.summary_filename
    }
}

// ---- Derived path tags ----

/// Tags inserted before the extension of derived files (`photo.jpg` -> `photo_thumbnail.jpg`).
pub struct DerivedTags;

impl DerivedTags {
    pub const THUMBNAIL: &'static str = "thumbnail";
    pub const ROTATED: &'static str = "rotated";
    pub const FINAL: &'static str = "final";

    pub const ALL: [&'static str; 3] = [Self::THUMBNAIL, Self::ROTATED, Self::FINAL];
}

// ---- External tools ----

/// Defaults for the external resize/rotate executables (ImageMagick `convert` conventions).
pub struct ToolDefaults;

impl ToolDefaults {
    pub const RESIZE_PROGRAM: &'static str = "convert";
    pub const ROTATE_PROGRAM: &'static str = "convert";
    pub const THUMBNAIL_PERCENT: u32 = 10;
    pub const FINAL_PERCENT: u32 = 25;
}

// ---- Operator prompts ----

pub struct PromptConsts;

impl PromptConsts {
    /// Longest caption kept; anything beyond is cut with a warning.
    pub const CAPTION_MAX_LEN: usize = 100;
    /// Yes/no and direction answers only need a few characters.
    pub const ANSWER_MAX_LEN: usize = 16;
    /// Unrecognised rotation directions are re-asked this many times before giving up on rotation.
    pub const DIRECTION_ATTEMPTS: usize = 3;
}

// ---- Record channel ----

/// Sizing for the byte pipe between producer and consumer.
pub struct ChannelConsts;

impl ChannelConsts {
    /// Chunks buffered before `push` blocks. Each push writes one chunk (header + payload).
    pub const DEFAULT_CAPACITY: usize = 64;
    /// Width of the length prefix, little-endian.
    pub const LEN_PREFIX_BYTES: usize = 4;
    /// Largest payload a single record may carry (bytes).
    pub const MAX_RECORD_LEN: usize = 64 * 1024;
}

// ---- Enumeration ----

/// Extensions (lowercase) treated as images when a directory is expanded.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp"];
