pub mod album_toml;
pub mod config;
pub mod logger;

pub use album_toml::{AlbumToml, apply_file_to_opts, load_album_toml, parse_album_toml};
pub use config::*;
pub use logger::setup_logging;
