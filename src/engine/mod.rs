//! Engine module: CLI handling, external tools, path helpers, progress

pub mod arg_parser;
pub mod cli;
pub mod invoker;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{handle_run, resolve_opts};
pub use invoker::{ImageTools, ProcessInvoker, ToolFailure, ToolInvoker, ToolOutcome};
pub use tools::{
    derive_sibling_path, glob_match, is_derived_path, is_image_path, truncate_chars,
};
