//! CLI command handler: resolve options, enumerate inputs, build the album.

use anyhow::{Result, bail};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::Opts;
use crate::build::build_album;
use crate::engine::arg_parser::Cli;
use crate::engine::invoker::ProcessInvoker;
use crate::enumerate::expand_patterns;
use crate::operator::{AutoOperator, Operator, StdinOperator};
use crate::utils::{AlbumToml, apply_file_to_opts, load_album_toml, setup_logging};

/// Overwrite opts field from the command line when given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $field:ident) => {
        if let Some(ref v) = $cli.$field {
            $opts.$field = v.clone();
        }
    };
}

/// Defaults, then `.album.toml`, then command-line flags.
pub fn resolve_opts(cli: &Cli, file: Option<&AlbumToml>) -> Opts {
    let mut opts = Opts::default();
    if let Some(file) = file {
        apply_file_to_opts(file, &mut opts);
    }
    apply_cli_opt!(cli, opts, thumbnail_percent);
    apply_cli_opt!(cli, opts, final_percent);
    apply_cli_opt!(cli, opts, resize_program);
    apply_cli_opt!(cli, opts, rotate_program);
    apply_cli_opt!(cli, opts, caption_max_len);
    apply_cli_opt!(cli, opts, channel_capacity);
    apply_cli_opt!(cli, opts, output);
    apply_cli_opt!(cli, opts, no_prompt);
    apply_cli_opt!(cli, opts, verbose);
    if let Some(ref p) = cli.summary {
        opts.summary = Some(p.clone());
    }
    opts
}

/// Enumerate inputs and build the album with real processes and the chosen operator.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let file = load_album_toml(Path::new("."), cli.config.as_deref());
    let opts = resolve_opts(cli, file.as_ref().ok().and_then(Option::as_ref));
    setup_logging(opts.verbose);
    if let Err(e) = &file {
        warn!("{e:#}; using defaults");
    }
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);

    let inputs = expand_patterns(&cli.patterns)?;
    if inputs.is_empty() {
        bail!("no input images matched {:?}", cli.patterns);
    }

    let mut operator: Box<dyn Operator> = if opts.no_prompt {
        Box::new(AutoOperator)
    } else {
        Box::new(StdinOperator)
    };
    let report = build_album(&inputs, &opts, operator.as_mut(), Arc::new(ProcessInvoker))?;
    info!(
        "wrote {} ({} entries, {} skipped)",
        opts.output.display(),
        report.entry_count(),
        report.skipped_count()
    );
    Ok(())
}
