//! Graphfig - render figures of small directed graphs.
//!
//! # Usage
//!
//! ```bash
//! graphfig                          # every built-in example, as PNG
//! graphfig --only scc --format svg
//! graphfig --input graph.json5 --watch
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use graphfig::app::{
    default_output_for, render_gallery, render_input, select_examples, watch_input,
};
use graphfig::config::{
    ConfigFlags, FileFormat, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use graphfig::gallery;
use graphfig::input::to_json;
use graphfig::perf;
use graphfig::render::{DEFAULT_SCALE, RenderOptions};

/// Render figures of small directed graphs
#[derive(Parser, Debug)]
#[command(name = "graphfig", version, about, long_about = None)]
struct Cli {
    /// Render only these built-in examples (repeatable)
    #[arg(long, value_name = "NAME")]
    only: Vec<String>,

    /// Directory for built-in example output
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Output file type for built-in examples and default input output
    #[arg(long, value_enum)]
    format: Option<FileFormat>,

    /// Pixels per plotting unit
    #[arg(long, value_name = "PX")]
    scale: Option<f64>,

    /// Render a JSON5 diagram file instead of the built-in examples
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Destination for --input (format taken from the extension)
    #[arg(long, value_name = "FILE", requires = "input")]
    output: Option<PathBuf>,

    /// Re-render --input whenever it changes
    #[arg(short, long, requires = "input")]
    watch: bool,

    /// Print a built-in example as JSON and exit
    #[arg(long, value_name = "NAME")]
    dump_json: Option<String>,

    /// List built-in examples and exit
    #[arg(long)]
    list: bool,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed render debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(cli.perf || effective.perf);
    let render_debug_log_path = cli
        .render_debug_log
        .clone()
        .or_else(|| effective.render_debug_log.clone())
        .or_else(|| std::env::var_os("GRAPHFIG_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            "Failed to initialize render debug log {}: {}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let format = cli.format.or(effective.format).unwrap_or_default();

    if cli.list {
        for example in &gallery::EXAMPLES {
            println!(
                "{:<4} {:<8} {}",
                example.name,
                example.file_name(format.extension()),
                example.description
            );
        }
        return Ok(());
    }

    if let Some(name) = &cli.dump_json {
        let example = gallery::find(name).with_context(|| format!("Unknown example {name:?}"))?;
        println!("{}", to_json(&example.diagram()?)?);
        return Ok(());
    }

    let scale = cli.scale.or(effective.scale).unwrap_or(DEFAULT_SCALE);
    if !(scale.is_finite() && scale > 0.0) {
        anyhow::bail!("--scale must be a positive number, got {scale}");
    }
    let options = RenderOptions::default().with_scale(scale);

    if let Some(input) = &cli.input {
        if !input.exists() {
            anyhow::bail!("File not found: {}", input.display());
        }
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_for(input, format));
        if cli.watch {
            return watch_input(input, &output, &options, || true);
        }
        return render_input(input, &output, &options);
    }

    let examples = select_examples(&cli.only)?;
    let out_dir = cli
        .out_dir
        .or(effective.out_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let written = render_gallery(&examples, &out_dir, format, &options)
        .context("Failed to render examples")?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
