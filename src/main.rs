//! Entry point for the PDF vs HTML superscript validator.
//!
//! - Parse command-line arguments.
//! - Load configuration from `conf/config.toml` (or `--config`).
//! - Launch the side-by-side viewer.

mod analysis;
mod annotations;
mod app;
mod cancellation;
mod config;
mod html_page;
mod overlay;
mod pdf_render;
mod scroll_sync;

use crate::app::run_app;
use crate::config::{AppConfig, load_config, serialize_config};
use anyhow::{Context, Result, anyhow, bail};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";
const USAGE: &str =
    "Usage: pdf-html-validator [--config <path>] [--print-config] [<pdf> [<html-base> [<document-id>]]]";

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let mut config = load_config(&args.config_path);
    args.apply(&mut config);
    if args.print_config {
        print!("{}", serialize_config(&config)?);
        return Ok(());
    }
    set_log_level(reload_handle, config.log_level.as_filter_str());

    if !Path::new(&config.pdf_path).exists() {
        warn!(path = %config.pdf_path, "PDF not found; the PDF panel will show an error");
    }
    info!(
        config = %args.config_path.display(),
        pdf = %config.pdf_path,
        html_base = %config.html_base,
        document = %config.document_id,
        level = %config.log_level,
        "Starting validator"
    );

    run_app(config).context("Failed to start the GUI")?;
    Ok(())
}

#[derive(Debug, PartialEq)]
struct CliArgs {
    config_path: PathBuf,
    print_config: bool,
    pdf_path: Option<String>,
    html_base: Option<String>,
    document_id: Option<String>,
}

impl CliArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(pdf) = &self.pdf_path {
            config.pdf_path = pdf.clone();
        }
        if let Some(base) = &self.html_base {
            config.html_base = base.clone();
        }
        if let Some(id) = &self.document_id {
            config.document_id = id.clone();
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut print_config = false;
    let mut positional = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow!("--config needs a path\n{USAGE}"))?;
                config_path = PathBuf::from(path);
            }
            "--print-config" => print_config = true,
            "--help" | "-h" => bail!("{USAGE}"),
            flag if flag.starts_with("--") => bail!("Unknown option {flag}\n{USAGE}"),
            _ => positional.push(arg),
        }
    }

    if positional.len() > 3 {
        bail!("Too many arguments\n{USAGE}");
    }
    let mut positional = positional.into_iter();
    Ok(CliArgs {
        config_path,
        print_config,
        pdf_path: positional.next(),
        html_base: positional.next(),
        document_id: positional.next(),
    })
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
