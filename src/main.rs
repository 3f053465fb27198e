//! Headless entry point.
//!
//! Loads a content directory, navigates to a path the way a browser would
//! on first load, and prints the resulting view.
//!
//! ```text
//! techblog [--dark] [--content-dir DIR] [PATH]
//! ```
//!
//! `PATH` defaults to `/`. Configuration comes from the TOML file named by
//! `TECHBLOG_CONFIG`, then `TECHBLOG_*` environment variables
//! (`TECHBLOG_CONTENT_DIR`, `TECHBLOG_TRACE_LEVEL`, ...), then flags.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use std::collections::BTreeMap;
use std::process::ExitCode;
use techblog::app::{Event, MemoryHost};
use techblog::notify::ENTER_DELAY_MS;
use techblog::{infrastructure, initialize, observability, ui, Config};

const ENV_PREFIX: &str = "TECHBLOG_";
const CONFIG_ENV: &str = "TECHBLOG_CONFIG";

/// Render the blog view at a path.
#[derive(Debug, Parser)]
#[command(name = "techblog", version, about)]
struct Args {
    /// Use the dark theme when no preference is stored.
    #[arg(long)]
    dark: bool,

    /// Directory of Markdown articles; overrides the config.
    #[arg(long, value_name = "DIR")]
    content_dir: Option<String>,

    /// Address to open, such as `/post/3`.
    #[arg(value_name = "PATH")]
    path: Option<String>,
}

fn load_config() -> techblog::Result<Config> {
    let base = match std::env::var(CONFIG_ENV) {
        Ok(file) if !file.is_empty() => Config::from_file(infrastructure::expand_tilde(&file))?,
        _ => Config::default(),
    };

    let env: BTreeMap<String, String> = std::env::vars()
        .filter(|(key, _)| key != CONFIG_ENV)
        .filter_map(|(key, value)| {
            key.strip_prefix(ENV_PREFIX)
                .map(|name| (name.to_ascii_lowercase(), value))
        })
        .collect();

    Ok(base.merged_with(&env))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("techblog: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(dir) = &args.content_dir {
        config.content_dir = infrastructure::expand_tilde(dir);
    }

    observability::init_tracing(&config);
    let _span = tracing::info_span!("techblog_main").entered();

    let href = args.path.unwrap_or_else(|| "/".to_string());
    let mut runtime = initialize(&config, args.dark, MemoryHost::at(href.clone()));

    runtime.dispatch(Event::Mount { href }, 0);
    runtime.run_worker(0);
    // Let freshly raised notifications finish entering so they print.
    runtime.advance_to(ENTER_DELAY_MS);

    print!("{}", ui::render(&runtime.view()));
    println!("[location: {}]", runtime.host().location());

    if runtime.state().store.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
