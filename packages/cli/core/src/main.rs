/* packages/cli/core/src/main.rs */

mod check;
mod config;
mod quote;
mod site;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use ceremonia_axum::IntoAxumRouter;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{CeremoniaConfig, find_config, load_config};

#[derive(Parser)]
#[command(name = "ceremonia", about = "Ceremonia booking site")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Run the HTTP server
  Serve {
    /// Path to ceremonia.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Load config, messages and catalog, and report problems
  Check {
    /// Path to ceremonia.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Price a ceremony with a set of extras
  Quote {
    /// Path to ceremonia.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Ceremony id from the catalog
    #[arg(long)]
    ceremony: String,
    /// Extra id to include (repeatable)
    #[arg(long = "extra")]
    extras: Vec<String>,
    /// Locale for labels and amounts (defaults to i18n.default)
    #[arg(short, long)]
    locale: Option<String>,
  },
}

/// Resolve config path (explicit or auto-detected) and parse it
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, CeremoniaConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_config(&cwd)?
    }
  };
  let config = load_config(&path)?;
  Ok((path, config))
}

fn base_dir(config_path: &Path) -> &Path {
  config_path.parent().unwrap_or_else(|| Path::new("."))
}

fn init_tracing() -> Result<()> {
  let filter = match EnvFilter::try_from_default_env() {
    Ok(filter) => filter,
    Err(_) => EnvFilter::new("info")
      .add_directive("ceremonia_core=info".parse()?)
      .add_directive("ceremonia_axum=info".parse()?)
      .add_directive("tower_http=debug".parse()?),
  };
  tracing_subscriber::fmt().with_env_filter(filter).init();
  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing()?;

  match cli.command {
    Command::Serve { config } => {
      let (config_path, cfg) = resolve_config(config)?;
      let server = site::build_server(&cfg, base_dir(&config_path))?;
      server.serve(&cfg.server.addr()).await.map_err(|e| anyhow!("server error: {e}"))?;
    }
    Command::Check { config } => {
      let (config_path, cfg) = resolve_config(config)?;
      ui::arrow(&format!("using {}", config_path.display()));
      check::run_check(&cfg, base_dir(&config_path))?;
    }
    Command::Quote { config, ceremony, extras, locale } => {
      let (config_path, cfg) = resolve_config(config)?;
      let site = site::load_site(&cfg, base_dir(&config_path))?;
      let locale = match locale {
        Some(l) => site
          .locales
          .find(&l)
          .map(str::to_string)
          .with_context(|| format!("locale \"{l}\" is not one of {:?}", site.locales.locales))?,
        None => site.locales.default.clone(),
      };
      let quote = quote::build_quote(&site.catalog, &ceremony, &extras, &locale)?;
      ui::banner("quote");
      quote::print_quote(&quote, &locale);
      ui::blank();
    }
  }

  Ok(())
}
