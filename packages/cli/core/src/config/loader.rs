/* packages/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::{CONFIG_FILE, CeremoniaConfig};

/// Walk upward from `start` to find `ceremonia.toml`, like Cargo.toml discovery
pub fn find_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_config(path: &Path) -> Result<CeremoniaConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let mut config: CeremoniaConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  apply_port_override(&mut config, std::env::var("PORT").ok().as_deref())?;
  config.validate()?;
  Ok(config)
}

/// `PORT` wins over `server.port`.
pub(super) fn apply_port_override(config: &mut CeremoniaConfig, port: Option<&str>) -> Result<()> {
  if let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) {
    config.server.port = raw.parse().with_context(|| format!("invalid PORT value \"{raw}\""))?;
  }
  Ok(())
}
