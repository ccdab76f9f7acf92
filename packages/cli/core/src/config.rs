/* packages/cli/core/src/config.rs */

mod loader;

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use ceremonia_core::LocaleConfig;
use serde::Deserialize;

pub use loader::{find_config, load_config};

pub const CONFIG_FILE: &str = "ceremonia.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CeremoniaConfig {
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub i18n: I18nSection,
  #[serde(default)]
  pub catalog: CatalogSection,
  #[serde(default)]
  pub routes: RoutesSection,
  #[serde(default)]
  pub auth: AuthSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  #[serde(default = "default_session_cookie")]
  pub session_cookie: String,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { host: default_host(), port: default_port(), session_cookie: default_session_cookie() }
  }
}

impl ServerSection {
  pub fn addr(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct I18nSection {
  #[serde(default = "default_locales")]
  pub locales: Vec<String>,
  #[serde(default = "default_locale")]
  pub default: String,
  #[serde(default = "default_messages_dir")]
  pub messages_dir: String,
}

impl Default for I18nSection {
  fn default() -> Self {
    Self { locales: default_locales(), default: default_locale(), messages_dir: default_messages_dir() }
  }
}

impl I18nSection {
  /// Same rules the server applies at startup, so a config that passes here also loads.
  pub fn locale_config(&self) -> Result<LocaleConfig> {
    LocaleConfig::new(self.locales.clone(), self.default.clone())
      .map_err(|e| anyhow!("invalid [i18n] section: {}", e.message()))
  }

  pub fn validate(&self) -> Result<()> {
    self.locale_config().map(|_| ())
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSection {
  #[serde(default = "default_catalog_path")]
  pub path: String,
}

impl Default for CatalogSection {
  fn default() -> Self {
    Self { path: default_catalog_path() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutesSection {
  #[serde(default = "default_protected")]
  pub protected: Vec<String>,
}

impl Default for RoutesSection {
  fn default() -> Self {
    Self { protected: default_protected() }
  }
}

/// Development accounts seeded into the mock auth provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSection {
  #[serde(default)]
  pub mock_users: Vec<MockUserConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MockUserConfig {
  pub email: String,
  pub password: String,
  #[serde(default)]
  pub name: String,
}

fn default_host() -> String {
  "0.0.0.0".to_string()
}

fn default_port() -> u16 {
  3000
}

fn default_session_cookie() -> String {
  ceremonia_core::DEFAULT_SESSION_COOKIE.to_string()
}

fn default_locales() -> Vec<String> {
  ceremonia_core::SUPPORTED_LOCALES.iter().map(|l| (*l).to_string()).collect()
}

fn default_locale() -> String {
  ceremonia_core::DEFAULT_LOCALE.to_string()
}

fn default_messages_dir() -> String {
  "messages".to_string()
}

fn default_catalog_path() -> String {
  "catalog.json".to_string()
}

fn default_protected() -> Vec<String> {
  vec!["booking".to_string(), "profile".to_string()]
}

impl CeremoniaConfig {
  pub fn validate(&self) -> Result<()> {
    self.i18n.validate()?;
    if self.server.session_cookie.is_empty() {
      bail!("server.session_cookie must not be empty");
    }
    if let Some(seg) = self.routes.protected.iter().find(|s| s.is_empty() || s.contains('/')) {
      bail!("routes.protected entry \"{seg}\" must be a single path segment");
    }
    Ok(())
  }

  /// Resolve a config-relative path against the directory holding `ceremonia.toml`.
  pub fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() { p.to_path_buf() } else { base_dir.join(p) }
  }
}

#[cfg(test)]
mod tests;
