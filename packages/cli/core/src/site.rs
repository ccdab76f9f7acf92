/* packages/cli/core/src/site.rs */

use std::path::Path;

use anyhow::{Context, Result};
use ceremonia_core::{
  Catalog, CeremoniaServer, LocaleConfig, Messages, MockAuthProvider, load_catalog, load_messages,
};
use tracing::{info, warn};

use crate::config::CeremoniaConfig;

/// Everything `ceremonia.toml` points at, read from disk.
pub struct Site {
  pub locales: LocaleConfig,
  pub messages: Messages,
  pub catalog: Catalog,
}

pub fn load_site(config: &CeremoniaConfig, base_dir: &Path) -> Result<Site> {
  let locales = config.i18n.locale_config()?;

  let messages_dir = CeremoniaConfig::resolve_path(base_dir, &config.i18n.messages_dir);
  let messages = load_messages(&messages_dir, &locales)
    .with_context(|| format!("failed to load messages from {}", messages_dir.display()))?;

  let catalog_path = CeremoniaConfig::resolve_path(base_dir, &config.catalog.path);
  let catalog = load_catalog(&catalog_path)
    .with_context(|| format!("failed to load catalog from {}", catalog_path.display()))?;

  info!(locales = ?locales.locales, ceremonies = catalog.len(), "site loaded");
  Ok(Site { locales, messages, catalog })
}

fn mock_auth(config: &CeremoniaConfig) -> MockAuthProvider {
  let auth = MockAuthProvider::new();
  if config.auth.mock_users.is_empty() {
    warn!("no [[auth.mock_users]] configured; sign-in will reject every account");
  }
  for user in &config.auth.mock_users {
    auth.add_user(&user.email, &user.password, &user.name);
  }
  auth
}

pub fn build_server(config: &CeremoniaConfig, base_dir: &Path) -> Result<CeremoniaServer> {
  let site = load_site(config, base_dir)?;
  Ok(
    CeremoniaServer::new()
      .locales(site.locales)
      .messages(site.messages)
      .catalog(site.catalog)
      .protected_segments(config.routes.protected.clone())
      .session_cookie(config.server.session_cookie.clone())
      .auth_provider(mock_auth(config)),
  )
}
