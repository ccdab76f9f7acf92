/* packages/cli/core/src/check.rs */

use std::path::Path;

use anyhow::{Result, bail};

use crate::config::CeremoniaConfig;
use crate::site::{Site, load_site};
use crate::ui;

/// Namespaces the page shell reads from every locale.
const REQUIRED_NAMESPACES: &[&str] = &["site", "pages"];

/// Problems that would degrade a running site without stopping it from starting.
pub fn site_warnings(site: &Site) -> Vec<String> {
  let mut warnings = Vec::new();
  for locale in &site.locales.locales {
    if !site.messages.has_locale(locale) {
      warnings.push(format!("no messages for locale \"{locale}\""));
      continue;
    }
    for ns in REQUIRED_NAMESPACES {
      let tree = site.messages.namespace(locale, ns);
      if tree.as_object().is_none_or(|m| m.is_empty()) {
        warnings.push(format!("locale \"{locale}\" has no \"{ns}\" messages"));
      }
    }
  }
  if site.catalog.is_empty() {
    warnings.push("catalog has no ceremonies".to_string());
  }
  for ceremony in site.catalog.ceremonies() {
    for extra in &ceremony.extras {
      if extra.currency != ceremony.currency {
        warnings.push(format!(
          "extra \"{}\" of \"{}\" is priced in {} but the ceremony uses {}",
          extra.id, ceremony.id, extra.currency, ceremony.currency
        ));
      }
    }
  }
  warnings
}

pub fn run_check(config: &CeremoniaConfig, base_dir: &Path) -> Result<()> {
  ui::banner("check");
  let site = match load_site(config, base_dir) {
    Ok(site) => site,
    Err(e) => {
      ui::fail(&format!("{e:#}"));
      bail!("configuration check failed");
    }
  };

  ui::ok(&format!("locales {} (default {})", site.locales.locales.join(", "), site.locales.default));
  ui::ok(&format!("{} ceremonies", site.catalog.len()));
  for ceremony in site.catalog.ceremonies() {
    ui::detail(&format!("{} ({} extras)", ceremony.id, ceremony.extras.len()));
  }
  ui::ok(&format!("protected sections: {}", config.routes.protected.join(", ")));

  let warnings = site_warnings(&site);
  for w in &warnings {
    ui::warn(w);
  }
  ui::blank();
  Ok(())
}

#[cfg(test)]
mod tests {
  use ceremonia_core::{Catalog, LocaleConfig, Messages};

  use super::*;

  fn site(messages: Messages, catalog: &str) -> Site {
    Site {
      locales: LocaleConfig::default(),
      messages,
      catalog: Catalog::from_json(catalog).unwrap(),
    }
  }

  const ONE: &str = r#"{"ceremonies":[{"id":"temazcal","name":{"en":"Temazcal"},"base_price":1,
    "currency":"COP","extras":[{"id":"cacao","label":{"en":"Cacao"},"price":1,"currency":"USD"}]}]}"#;

  #[test]
  fn reports_missing_locales_namespaces_and_currency_mismatch() {
    let messages = Messages::new("en").with_locale("en", serde_json::json!({"site": {"name": "Ceremonia"}}));
    let warnings = site_warnings(&site(messages, ONE));
    assert!(warnings.contains(&"no messages for locale \"es\"".to_string()));
    assert!(warnings.contains(&"locale \"en\" has no \"pages\" messages".to_string()));
    assert!(warnings.iter().any(|w| w.contains("priced in USD")));
    assert_eq!(warnings.len(), 3);
  }

  #[test]
  fn empty_catalog_is_reported() {
    let warnings = site_warnings(&site(Messages::new("en"), "{}"));
    assert!(warnings.contains(&"catalog has no ceremonies".to_string()));
  }
}
