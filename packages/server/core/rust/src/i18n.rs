/* packages/server/core/rust/src/i18n.rs */

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::errors::CeremoniaError;
use crate::locale::LocaleConfig;

/// Translation trees: locale -> namespace -> nested JSON object of strings.
#[derive(Debug, Clone, Default)]
pub struct Messages {
  default_locale: String,
  trees: HashMap<String, serde_json::Value>,
}

impl Messages {
  pub fn new(default_locale: impl Into<String>) -> Self {
    Self { default_locale: default_locale.into(), trees: HashMap::new() }
  }

  pub fn insert(&mut self, locale: impl Into<String>, tree: serde_json::Value) {
    self.trees.insert(locale.into(), tree);
  }

  pub fn with_locale(mut self, locale: impl Into<String>, tree: serde_json::Value) -> Self {
    self.insert(locale, tree);
    self
  }

  pub fn has_locale(&self, locale: &str) -> bool {
    self.trees.contains_key(locale)
  }

  fn lookup(&self, locale: &str, namespace: &str, key: &str) -> Option<&str> {
    let mut node = self.trees.get(locale)?.get(namespace)?;
    for part in key.split('.') {
      node = node.get(part)?;
    }
    node.as_str()
  }

  /// `namespace` + dotted `key` in `locale`, then in the default locale, then the key itself.
  pub fn translate(&self, locale: &str, namespace: &str, key: &str) -> String {
    self
      .lookup(locale, namespace, key)
      .or_else(|| self.lookup(&self.default_locale, namespace, key))
      .map_or_else(|| key.to_string(), str::to_string)
  }

  /// Whole namespace subtree for `locale`, for handing to a client.
  pub fn namespace(&self, locale: &str, namespace: &str) -> serde_json::Value {
    self
      .trees
      .get(locale)
      .and_then(|t| t.get(namespace))
      .cloned()
      .unwrap_or(serde_json::Value::Object(serde_json::Map::new()))
  }
}

/// Read `<dir>/<locale>.json` for each configured locale. Missing files are skipped with a warning;
/// a file that exists but does not parse is an error.
pub fn load_messages(dir: &Path, config: &LocaleConfig) -> Result<Messages, CeremoniaError> {
  let mut messages = Messages::new(config.default.clone());
  for locale in &config.locales {
    let path = dir.join(format!("{locale}.json"));
    let content = match std::fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) => {
        warn!(path = %path.display(), error = %e, "no messages for locale");
        continue;
      }
    };
    let tree: serde_json::Value = serde_json::from_str(&content)
      .map_err(|e| CeremoniaError::validation(format!("invalid {}: {e}", path.display())))?;
    messages.insert(locale.clone(), tree);
  }
  Ok(messages)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn messages() -> Messages {
    Messages::new("en")
      .with_locale(
        "en",
        serde_json::json!({
          "nav": { "home": "Home", "ceremonies": "Ceremonies" },
          "booking": { "form": { "submit": "Book now", "extras": "Extras" } }
        }),
      )
      .with_locale(
        "es",
        serde_json::json!({
          "nav": { "home": "Inicio" },
          "booking": { "form": { "submit": "Reservar" } }
        }),
      )
  }

  #[test]
  fn translates_nested_key() {
    assert_eq!(messages().translate("es", "booking", "form.submit"), "Reservar");
    assert_eq!(messages().translate("en", "nav", "home"), "Home");
  }

  #[test]
  fn falls_back_to_default_locale() {
    assert_eq!(messages().translate("es", "nav", "ceremonies"), "Ceremonies");
  }

  #[test]
  fn falls_back_to_key() {
    assert_eq!(messages().translate("es", "nav", "venue"), "venue");
    assert_eq!(messages().translate("fr", "missing", "a.b"), "a.b");
  }

  #[test]
  fn non_string_leaf_falls_back_to_key() {
    assert_eq!(messages().translate("en", "booking", "form"), "form");
  }

  #[test]
  fn namespace_subtree() {
    let ns = messages().namespace("es", "nav");
    assert_eq!(ns, serde_json::json!({ "home": "Inicio" }));
    assert_eq!(messages().namespace("es", "nope"), serde_json::json!({}));
  }

  #[test]
  fn load_skips_missing_locale_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("en.json"), r#"{"nav":{"home":"Home"}}"#).unwrap();
    let loaded = load_messages(dir.path(), &LocaleConfig::default()).unwrap();
    assert!(loaded.has_locale("en"));
    assert!(!loaded.has_locale("es"));
    assert_eq!(loaded.translate("es", "nav", "home"), "Home");
  }

  #[test]
  fn load_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("es.json"), "{not json").unwrap();
    let err = load_messages(dir.path(), &LocaleConfig::default()).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
  }
}
