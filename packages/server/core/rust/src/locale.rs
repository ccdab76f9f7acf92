/* packages/server/core/rust/src/locale.rs */

use serde::Deserialize;

use crate::errors::CeremoniaError;

pub const SUPPORTED_LOCALES: &[&str] = &["en", "es"];
pub const DEFAULT_LOCALE: &str = "en";

/// Ordered set of supported locale tags plus the designated default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocaleConfig {
  pub locales: Vec<String>,
  #[serde(default = "default_locale")]
  pub default: String,
}

fn default_locale() -> String {
  DEFAULT_LOCALE.to_string()
}

impl LocaleConfig {
  pub fn new(locales: Vec<String>, default: impl Into<String>) -> Result<Self, CeremoniaError> {
    let config = Self { locales, default: default.into() };
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), CeremoniaError> {
    if self.locales.is_empty() {
      return Err(CeremoniaError::validation("locales must not be empty"));
    }
    if !self.is_supported(&self.default) {
      return Err(CeremoniaError::validation(format!(
        "default locale \"{}\" is not in {:?}",
        self.default, self.locales
      )));
    }
    Ok(())
  }

  pub fn is_supported(&self, tag: &str) -> bool {
    self.locales.iter().any(|l| l == tag)
  }

  /// Supported tag equal to `tag` ignoring ASCII case, returned in its configured spelling.
  pub fn find(&self, tag: &str) -> Option<&str> {
    self.locales.iter().find(|l| l.eq_ignore_ascii_case(tag)).map(String::as_str)
  }
}

impl Default for LocaleConfig {
  fn default() -> Self {
    Self {
      locales: SUPPORTED_LOCALES.iter().map(|s| (*s).to_string()).collect(),
      default: default_locale(),
    }
  }
}

/// A string with one rendering per supported locale. A missing Spanish rendering reads as English.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct LocalizedText {
  pub en: String,
  #[serde(default)]
  pub es: String,
}

impl LocalizedText {
  pub fn get(&self, locale: &str) -> &str {
    match locale {
      "es" if !self.es.is_empty() => &self.es,
      _ => &self.en,
    }
  }
}
