/* packages/cli/core/src/config/tests.rs */

use super::loader::apply_port_override;
use super::*;

#[test]
fn empty_config_uses_defaults() {
  let config: CeremoniaConfig = toml::from_str("").unwrap();
  assert_eq!(config.server.host, "0.0.0.0");
  assert_eq!(config.server.port, 3000);
  assert_eq!(config.server.session_cookie, "ceremonia-session");
  assert_eq!(config.i18n.locales, vec!["en", "es"]);
  assert_eq!(config.i18n.default, "en");
  assert_eq!(config.i18n.messages_dir, "messages");
  assert_eq!(config.catalog.path, "catalog.json");
  assert_eq!(config.routes.protected, vec!["booking", "profile"]);
  assert!(config.auth.mock_users.is_empty());
  assert!(config.validate().is_ok());
}

#[test]
fn parse_full_config() {
  let toml_str = r#"
[server]
host = "127.0.0.1"
port = 8080
session_cookie = "sid"

[i18n]
locales = ["es", "en"]
default = "es"
messages_dir = "translations"

[catalog]
path = "data/ceremonies.json"

[routes]
protected = ["booking", "profile", "admin"]

[[auth.mock_users]]
email = "ana@example.com"
password = "secret"
name = "Ana"
"#;
  let config: CeremoniaConfig = toml::from_str(toml_str).unwrap();
  assert_eq!(config.server.addr(), "127.0.0.1:8080");
  assert_eq!(config.server.session_cookie, "sid");
  assert_eq!(config.i18n.default, "es");
  assert_eq!(config.i18n.messages_dir, "translations");
  assert_eq!(config.catalog.path, "data/ceremonies.json");
  assert_eq!(config.routes.protected.len(), 3);
  assert_eq!(config.auth.mock_users[0].name, "Ana");
  assert!(config.validate().is_ok());
}

#[test]
fn i18n_rejects_empty_locales() {
  let config: CeremoniaConfig = toml::from_str("[i18n]\nlocales = []\n").unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("must not be empty"));
}

#[test]
fn i18n_rejects_default_outside_locales() {
  let config: CeremoniaConfig = toml::from_str("[i18n]\nlocales = [\"en\"]\ndefault = \"fr\"\n").unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("\"fr\""));
}

#[test]
fn i18n_default_must_match_a_locale_exactly() {
  let config: CeremoniaConfig = toml::from_str("[i18n]\nlocales = [\"en\", \"es\"]\ndefault = \"EN\"\n").unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("\"EN\""));
}

#[test]
fn i18n_validation_matches_site_loading() {
  let config: CeremoniaConfig = toml::from_str("[i18n]\nlocales = [\"es\"]\ndefault = \"es\"\n").unwrap();
  let locales = config.i18n.locale_config().unwrap();
  assert_eq!(locales.default, "es");
  assert_eq!(locales.locales, vec!["es"]);
}

#[test]
fn protected_segments_must_be_single_segments() {
  let config: CeremoniaConfig = toml::from_str("[routes]\nprotected = [\"a/b\"]\n").unwrap();
  assert!(config.validate().is_err());
}

#[test]
fn port_override() {
  let mut config = CeremoniaConfig::default();
  apply_port_override(&mut config, Some("4000")).unwrap();
  assert_eq!(config.server.port, 4000);

  apply_port_override(&mut config, Some("  ")).unwrap();
  assert_eq!(config.server.port, 4000);

  apply_port_override(&mut config, None).unwrap();
  assert_eq!(config.server.port, 4000);

  assert!(apply_port_override(&mut config, Some("http")).is_err());
}

#[test]
fn find_config_walks_upward() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join(CONFIG_FILE), "").unwrap();
  let nested = dir.path().join("a/b");
  std::fs::create_dir_all(&nested).unwrap();

  let found = find_config(&nested).unwrap();
  assert_eq!(found, dir.path().canonicalize().unwrap().join(CONFIG_FILE));
}

#[test]
fn load_config_reports_parse_errors() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join(CONFIG_FILE);
  std::fs::write(&path, "[server\nport = 1").unwrap();
  let err = load_config(&path).unwrap_err();
  assert!(err.to_string().contains("failed to parse"));
}

#[test]
fn resolve_path_relative_to_config_dir() {
  let base = Path::new("/srv/site");
  assert_eq!(CeremoniaConfig::resolve_path(base, "catalog.json"), PathBuf::from("/srv/site/catalog.json"));
  assert_eq!(CeremoniaConfig::resolve_path(base, "/etc/catalog.json"), PathBuf::from("/etc/catalog.json"));
}
