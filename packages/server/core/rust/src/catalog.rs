/* packages/server/core/rust/src/catalog.rs */

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CeremoniaError;
use crate::locale::LocalizedText;
use crate::pricing::{ExtraOption, PricingEngine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ceremony {
  pub id: String,
  pub name: LocalizedText,
  pub base_price: u64,
  pub currency: String,
  #[serde(default)]
  pub extras: Vec<ExtraOption>,
}

impl Ceremony {
  pub fn pricing(&self) -> PricingEngine {
    PricingEngine::initialize(self.base_price, self.extras.clone())
  }
}

/// Bookable ceremonies, read once at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
  #[serde(default)]
  ceremonies: Vec<Ceremony>,
}

impl Catalog {
  pub fn new(ceremonies: Vec<Ceremony>) -> Self {
    Self { ceremonies }
  }

  pub fn from_json(json: &str) -> Result<Self, CeremoniaError> {
    serde_json::from_str(json).map_err(|e| CeremoniaError::validation(format!("invalid catalog: {e}")))
  }

  pub fn get(&self, id: &str) -> Option<&Ceremony> {
    self.ceremonies.iter().find(|c| c.id == id)
  }

  pub fn ceremonies(&self) -> &[Ceremony] {
    &self.ceremonies
  }

  pub fn len(&self) -> usize {
    self.ceremonies.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ceremonies.is_empty()
  }
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CeremoniaError> {
  let content = std::fs::read_to_string(path)
    .map_err(|e| CeremoniaError::internal(format!("failed to read {}: {e}", path.display())))?;
  Catalog::from_json(&content)
}

#[cfg(test)]
mod tests {
  use super::*;

  const CATALOG: &str = r#"{
    "ceremonies": [
      {
        "id": "temazcal",
        "name": { "en": "Temazcal", "es": "Temazcal" },
        "base_price": 100000,
        "currency": "COP",
        "extras": [
          { "id": "cacao", "label": { "en": "Cacao", "es": "Cacao" }, "price": 10000, "currency": "COP" },
          { "id": "massage", "label": { "en": "Massage", "es": "Masaje" }, "price": 20000, "currency": "COP" }
        ]
      },
      {
        "id": "sound-bath",
        "name": { "en": "Sound bath", "es": "Baño de sonido" },
        "base_price": 60000,
        "currency": "COP"
      }
    ]
  }"#;

  #[test]
  fn parses_ceremonies_and_extras() {
    let catalog = Catalog::from_json(CATALOG).unwrap();
    assert_eq!(catalog.len(), 2);
    let temazcal = catalog.get("temazcal").unwrap();
    assert_eq!(temazcal.extras.len(), 2);
    assert_eq!(temazcal.extras[1].label.get("es"), "Masaje");
    assert!(catalog.get("sound-bath").unwrap().extras.is_empty());
    assert!(catalog.get("reiki").is_none());
  }

  #[test]
  fn pricing_starts_at_base_price() {
    let catalog = Catalog::from_json(CATALOG).unwrap();
    let mut engine = catalog.get("temazcal").unwrap().pricing();
    assert_eq!(engine.state().total, 100_000);
    engine.toggle_extra("cacao");
    assert_eq!(engine.toggle_extra("massage").total, 117_000);
  }

  #[test]
  fn rejects_invalid_json() {
    let err = Catalog::from_json("{\"ceremonies\": 3}").unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
  }

  #[test]
  fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, CATALOG).unwrap();
    assert_eq!(load_catalog(&path).unwrap().len(), 2);
  }

  #[test]
  fn missing_file_is_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_catalog(&dir.path().join("nope.json")).unwrap_err();
    assert_eq!(err.code(), "INTERNAL_ERROR");
  }
}
