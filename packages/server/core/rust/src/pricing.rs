/* packages/server/core/rust/src/pricing.rs */

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::locale::LocalizedText;

/// Discount applied when every extra in the catalog is selected, in percent.
pub const FULL_SET_DISCOUNT_PERCENT: u64 = 10;

/// Optional add-on service for a ceremony. Prices are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraOption {
  pub id: String,
  pub label: LocalizedText,
  pub price: u64,
  pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingPriceState {
  pub selected: BTreeSet<String>,
  pub total: u64,
  pub discount_applied: bool,
}

/// Price state holder for one booking in progress.
/// Every transition recomputes the total from the current selection.
#[derive(Debug, Clone)]
pub struct PricingEngine {
  base_price: u64,
  catalog: Vec<ExtraOption>,
  state: BookingPriceState,
}

impl PricingEngine {
  pub fn initialize(base_price: u64, catalog: Vec<ExtraOption>) -> Self {
    let mut unique: Vec<ExtraOption> = Vec::with_capacity(catalog.len());
    for extra in catalog {
      if unique.iter().any(|e| e.id == extra.id) {
        warn!(id = %extra.id, "duplicate extra id in catalog, keeping first");
        continue;
      }
      unique.push(extra);
    }
    Self {
      base_price,
      catalog: unique,
      state: BookingPriceState { selected: BTreeSet::new(), total: base_price, discount_applied: false },
    }
  }

  /// Flip `extra_id` in the selection. Ids outside the catalog leave the state untouched.
  pub fn toggle_extra(&mut self, extra_id: &str) -> BookingPriceState {
    if !self.catalog.iter().any(|e| e.id == extra_id) {
      debug!(extra_id, "ignoring toggle for unknown extra");
      return self.state.clone();
    }

    let mut selected = self.state.selected.clone();
    if !selected.remove(extra_id) {
      selected.insert(extra_id.to_string());
    }
    self.state = compute_state(self.base_price, &self.catalog, selected);
    self.state.clone()
  }

  pub fn state(&self) -> &BookingPriceState {
    &self.state
  }

  pub fn base_price(&self) -> u64 {
    self.base_price
  }

  pub fn catalog(&self) -> &[ExtraOption] {
    &self.catalog
  }

  /// Selected extras in catalog order.
  pub fn selected_extras(&self) -> Vec<&ExtraOption> {
    self.catalog.iter().filter(|e| self.state.selected.contains(&e.id)).collect()
  }
}

fn compute_state(base_price: u64, catalog: &[ExtraOption], selected: BTreeSet<String>) -> BookingPriceState {
  let subtotal = catalog
    .iter()
    .filter(|e| selected.contains(&e.id))
    .fold(base_price, |acc, e| acc.saturating_add(e.price));

  let discount_applied = !catalog.is_empty() && selected.len() == catalog.len();
  let total = if discount_applied { apply_discount(subtotal) } else { subtotal };
  BookingPriceState { selected, total, discount_applied }
}

/// `amount * 0.9` rounded half away from zero, in integer arithmetic.
pub fn apply_discount(amount: u64) -> u64 {
  let keep = u128::from(100 - FULL_SET_DISCOUNT_PERCENT);
  let scaled = u128::from(amount) * keep;
  u64::try_from((scaled + 50) / 100).unwrap_or(u64::MAX)
}
