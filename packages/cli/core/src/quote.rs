/* packages/cli/core/src/quote.rs */

use std::collections::BTreeSet;

use anyhow::{Result, bail};
use ceremonia_core::{Catalog, format_for_display};

use crate::ui;

/// One priced line of a quote, amounts in whole currency units.
#[derive(Debug, PartialEq, Eq)]
pub struct QuoteLine {
  pub label: String,
  pub amount: u64,
}

#[derive(Debug)]
pub struct Quote {
  pub lines: Vec<QuoteLine>,
  pub total: u64,
  pub discount_applied: bool,
  pub currency: String,
}

/// Price `ceremony_id` with each distinct extra selected once.
/// Unlike the HTTP quote endpoint, unknown extras are an error here.
pub fn build_quote(catalog: &Catalog, ceremony_id: &str, extras: &[String], locale: &str) -> Result<Quote> {
  let Some(ceremony) = catalog.get(ceremony_id) else {
    let known: Vec<&str> = catalog.ceremonies().iter().map(|c| c.id.as_str()).collect();
    bail!("unknown ceremony \"{ceremony_id}\" (available: {})", known.join(", "));
  };

  let mut engine = ceremony.pricing();
  let distinct: BTreeSet<&str> = extras.iter().map(String::as_str).collect();
  for extra in distinct {
    if !engine.catalog().iter().any(|e| e.id == extra) {
      let known: Vec<&str> = engine.catalog().iter().map(|e| e.id.as_str()).collect();
      bail!("unknown extra \"{extra}\" for {ceremony_id} (available: {})", known.join(", "));
    }
    engine.toggle_extra(extra);
  }

  let mut lines = vec![QuoteLine { label: ceremony.name.get(locale).to_string(), amount: engine.base_price() }];
  lines.extend(
    engine
      .selected_extras()
      .into_iter()
      .map(|e| QuoteLine { label: e.label.get(locale).to_string(), amount: e.price }),
  );
  let state = engine.state();
  Ok(Quote {
    lines,
    total: state.total,
    discount_applied: state.discount_applied,
    currency: ceremony.currency.clone(),
  })
}

pub fn print_quote(quote: &Quote, locale: &str) {
  let width = quote.lines.iter().map(|l| l.label.chars().count()).max().unwrap_or(0) + 2;
  for line in &quote.lines {
    ui::detail(&ui::row(&line.label, &format_for_display(line.amount, &quote.currency, locale), width));
  }
  if quote.discount_applied {
    ui::arrow("full set of extras selected, 10% off");
  }
  ui::ok(&ui::row("total", &format_for_display(quote.total, &quote.currency, locale), width));
}

#[cfg(test)]
mod tests {
  use super::*;

  fn catalog() -> Catalog {
    Catalog::from_json(
      r#"{"ceremonies":[{"id":"temazcal","name":{"en":"Sweat lodge","es":"Temazcal"},
        "base_price":100000,"currency":"COP","extras":[
          {"id":"cacao","label":{"en":"Cacao","es":"Cacao"},"price":10000,"currency":"COP"},
          {"id":"massage","label":{"en":"Massage","es":"Masaje"},"price":20000,"currency":"COP"}]}]}"#,
    )
    .unwrap()
  }

  #[test]
  fn base_only() {
    let quote = build_quote(&catalog(), "temazcal", &[], "en").unwrap();
    assert_eq!(quote.total, 100000);
    assert_eq!(quote.lines, vec![QuoteLine { label: "Sweat lodge".into(), amount: 100000 }]);
    assert!(!quote.discount_applied);
  }

  #[test]
  fn full_set_is_discounted_and_lines_follow_catalog_order() {
    let extras = vec!["massage".to_string(), "cacao".to_string(), "massage".to_string()];
    let quote = build_quote(&catalog(), "temazcal", &extras, "es").unwrap();
    assert_eq!(quote.total, 117000);
    assert!(quote.discount_applied);
    let labels: Vec<&str> = quote.lines.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["Temazcal", "Cacao", "Masaje"]);
  }

  #[test]
  fn unknown_ids_are_errors() {
    let err = build_quote(&catalog(), "reiki", &[], "en").unwrap_err();
    assert!(err.to_string().contains("temazcal"));
    let err = build_quote(&catalog(), "temazcal", &["sauna".into()], "en").unwrap_err();
    assert!(err.to_string().contains("cacao, massage"));
  }
}
