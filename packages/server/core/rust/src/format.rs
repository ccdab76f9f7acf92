/* packages/server/core/rust/src/format.rs */

/// Currency symbol for an ISO 4217 code; unknown codes render without a symbol.
fn currency_symbol(currency: &str) -> &'static str {
  match currency {
    "COP" | "USD" | "MXN" => "$",
    "EUR" => "\u{20ac}",
    "GBP" => "\u{a3}",
    _ => "",
  }
}

fn group_digits(amount: u64, separator: char) -> String {
  let digits = amount.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(separator);
    }
    out.push(ch);
  }
  out
}

/// Render a whole-unit amount for display, e.g. `$130,000 COP` (en) or `$ 130.000 COP` (es).
pub fn format_for_display(amount: u64, currency: &str, locale: &str) -> String {
  let symbol = currency_symbol(currency);
  let code = currency.to_ascii_uppercase();
  let primary = locale.split(['-', '_']).next().unwrap_or(locale);
  match primary {
    "es" => {
      let grouped = group_digits(amount, '.');
      if symbol.is_empty() { format!("{grouped} {code}") } else { format!("{symbol} {grouped} {code}") }
    }
    _ => {
      let grouped = group_digits(amount, ',');
      format!("{symbol}{grouped} {code}")
    }
  }
}
