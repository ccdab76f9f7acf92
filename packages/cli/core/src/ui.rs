/* packages/cli/core/src/ui.rs */

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn ok(msg: &str) {
  println!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn fail(msg: &str) {
  println!("  {RED}\u{2717}{RESET} {msg}");
}

pub fn warn(msg: &str) {
  println!("  {YELLOW}!{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  println!("  {GREEN}\u{2192}{RESET} {msg}");
}

pub fn detail(msg: &str) {
  println!("        {msg}");
}

pub fn banner(cmd: &str) {
  println!();
  println!("  {BOLD}Ceremonia{RESET} {cmd} {DIM}v{VERSION}{RESET}");
  println!();
}

pub fn blank() {
  println!();
}

/// `label ........ value` with the value column aligned at `width`.
pub fn row(label: &str, value: &str, width: usize) -> String {
  let dots = width.saturating_sub(label.chars().count()).max(2);
  format!("{label} {DIM}{}{RESET} {value}", ".".repeat(dots))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn row_pads_to_width() {
    let line = row("base", "$100", 8);
    assert!(line.starts_with("base "));
    assert!(line.contains("...."));
    assert!(line.ends_with(" $100"));
  }

  #[test]
  fn row_keeps_minimum_padding() {
    let line = row("a-very-long-label", "x", 4);
    assert!(line.contains(".."));
  }
}
