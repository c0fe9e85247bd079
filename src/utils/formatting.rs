//! Formatting utilities used for CLI and export outputs.

use crate::models::money::Money;

/// Format an amount with a currency symbol and thousands separators,
/// e.g. `R$ 1,234.50`.
pub fn format_money(amount: Money, symbol: &str) -> String {
    let sign = if amount.cents() < 0 { "-" } else { "" };
    let units = amount.units().abs().to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if symbol.is_empty() {
        format!("{}{}.{:02}", sign, grouped, amount.cents_part())
    } else {
        format!("{}{} {}.{:02}", sign, symbol, grouped, amount.cents_part())
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
