use crate::input::json_input::Billing;
use crate::invoice::{Placeholders, Token};
use crate::time::Hours;

/// The VAT rate applied when the `billing` section enables VAT without
/// naming its own rate.
pub const DEFAULT_VAT_RATE: f64 = 0.081;

/// Rounds to two decimals, with halves rounding up (`0.005` -> `0.01`),
/// not to even.
#[must_use]
fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a monetary amount as `1,234.56`: thousands separators, always
/// two decimals.
#[must_use]
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", round_half_up(value));
    let (integer, decimals) = rounded
        .split_once('.')
        .expect("a number formatted with {:.2} contains a decimal point");

    let mut grouped = String::new();
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}.{}", grouped, decimals)
}

fn money(currency: &str, value: f64) -> String {
    format!("{} {}", currency, format_amount(value))
}

/// Fills in the money tokens from the billed hours: the hourly rate, the
/// net amount and, with VAT enabled, the VAT split.
pub fn apply(billing: &Billing, total_hours: Hours, placeholders: &mut Placeholders) {
    let currency = billing.currency();
    let base = total_hours.as_f64() * billing.hourly_rate();

    placeholders.insert(
        Token::Rate,
        format!("{} {:.0}", currency, billing.hourly_rate()),
    );

    if billing.vat() {
        let vat = base * billing.vat_rate().unwrap_or(DEFAULT_VAT_RATE);

        placeholders.insert(Token::MoneyNoVat, money(currency, base));
        placeholders.insert(Token::Vat, money(currency, vat));
        placeholders.insert(Token::MoneyTotal, money(currency, base + vat));
    } else {
        placeholders.insert(Token::MoneyTotal, money(currency, base));
    }
}
