use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount the Spanish way: `1234.5` → `"1234,50 €"`
pub fn format_eur(amount: Decimal) -> String {
    format!("{} €", format_amount(amount))
}

/// Two decimals with a comma separator, no currency sign
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded).replace('.', ",")
}
