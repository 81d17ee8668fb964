use crate::error::ApiError;

/// Flat margin applied to every upstream fare.
pub const MARKUP_RATE: f64 = 0.02;

/// Downstream payment-processing fee the price is grossed up to cover.
pub const PAYMENT_FEE_RATE: f64 = 0.029;

/// Marks up a base amount and grosses it up for the payment fee, rounding
/// half-up at the cent. One-way: applied exactly once per offer, after
/// receiving the upstream price and before returning it to callers.
pub fn apply_markup(base: f64) -> f64 {
    let marked_up = base * (1.0 + MARKUP_RATE);
    let grossed_up = marked_up / (1.0 - PAYMENT_FEE_RATE);
    round_cents(grossed_up)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Same transform over the upstream decimal-string convention, always
/// re-serialized with two decimals.
pub fn price_amount(amount: &str) -> Result<String, ApiError> {
    let base: f64 = amount.trim().parse().map_err(|_| {
        ApiError::Validation(format!("invalid price amount from upstream: \"{amount}\""))
    })?;
    Ok(format!("{:.2}", apply_markup(base)))
}
