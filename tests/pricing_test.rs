use farelink::pricing::{apply_markup, price_amount, MARKUP_RATE, PAYMENT_FEE_RATE};

// Fixtures checked against exact decimal arithmetic with half-up rounding
// at the cent: base * 1.02 / 0.971.

#[test]
fn hundred_becomes_105_05() {
    assert_eq!(price_amount("100.00").unwrap(), "105.05");
}

#[test]
fn two_hundred_becomes_210_09() {
    assert_eq!(price_amount("200.00").unwrap(), "210.09");
}

#[test]
fn fixture_grid() {
    let cases = [
        ("50.00", "52.52"),
        ("10.00", "10.50"),
        ("1.00", "1.05"),
        ("0.00", "0.00"),
        ("123.45", "129.68"),
        ("19.99", "21.00"),
        ("999.99", "1050.45"),
        ("0.01", "0.01"),
        ("75.30", "79.10"),
    ];
    for (base, expected) in cases {
        assert_eq!(price_amount(base).unwrap(), expected, "base {base}");
    }
}

#[test]
fn deterministic_for_fixed_input() {
    let first = apply_markup(100.0);
    for _ in 0..100 {
        assert_eq!(apply_markup(100.0), first);
    }
}

#[test]
fn output_exceeds_input_above_one_cent() {
    for base in ["1.00", "42.17", "100.00", "5000.00"] {
        let out: f64 = price_amount(base).unwrap().parse().unwrap();
        let input: f64 = base.parse().unwrap();
        assert!(out > input, "{out} should exceed {input}");
    }
}

#[test]
fn sub_cent_gain_rounds_back_to_base() {
    // 0.01 transforms to 0.0105..., which the cent rounding collapses
    // back onto the base amount.
    assert_eq!(price_amount("0.01").unwrap(), "0.01");
    let out: f64 = price_amount("0.01").unwrap().parse().unwrap();
    assert!(out >= 0.01);
}

#[test]
fn output_has_two_decimals() {
    for base in ["1", "1.5", "33.333", "100"] {
        let out = price_amount(base).unwrap();
        let (_, frac) = out.split_once('.').expect("decimal point");
        assert_eq!(frac.len(), 2, "amount {out}");
    }
}

#[test]
fn rates_match_business_parameters() {
    assert_eq!(MARKUP_RATE, 0.02);
    assert_eq!(PAYMENT_FEE_RATE, 0.029);
}

#[test]
fn rejects_non_numeric_amount() {
    assert!(price_amount("not-a-price").is_err());
}
