//! Numeric parsing for messy spreadsheet cells.

use crate::cell::Cell;

/// Symbols stripped from currency-formatted text before parsing.
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Convert a cell into a number, or `None` when it holds no numeric value.
///
/// Never fails: blanks, NaN and unparsable text all come back as `None`.
pub fn parse_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) if n.is_nan() => None,
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => parse_number_str(s),
    }
}

/// Parse currency-formatted text (`"$1,234.56"`, `" 12 000 "`) as a float.
///
/// Currency symbols, thousands separators and all whitespace are removed;
/// whatever remains must be a complete, finite floating-point literal.
pub fn parse_number_str(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && !CURRENCY_SYMBOLS.contains(c))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    // f64::from_str also accepts "inf" / "NaN"; those are not prices.
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn currency_formatted_text() {
        assert_eq!(parse_number(&Cell::from("$1,234.56")), Some(1234.56));
        assert_eq!(parse_number(&Cell::from("  $ 10.00 ")), Some(10.0));
        assert_eq!(parse_number(&Cell::from("€5")), Some(5.0));
        assert_eq!(parse_number(&Cell::from("1 000")), Some(1000.0));
        assert_eq!(parse_number(&Cell::from("-3.5")), Some(-3.5));
    }

    #[test]
    fn blanks_are_none() {
        assert_eq!(parse_number(&Cell::Empty), None);
        assert_eq!(parse_number(&Cell::from("")), None);
        assert_eq!(parse_number(&Cell::from("   ")), None);
        assert_eq!(parse_number(&Cell::from("$")), None);
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_number(&Cell::from("abc")), None);
        assert_eq!(parse_number(&Cell::from("12abc")), None);
        assert_eq!(parse_number(&Cell::from("1.2.3")), None);
        assert_eq!(parse_number(&Cell::from("inf")), None);
        assert_eq!(parse_number(&Cell::from("NaN")), None);
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(parse_number(&Cell::Number(42.0)), Some(42.0));
        assert_eq!(parse_number(&Cell::from(0i64)), Some(0.0));
        assert_eq!(parse_number(&Cell::Number(f64::NAN)), None);
    }

    proptest! {
        #[test]
        fn formatted_cents_round_trip(cents in 0u64..10_000_000_000u64) {
            let whole = cents / 100;
            let frac = cents % 100;
            // Group the whole part with thousands separators.
            let digits = whole.to_string();
            let mut grouped = String::new();
            for (i, ch) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(ch);
            }
            let text = format!("${grouped}.{frac:02}");
            let expected: f64 = format!("{whole}.{frac:02}").parse().unwrap();
            prop_assert_eq!(parse_number(&Cell::Text(text)), Some(expected));
        }

        #[test]
        fn never_panics(s in ".*") {
            let _ = parse_number(&Cell::Text(s));
        }
    }
}
