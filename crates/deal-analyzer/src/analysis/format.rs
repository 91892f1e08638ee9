/// Whole-dollar amount with thousands separators, e.g. `$205,000` or `-$597`.
pub fn currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

/// Percentage with a fixed number of decimals, e.g. `7.2%`. Exact ties
/// round away from zero (`72.25` -> `72.3%`).
pub fn percent(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    format!("{rounded:.decimals$}%")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_and_rounds() {
        assert_eq!(currency(204_999.999_999_999_97), "$205,000");
        assert_eq!(currency(1_234_567.4), "$1,234,567");
        assert_eq!(currency(999.0), "$999");
        assert_eq!(currency(0.0), "$0");
    }

    #[test]
    fn currency_places_sign_before_symbol() {
        assert_eq!(currency(-596.93), "-$597");
        assert_eq!(currency(-34_000.0), "-$34,000");
        assert_eq!(currency(-0.2), "$0");
    }

    #[test]
    fn percent_respects_precision() {
        assert_eq!(percent(7.199_999_999_999_999, 1), "7.2%");
        assert_eq!(percent(1.0, 2), "1.00%");
        assert_eq!(percent(-9.550_889, 1), "-9.6%");
    }

    #[test]
    fn percent_rounds_ties_up() {
        assert_eq!(percent(72.25, 1), "72.3%");
        assert_eq!(percent(1.125, 2), "1.13%");
        assert_eq!(percent(-2.25, 1), "-2.3%");
    }
}
