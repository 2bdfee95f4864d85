/// Formats a price given in 만원 as the customary 억/만원 reading:
/// 123_456.0 → "12억 3,456만원".
pub fn format_price(price_manwon: f64) -> String {
    let total = price_manwon.round() as i64;
    let eok = total / 10_000;
    let man = total % 10_000;

    match (eok, man) {
        (0, man) => format!("{}만원", group_digits(man)),
        (eok, 0) => format!("{eok}억"),
        (eok, man) => format!("{eok}억 {}만원", group_digits(man)),
    }
}

/// Short form for chart axes: 123_456.0 → "12.3억".
pub fn format_eok(price_manwon: f64) -> String {
    format!("{:.1}억", price_manwon / 10_000.0)
}

/// Fractional rate as a signed percentage: 0.034 → "+3.4%".
pub fn format_percent(rate: f64) -> String {
    format!("{:+.1}%", rate * 100.0)
}

/// Floor area with the customary 평 equivalent: 84.9 → "84.9㎡ (25.7평)".
pub fn format_area(square_meters: f64) -> String {
    const PYEONG_PER_SQM: f64 = 1.0 / 3.305_785;
    format!(
        "{square_meters:.1}㎡ ({:.1}평)",
        square_meters * PYEONG_PER_SQM
    )
}

fn group_digits(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_splits_eok_and_man() {
        assert_eq!(format_price(123_456.0), "12억 3,456만원");
        assert_eq!(format_price(220_000.0), "22억");
        assert_eq!(format_price(8_500.0), "8,500만원");
    }

    #[test]
    fn test_format_eok_short_form() {
        assert_eq!(format_eok(123_456.0), "12.3억");
        assert_eq!(format_eok(58_500.0), "5.9억");
    }

    #[test]
    fn test_format_percent_is_signed() {
        assert_eq!(format_percent(0.034), "+3.4%");
        assert_eq!(format_percent(-0.004), "-0.4%");
    }

    #[test]
    fn test_format_area_includes_pyeong() {
        assert_eq!(format_area(84.9), "84.9㎡ (25.7평)");
    }
}
