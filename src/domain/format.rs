//! Display formatting for money and percentages.

/// Groups the integer part with commas: `98081.75` becomes `"98,081.75"`.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `"$98,081.75"`
pub fn currency(value: f64) -> String {
    let body = group_thousands(value.abs(), 2);
    if value < 0.0 {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Whole-dollar amount with an explicit sign: `"+$3,341"`, `"-$524"`.
pub fn signed_currency(value: f64) -> String {
    let body = group_thousands(value.abs(), 0);
    if value < 0.0 {
        format!("-${body}")
    } else {
        format!("+${body}")
    }
}

/// Whole-dollar amount without sign: `"$85,000"`.
pub fn whole_currency(value: f64) -> String {
    format!("${}", group_thousands(value.round(), 0))
}

/// Percentage with explicit sign and two decimals: `"+3.24%"`.
pub fn signed_percent(value: f64) -> String {
    if value < 0.0 {
        format!("{value:.2}%")
    } else {
        format!("+{value:.2}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(98081.75, 2), "98,081.75");
        assert_eq!(group_thousands(1_000_000.0, 0), "1,000,000");
        assert_eq!(group_thousands(999.0, 0), "999");
        assert_eq!(group_thousands(0.5, 1), "0.5");
        assert_eq!(group_thousands(-1234.5, 1), "-1,234.5");
    }

    #[test]
    fn currency_formats() {
        assert_eq!(currency(98081.75), "$98,081.75");
        assert_eq!(currency(-12.0), "-$12.00");
        assert_eq!(whole_currency(82000.0), "$82,000");
    }

    #[test]
    fn signed_values() {
        assert_eq!(signed_currency(3341.0), "+$3,341");
        assert_eq!(signed_currency(-524.0), "-$524");
        assert_eq!(signed_percent(3.2421), "+3.24%");
        assert_eq!(signed_percent(-2.1), "-2.10%");
    }
}
