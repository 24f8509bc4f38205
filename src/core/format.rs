/// Formats an amount for display in Indian notation: crores above 1,00,00,000,
/// lakhs above 1,00,000, otherwise a comma-grouped rupee figure.
pub fn format_currency(amount: f64) -> String {
    if amount >= 10_000_000.0 {
        format!("₹{:.2} Cr", amount / 10_000_000.0)
    } else if amount >= 100_000.0 {
        format!("₹{:.2} L", amount / 100_000.0)
    } else {
        format!("₹{}", group_thousands(amount.round() as i64))
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
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
    fn formats_crores_lakhs_and_plain_rupees() {
        assert_eq!(format_currency(25_000_000.0), "₹2.50 Cr");
        assert_eq!(format_currency(10_000_000.0), "₹1.00 Cr");
        assert_eq!(format_currency(2_575_000.0), "₹25.75 L");
        assert_eq!(format_currency(100_000.0), "₹1.00 L");
        assert_eq!(format_currency(99_999.0), "₹99,999");
        assert_eq!(format_currency(12_500.0), "₹12,500");
        assert_eq!(format_currency(500.0), "₹500");
        assert_eq!(format_currency(0.0), "₹0");
    }
}
