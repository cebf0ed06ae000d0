//! Display formatting for list rows. Only presentation: the values sent to
//! and received from the API stay plain numbers.

/// Formats an amount in the fixed `de-DE` EUR presentation, e.g. `25.000,00 €`.
pub fn format_price(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "{}{},{:02} €",
        sign,
        group_thousands(cents / 100, '.'),
        cents % 100
    )
}

/// Formats an odometer reading, e.g. `120,000 km`.
pub fn format_mileage(km: i32) -> String {
    let sign = if km < 0 { "-" } else { "" };
    format!(
        "{}{} km",
        sign,
        group_thousands(u64::from(km.unsigned_abs()), ',')
    )
}

/// Formats engine displacement, e.g. `2.0L`.
pub fn format_engine(liters: f64) -> String {
    format!("{:.1}L", liters)
}

/// Formats fuel consumption, e.g. `6.5 L/100km`.
pub fn format_consumption(per_100km: f64) -> String {
    format!("{:.1} L/100km", per_100km)
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(25000.0), "25.000,00 €");
        assert_eq!(format_price(1_000_000.0), "1.000.000,00 €");
        assert_eq!(format_price(620.5), "620,50 €");
        assert_eq!(format_price(0.0), "0,00 €");
        assert_eq!(format_price(99.999), "100,00 €");
    }

    #[test]
    fn test_format_mileage() {
        assert_eq!(format_mileage(120_000), "120,000 km");
        assert_eq!(format_mileage(999), "999 km");
        assert_eq!(format_mileage(0), "0 km");
    }

    #[test]
    fn test_format_engine_and_consumption() {
        assert_eq!(format_engine(2.0), "2.0L");
        assert_eq!(format_engine(1.96), "2.0L");
        assert_eq!(format_consumption(6.5), "6.5 L/100km");
    }
}
