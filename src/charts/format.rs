//! Number formatting for metric cards, axis ticks and bar labels.

const MAGNITUDE_SUFFIXES: [&str; 7] = ["", "k", "M", "G", "T", "P", "E"];

/// Integer with comma thousands separators, e.g. `1,234,567`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Value expressed in thousands with one decimal, e.g. `134.9 jt`.
pub fn format_thousands_jt(x: f64) -> String {
    format!("{:.1} jt", x * 1e-3)
}

/// Millions with one decimal at or above 1e6, whole thousands below.
pub fn format_units(x: f64) -> String {
    if x >= 1e6 {
        format!("{:.1} jt", x * 1e-6)
    } else {
        format!("{:.0} jt", x * 1e-3)
    }
}

/// Compact magnitude notation, e.g. `2.3M`.
pub fn human_format(x: f64) -> String {
    let mut value = x;
    let mut magnitude = 0;
    while value.abs() >= 1000.0 && magnitude < MAGNITUDE_SUFFIXES.len() - 1 {
        magnitude += 1;
        value /= 1000.0;
    }
    format!("{:.1}{}", value, MAGNITUDE_SUFFIXES[magnitude])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(620017), "620,017");
        assert_eq!(format_count(3292679), "3,292,679");
    }

    #[test]
    fn test_format_thousands_jt() {
        assert_eq!(format_thousands_jt(134933.0), "134.9 jt");
        assert_eq!(format_thousands_jt(0.0), "0.0 jt");
    }

    #[test]
    fn test_format_units_switches_at_a_million() {
        assert_eq!(format_units(471348.0), "471 jt");
        assert_eq!(format_units(1061129.0), "1.1 jt");
    }

    #[test]
    fn test_human_format() {
        assert_eq!(human_format(950.0), "950.0");
        assert_eq!(human_format(1500.0), "1.5k");
        assert_eq!(human_format(2_292_410.0), "2.3M");
        assert_eq!(human_format(-4500.0), "-4.5k");
    }
}
