/// Format a float the way record lines do: $1234.56, negatives as $-5.00
pub fn money(val: f64) -> String {
    format!("${val:.2}")
}

/// Whole-number percent label: 50 -> 50%, 12.4 -> 12%
pub fn percent(val: f64) -> String {
    format!("{val:.0}%")
}
