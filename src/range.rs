/// Tolerance band around a base amount, `percent` wide on each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRange {
    pub amount: f64,
    pub percent: f64,
    pub low: f64,
    pub high: f64,
}

impl BudgetRange {
    pub fn new(amount: f64, percent: f64) -> Self {
        let delta = amount * (percent / 100.0);
        Self {
            amount,
            percent,
            low: amount - delta,
            high: amount + delta,
        }
    }
}
