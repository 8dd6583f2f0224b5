/// Rounds floating point values to a fixed number of decimals, half away from zero.
pub trait RoundDecimals {
    fn round_decimals(self, decimals: u32) -> Self;
}

impl RoundDecimals for f64 {
    fn round_decimals(self, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (self * factor).round() / factor
    }
}
