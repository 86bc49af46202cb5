/// Sum of the two operands. Nothing is captured, so the result depends on
/// the arguments alone.
pub fn pure_sum(a: f64, b: f64) -> f64 {
    a + b
}
