
pub trait Curve {
    fn value(&self, x: f64) -> f64;

    fn values(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.value(x)).collect()
    }
}
