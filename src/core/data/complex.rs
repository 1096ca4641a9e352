/// A point on the complex plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    #[must_use]
    pub fn approx_eq(&self, other: Complex, tolerance: f64) -> bool {
        (self.real - other.real).abs() <= tolerance && (self.imag - other.imag).abs() <= tolerance
    }
}
