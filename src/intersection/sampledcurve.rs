use crate::intersection::intersectionerror::IntersectionError;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

/// A curve given as parallel x and y samples. The data stays with the caller.
#[derive(Debug, Clone, Copy)]
pub struct SampledCurve<'a> {
    x: &'a [f64],
    y: &'a [f64],
}

impl<'a> SampledCurve<'a> {
    pub const MIN_SAMPLES: usize = 2;

    /// Validates that the samples have equal length, hold at least two
    /// finite points and that x is strictly increasing.
    pub fn new(x: &'a [f64], y: &'a [f64]) -> Result<SampledCurve<'a>, IntersectionError> {
        if x.len() != y.len() {
            return Err(IntersectionError::LengthMismatch { x_len: x.len(), y_len: y.len() });
        }
        if x.len() < Self::MIN_SAMPLES {
            return Err(IntersectionError::InsufficientPoints {
                got: x.len(),
                required: Self::MIN_SAMPLES,
            });
        }
        if let Some(index) = x
            .iter()
            .zip(y)
            .position(|(xi, yi)| !xi.is_finite() || !yi.is_finite())
        {
            return Err(IntersectionError::NonFiniteSample { index });
        }
        if let Some(index) = x.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(IntersectionError::UnsortedInput { index: index + 1 });
        }

        Ok(SampledCurve { x, y })
    }

    fn len(&self) -> usize {
        self.x.len()
    }

    pub fn min_x(&self) -> f64 {
        self.x[0]
    }

    pub fn max_x(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    /// Span divided by the sample count. This is a mean resolution, not the
    /// smallest spacing.
    pub fn average_spacing(&self) -> f64 {
        (self.max_x() - self.min_x()) / self.len() as f64
    }

    pub fn points(&self) -> Vec<Point2D> {
        self.x
            .iter()
            .zip(self.y)
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect()
    }
}
