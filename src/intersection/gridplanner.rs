use crate::intersection::intersectionerror::IntersectionError;
use crate::intersection::sampledcurve::SampledCurve;

/// Shared coarse grid of two curves: the overlap of their domains and a
/// step of half the finer average sample spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlan {
    step: f64,
    domain_min: f64,
    domain_max: f64,
}

impl GridPlan {
    pub fn new(curve1: &SampledCurve<'_>, curve2: &SampledCurve<'_>) -> Result<GridPlan, IntersectionError> {
        let step = curve1.average_spacing().min(curve2.average_spacing()) / 2.0;
        let domain_min = curve1.min_x().max(curve2.min_x());
        let domain_max = curve1.max_x().min(curve2.max_x());

        if domain_min >= domain_max {
            return Err(IntersectionError::DomainMismatch { min: domain_min, max: domain_max });
        }
        if !(step > 0.0) {
            return Err(IntersectionError::invalid_configuration(format!(
                "coarse step must be positive, got {step}"
            )));
        }

        Ok(GridPlan { step, domain_min, domain_max })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    /// Half-open grid `min, min + step, ...` strictly below the domain max.
    pub fn coarse_grid(&self) -> Vec<f64> {
        let count = ((self.domain_max - self.domain_min) / self.step).ceil() as usize;
        (0..count)
            .map(|i| self.domain_min + i as f64 * self.step)
            .take_while(|&x| x < self.domain_max)
            .collect()
    }
}

/// `n` evenly spaced points from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            grid[n - 1] = end;
            grid
        }
    }
}
