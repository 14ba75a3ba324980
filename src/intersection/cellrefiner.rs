use serde::{
    Deserialize,
    Serialize
};
use tracing::trace;

use crate::intersection::curveinterpolator::CurveInterpolator;
use crate::intersection::gridplanner::linspace;
use crate::intersection::intersectionerror::IntersectionError;
use crate::intersection::resultassembler::IntersectionPoint;
use crate::intersection::signchange::sign_change_indices;
use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::math::curve::nonparametriccurve::piecewisepolynomial::PiecewisePolynomial;

/// How a flagged coarse cell is narrowed down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum RefinementStrategy {
    /// Resample the straight chords of both curves across the cell.
    #[default]
    Chord,
    /// Resample the whole-curve interpolators inside the cell, rescan, and
    /// recurse into every flagged sub-cell `depth` times before the final
    /// chord pass.
    Adaptive { depth: usize },
}

impl RefinementStrategy {
    /// Deepest adaptive recursion a configuration may ask for.
    pub const MAX_ADAPTIVE_DEPTH: usize = 8;
}

/// Adjacent coarse grid points bracketing a sign change, with both curves
/// evaluated at each end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoarseCell {
    pub x0: f64,
    pub x1: f64,
    pub f0: f64,
    pub f1: f64,
    pub g0: f64,
    pub g1: f64,
}

impl CoarseCell {
    /// Cell `i` of a grid and its precomputed values.
    pub fn at(i: usize, grid: &[f64], f_vals: &[f64], g_vals: &[f64]) -> CoarseCell {
        CoarseCell {
            x0: grid[i],
            x1: grid[i + 1],
            f0: f_vals[i],
            f1: f_vals[i + 1],
            g0: g_vals[i],
            g1: g_vals[i + 1],
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }
}

pub struct CellRefiner<'a> {
    fine_resolution: usize,
    strategy: RefinementStrategy,
    curve1: &'a CurveInterpolator,
    curve2: &'a CurveInterpolator,
}

impl<'a> CellRefiner<'a> {
    pub fn new(
        fine_resolution: usize,
        strategy: RefinementStrategy,
        curve1: &'a CurveInterpolator,
        curve2: &'a CurveInterpolator,
    ) -> CellRefiner<'a> {
        CellRefiner { fine_resolution, strategy, curve1, curve2 }
    }

    /// Spacing of the innermost refinement grid laid over `cell`.
    pub fn fine_spacing(&self, cell: &CoarseCell) -> f64 {
        let intervals = (self.fine_resolution.max(2) - 1) as f64;
        let levels = match self.strategy {
            RefinementStrategy::Chord => 1,
            RefinementStrategy::Adaptive { depth } => {
                depth.min(RefinementStrategy::MAX_ADAPTIVE_DEPTH) as i32 + 1
            }
        };
        cell.width() / intervals.powi(levels)
    }

    pub fn refine(&self, cell: &CoarseCell) -> Result<Vec<IntersectionPoint>, IntersectionError> {
        let points = match self.strategy {
            RefinementStrategy::Chord => self.refine_chord(cell)?,
            RefinementStrategy::Adaptive { depth } => {
                self.refine_adaptive(cell, depth.min(RefinementStrategy::MAX_ADAPTIVE_DEPTH))?
            }
        };
        trace!(x0 = cell.x0, x1 = cell.x1, found = points.len(), "refined cell");
        Ok(points)
    }

    fn refine_chord(&self, cell: &CoarseCell) -> Result<Vec<IntersectionPoint>, IntersectionError> {
        let k = PiecewisePolynomial::chord(Point2D::from((cell.x0, cell.f0)), Point2D::from((cell.x1, cell.f1)))?;
        let l = PiecewisePolynomial::chord(Point2D::from((cell.x0, cell.g0)), Point2D::from((cell.x1, cell.g1)))?;

        let z = linspace(cell.x0, cell.x1, self.fine_resolution);
        let k_vals = k.values(&z);
        let l_vals = l.values(&z);

        // the chords agree at a crossing, so either value will do
        Ok(sign_change_indices(&k_vals, &l_vals)
            .into_iter()
            .map(|j| IntersectionPoint::new(z[j], k_vals[j]))
            .collect())
    }

    fn refine_adaptive(
        &self,
        cell: &CoarseCell,
        depth: usize,
    ) -> Result<Vec<IntersectionPoint>, IntersectionError> {
        // two fine points per cell give the same cell back
        if depth == 0 || self.fine_resolution <= 2 {
            return self.refine_chord(cell);
        }

        let z = linspace(cell.x0, cell.x1, self.fine_resolution);
        let f_vals = self.curve1.evaluate_all(&z)?;
        let g_vals = self.curve2.evaluate_all(&z)?;

        let mut points = Vec::new();
        for j in sign_change_indices(&f_vals, &g_vals) {
            let sub_cell = CoarseCell::at(j, &z, &f_vals, &g_vals);
            if sub_cell.width() <= 0.0 {
                continue;
            }
            // ends are adjacent floats, nothing left to split
            if sub_cell.width() >= cell.width() {
                points.extend(self.refine_chord(&sub_cell)?);
            } else {
                points.extend(self.refine_adaptive(&sub_cell, depth - 1)?);
            }
        }
        Ok(points)
    }
}
