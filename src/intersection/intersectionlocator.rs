use tracing::debug;

use crate::configuration::LocatorConfiguration;
use crate::intersection::cellrefiner::{
    CellRefiner,
    CoarseCell
};
use crate::intersection::curveinterpolator::CurveInterpolator;
use crate::intersection::gridplanner::GridPlan;
use crate::intersection::intersectionerror::IntersectionError;
use crate::intersection::resultassembler::{
    IntersectionPoint,
    ResultAssembler
};
use crate::intersection::sampledcurve::SampledCurve;
use crate::intersection::signchange::sign_change_indices;

/// Finds where two sampled curves cross.
///
/// Both curves are resampled on a shared coarse grid over the overlap of
/// their domains. Every grid cell across which the sign of `curve1 - curve2`
/// changes is then refined on a dense grid of `fine_resolution` points.
///
/// Curves whose domains do not overlap yield an empty result. Two identical
/// curves yield no points since their difference never changes sign.
/// Tangencies that do not cross are not reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionLocator {
    config: LocatorConfiguration,
}

impl IntersectionLocator {
    pub fn new(config: LocatorConfiguration) -> Result<IntersectionLocator, IntersectionError> {
        config.validate()?;
        Ok(IntersectionLocator { config })
    }

    pub fn config(&self) -> &LocatorConfiguration {
        &self.config
    }

    /// Curves given as parallel x and y sequences, x strictly increasing.
    pub fn locate(
        &self,
        x_1: &[f64],
        y_1: &[f64],
        x_2: &[f64],
        y_2: &[f64],
    ) -> Result<Vec<IntersectionPoint>, IntersectionError> {
        let curve1 = SampledCurve::new(x_1, y_1)?;
        let curve2 = SampledCurve::new(x_2, y_2)?;
        self.locate_curves(&curve1, &curve2)
    }

    pub fn locate_curves(
        &self,
        curve1: &SampledCurve<'_>,
        curve2: &SampledCurve<'_>,
    ) -> Result<Vec<IntersectionPoint>, IntersectionError> {
        let kind = self.config.interpolation_kind();
        let f = CurveInterpolator::new(curve1, kind)?;
        let g = CurveInterpolator::new(curve2, kind)?;

        let plan = match GridPlan::new(curve1, curve2) {
            Ok(plan) => plan,
            Err(IntersectionError::DomainMismatch { min, max }) => {
                debug!(min, max, "curves do not overlap, no intersections");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        let grid = plan.coarse_grid();
        let f_vals = f.evaluate_all(&grid)?;
        let g_vals = g.evaluate_all(&grid)?;
        let cells = sign_change_indices(&f_vals, &g_vals);
        debug!(
            step = plan.step(),
            grid_points = grid.len(),
            cells = cells.len(),
            %kind,
            "coarse scan done"
        );

        let refiner = CellRefiner::new(self.config.fine_resolution(), self.config.refinement(), &f, &g);
        let mut assembler = ResultAssembler::new(self.config.deduplication());
        for i in cells {
            let cell = CoarseCell::at(i, &grid, &f_vals, &g_vals);
            assembler.extend(refiner.refine(&cell)?, refiner.fine_spacing(&cell));
        }

        if assembler.dropped() > 0 {
            debug!(dropped = assembler.dropped(), "merged duplicate crossings");
        }
        let points = assembler.finish();
        debug!(found = points.len(), "intersections located");
        Ok(points)
    }
}

/// Crossings of `(x_1, y_1)` and `(x_2, y_2)` under `config`, in ascending x.
pub fn locate_intersections(
    x_1: &[f64],
    y_1: &[f64],
    x_2: &[f64],
    y_2: &[f64],
    config: &LocatorConfiguration,
) -> Result<Vec<IntersectionPoint>, IntersectionError> {
    IntersectionLocator::new(*config)?.locate(x_1, y_1, x_2, y_2)
}
