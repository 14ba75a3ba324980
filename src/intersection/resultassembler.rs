use serde::{
    Deserialize,
    Serialize
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPoint {
    x: f64,
    y: f64,
}

impl IntersectionPoint {
    pub fn new(x: f64, y: f64) -> IntersectionPoint {
        IntersectionPoint { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Which reported points count as the same crossing.
///
/// The default is `WithinFineSpacing`, not `Disabled`. A plain scan reports a
/// crossing twice when the difference is exactly zero on a grid point, once
/// for the cell ending there and once for the cell starting there. With
/// `Disabled`, y = x against y = 5 sampled on the integers yields both
/// (4.999545, 4.999545) and (5, 5); the default keeps only the first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DeduplicationPolicy {
    /// Keep every detection, including both reports of a zero that sits on
    /// a grid point.
    Disabled,
    /// Drop a point lying within two refinement-grid spacings of the last
    /// kept point. Catches the double report of a difference that is exactly
    /// zero on a grid point.
    #[default]
    WithinFineSpacing,
    /// Drop a point lying within `tolerance` of the last kept point.
    Absolute { tolerance: f64 },
}

impl DeduplicationPolicy {
    pub const FINE_SPACING_FACTOR: f64 = 2.0;

    fn tolerance(&self, fine_spacing: f64) -> Option<f64> {
        match self {
            DeduplicationPolicy::Disabled => None,
            DeduplicationPolicy::WithinFineSpacing => Some(Self::FINE_SPACING_FACTOR * fine_spacing),
            DeduplicationPolicy::Absolute { tolerance } => Some(*tolerance),
        }
    }
}

/// Collects refined points in cell-scan order.
#[derive(Debug, Default)]
pub struct ResultAssembler {
    policy: DeduplicationPolicy,
    points: Vec<IntersectionPoint>,
    dropped: usize,
}

impl ResultAssembler {
    pub fn new(policy: DeduplicationPolicy) -> ResultAssembler {
        ResultAssembler { policy, points: Vec::new(), dropped: 0 }
    }

    /// Appends the points of one refined cell, whose refinement grid had
    /// spacing `fine_spacing`.
    pub fn extend(&mut self, cell_points: Vec<IntersectionPoint>, fine_spacing: f64) {
        let tolerance = self.policy.tolerance(fine_spacing);
        for point in cell_points {
            let duplicate = match (tolerance, self.points.last()) {
                (Some(tol), Some(last)) => (point.x - last.x).abs() <= tol,
                _ => false,
            };
            if duplicate {
                self.dropped += 1;
            } else {
                self.points.push(point);
            }
        }
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn finish(self) -> Vec<IntersectionPoint> {
        self.points
    }
}

/// Parallel x and y coordinate sequences.
pub fn split_coordinates(points: &[IntersectionPoint]) -> (Vec<f64>, Vec<f64>) {
    points.iter().map(|p| (p.x, p.y)).unzip()
}
