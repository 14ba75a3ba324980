use nalgebra::{
    DMatrix,
    DVector
};

use crate::intersection::intersectionerror::IntersectionError;
use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};

// ─────────────────────────────────────────────
// Subpolynomial
// ─────────────────────────────────────────────
//
// Coefficients are stored highest degree first and evaluated in Horner form
// around the left knot of the interval:
//   [d, c, b, a]  ->  a + b*(x-x_i) + c*(x-x_i)^2 + d*(x-x_i)^3

#[derive(Debug, Clone)]
struct Subpolynomial {
    coefs: Vec<f64>,
    lhs_x: f64,
}

impl Subpolynomial {
    fn new(coefs: Vec<f64>, lhs_x: f64) -> Subpolynomial {
        Subpolynomial { coefs, lhs_x }
    }

    fn value(&self, x: f64) -> f64 {
        let x_diff = x - self.lhs_x;
        self.coefs[1..]
            .iter()
            .fold(self.coefs[0], |result, &beta| f64::mul_add(result, x_diff, beta))
    }
}

// ─────────────────────────────────────────────
// Flat / Linear
// ─────────────────────────────────────────────

fn generate_forward_flat_coef_list(points: &[Point2D]) -> Vec<Vec<f64>> {
    points[..(points.len() - 1)]
        .iter()
        .map(|pt| vec![pt.y()])
        .collect()
}

fn generate_backward_flat_coef_list(points: &[Point2D]) -> Vec<Vec<f64>> {
    points[1..]
        .iter()
        .map(|pt| vec![pt.y()])
        .collect()
}

fn generate_linear_coef_list(points: &[Point2D]) -> Vec<Vec<f64>> {
    points
        .windows(2)
        .map(|pair| vec![Point2D::slope(&pair[0], &pair[1]), pair[0].y()])
        .collect()
}

fn interval_widths(points: &[Point2D]) -> Vec<f64> {
    points
        .windows(2)
        .map(|pair| pair[1].x() - pair[0].x())
        .collect()
}

fn secant_slopes(points: &[Point2D], h: &[f64]) -> Vec<f64> {
    points
        .windows(2)
        .zip(h)
        .map(|(pair, &width)| (pair[1].y() - pair[0].y()) / width)
        .collect()
}

/// Cubic coefficients per interval from the second derivatives `m` at the knots.
fn cubic_coefs_from_moments(points: &[Point2D], h: &[f64], m: &[f64]) -> Vec<Vec<f64>> {
    (0..h.len())
        .map(|i| {
            let d = (m[i + 1] - m[i]) / (6.0 * h[i]);
            let c = m[i] / 2.0;
            let b = (points[i + 1].y() - points[i].y()) / h[i]
                  - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0;
            vec![d, c, b, points[i].y()]
        })
        .collect()
}

/// Cubic coefficients per interval from the first derivatives `t` at the knots.
fn cubic_coefs_from_hermite(points: &[Point2D], h: &[f64], t: &[f64]) -> Vec<Vec<f64>> {
    (0..h.len())
        .map(|i| {
            let dy = points[i + 1].y() - points[i].y();
            let c = (3.0 * dy / h[i] - 2.0 * t[i] - t[i + 1]) / h[i];
            let d = (-2.0 * dy / h[i] + t[i] + t[i + 1]) / (h[i] * h[i]);
            vec![d, c, t[i], points[i].y()]
        })
        .collect()
}

// ─────────────────────────────────────────────
// Cubic splines (Natural / NotAKnot)
// ─────────────────────────────────────────────
//
// Both solve an (n+1)x(n+1) system for the knot moments m[0..=n]. Interior
// rows come from C2 continuity:
//   h[i-1]*m[i-1] + 2*(h[i-1]+h[i])*m[i] + h[i]*m[i+1]
//     = 6*( s[i] - s[i-1] )
// Rows 0 and n carry the boundary condition.

fn build_interior_system(h: &[f64], s: &[f64]) -> (DMatrix<f64>, DVector<f64>) {
    let n = h.len();
    let mut mat = DMatrix::<f64>::zeros(n + 1, n + 1);
    let mut rhs = DVector::<f64>::zeros(n + 1);

    for i in 1..n {
        mat[(i, i - 1)] = h[i - 1];
        mat[(i, i)]     = 2.0 * (h[i - 1] + h[i]);
        mat[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * (s[i] - s[i - 1]);
    }
    (mat, rhs)
}

fn solve_moments(
    mat: DMatrix<f64>,
    rhs: DVector<f64>,
    label: &str,
) -> Result<Vec<f64>, IntersectionError> {
    mat.lu()
        .solve(&rhs)
        .map(|m| m.iter().copied().collect())
        .ok_or_else(|| {
            IntersectionError::InterpolationFailure(format!("{label}: singular moment system"))
        })
}

/// Natural: m[0] = m[n] = 0
fn generate_natural_cubic_coef_list(points: &[Point2D]) -> Result<Vec<Vec<f64>>, IntersectionError> {
    let h = interval_widths(points);
    let s = secant_slopes(points, &h);
    let n = h.len();

    let (mut mat, rhs) = build_interior_system(&h, &s);
    mat[(0, 0)] = 1.0;
    mat[(n, n)] = 1.0;

    let m = solve_moments(mat, rhs, "natural cubic")?;
    Ok(cubic_coefs_from_moments(points, &h, &m))
}

/// Not-a-knot: the third derivative is continuous across x[1] and x[n-1].
///
///   at x[1]:   -h[1]*m[0] + (h[0]+h[1])*m[1] - h[0]*m[2] = 0
///   at x[n-1]: -h[n-1]*m[n-2] + (h[n-2]+h[n-1])*m[n-1] - h[n-2]*m[n] = 0
fn generate_not_a_knot_cubic_coef_list(points: &[Point2D]) -> Result<Vec<Vec<f64>>, IntersectionError> {
    let h = interval_widths(points);
    let s = secant_slopes(points, &h);
    let n = h.len();

    let (mut mat, rhs) = build_interior_system(&h, &s);

    mat[(0, 0)] = -h[1];
    mat[(0, 1)] =  h[0] + h[1];
    mat[(0, 2)] = -h[0];

    mat[(n, n - 2)] = -h[n - 1];
    mat[(n, n - 1)] =  h[n - 2] + h[n - 1];
    mat[(n, n)]     = -h[n - 2];

    let m = solve_moments(mat, rhs, "not-a-knot cubic")?;
    Ok(cubic_coefs_from_moments(points, &h, &m))
}

// ─────────────────────────────────────────────
// Akima / Modified Akima
// ─────────────────────────────────────────────
//
// Knot slopes are weighted averages of neighbouring secants, padded with two
// linearly extrapolated ghost secants on each side.
//
//   akima:  w1 = |s[i+1] - s[i]|,  w2 = |s[i-1] - s[i-2]|
//   makima: w1 += |s[i+1] + s[i]| / 2,  w2 += |s[i-1] + s[i-2]| / 2

fn akima_slopes(s: &[f64], modified: bool) -> Vec<f64> {
    let n = s.len();
    let s1 = if n > 1 { s[1] } else { s[0] };
    let sn2 = if n > 1 { s[n - 2] } else { s[n - 1] };

    let s_m1 = 2.0 * s[0] - s1;
    let s_np1 = 2.0 * s[n - 1] - sn2;

    let mut ext = Vec::with_capacity(n + 4);
    ext.push(2.0 * s_m1 - s[0]);
    ext.push(s_m1);
    ext.extend_from_slice(s);
    ext.push(s_np1);
    ext.push(2.0 * s_np1 - s[n - 1]);

    ext.windows(4)
        .map(|w| {
            let (sm2, sm1, sp0, sp1) = (w[0], w[1], w[2], w[3]);
            let mut w1 = (sp1 - sp0).abs();
            let mut w2 = (sm1 - sm2).abs();
            if modified {
                w1 += (sp1 + sp0).abs() / 2.0;
                w2 += (sm1 + sm2).abs() / 2.0;
            }

            if w1 + w2 < f64::EPSILON {
                (sm1 + sp0) / 2.0
            } else {
                (w1 * sm1 + w2 * sp0) / (w1 + w2)
            }
        })
        .collect()
}

fn generate_akima_coef_list(points: &[Point2D], modified: bool) -> Vec<Vec<f64>> {
    let h = interval_widths(points);
    let s = secant_slopes(points, &h);
    let t = akima_slopes(&s, modified);
    cubic_coefs_from_hermite(points, &h, &t)
}

// ─────────────────────────────────────────────
// PCHIP (Fritsch-Carlson, shape preserving)
// ─────────────────────────────────────────────

fn pchip_end_slope(h0: f64, h1: f64, s0: f64, s1: f64) -> f64 {
    let raw = ((2.0 * h0 + h1) * s0 - h0 * s1) / (h0 + h1);
    if raw.signum() != s0.signum() {
        0.0
    } else if s0.signum() != s1.signum() && raw.abs() > 3.0 * s0.abs() {
        3.0 * s0
    } else {
        raw
    }
}

fn generate_pchip_coef_list(points: &[Point2D]) -> Vec<Vec<f64>> {
    let h = interval_widths(points);
    let s = secant_slopes(points, &h);
    let n = h.len();

    let mut t = vec![0.0_f64; n + 1];
    for i in 1..n {
        // local extremum keeps a flat slope
        if s[i - 1] * s[i] > 0.0 {
            let w1 = 2.0 * h[i] + h[i - 1];
            let w2 = h[i] + 2.0 * h[i - 1];
            t[i] = (w1 + w2) / (w1 / s[i - 1] + w2 / s[i]);
        }
    }
    t[0] = pchip_end_slope(h[0], h[1], s[0], s[1]);
    t[n] = pchip_end_slope(h[n - 1], h[n - 2], s[n - 1], s[n - 2]);

    cubic_coefs_from_hermite(points, &h, &t)
}

// ─────────────────────────────────────────────
// PolynomialType
// ─────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PolynomialType {
    /// Holds the value of the knot on the left.
    ForwardFlat,
    /// Holds the value of the knot on the right.
    BackwardFlat,
    Linear,
    NaturalCubic,
    /// Needs at least 4 knots.
    NotAKnotCubic,
    AkimaCubic,
    ModifiedAkimaCubic,
    PiecewiseCubicHermite,
}

impl PolynomialType {
    pub fn necessary_points(&self) -> usize {
        match self {
            PolynomialType::ForwardFlat           => 2,
            PolynomialType::BackwardFlat          => 2,
            PolynomialType::Linear                => 2,
            PolynomialType::NaturalCubic          => 3,
            PolynomialType::NotAKnotCubic         => 4,
            PolynomialType::AkimaCubic            => 3,
            PolynomialType::ModifiedAkimaCubic    => 3,
            PolynomialType::PiecewiseCubicHermite => 3,
        }
    }
}

// ─────────────────────────────────────────────
// PiecewisePolynomial
// ─────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PiecewisePolynomial {
    polynomial_type: PolynomialType,
    subpolynomial_list: Vec<Subpolynomial>,
    first_point: Point2D,
    last_point: Point2D,
}

impl PiecewisePolynomial {
    /// Knots must be ordered by strictly increasing x.
    pub fn new(
        polynomial_type: PolynomialType,
        points: Vec<Point2D>,
    ) -> Result<PiecewisePolynomial, IntersectionError> {
        let required = polynomial_type.necessary_points();
        if points.len() < required {
            return Err(IntersectionError::InsufficientPoints { got: points.len(), required });
        }
        if let Some(index) = points.windows(2).position(|pair| pair[1].x() <= pair[0].x()) {
            return Err(IntersectionError::UnsortedInput { index: index + 1 });
        }

        let coef_list = match polynomial_type {
            PolynomialType::ForwardFlat           => generate_forward_flat_coef_list(&points),
            PolynomialType::BackwardFlat          => generate_backward_flat_coef_list(&points),
            PolynomialType::Linear                => generate_linear_coef_list(&points),
            PolynomialType::NaturalCubic          => generate_natural_cubic_coef_list(&points)?,
            PolynomialType::NotAKnotCubic         => generate_not_a_knot_cubic_coef_list(&points)?,
            PolynomialType::AkimaCubic            => generate_akima_coef_list(&points, false),
            PolynomialType::ModifiedAkimaCubic    => generate_akima_coef_list(&points, true),
            PolynomialType::PiecewiseCubicHermite => generate_pchip_coef_list(&points),
        };

        let subpolynomial_list = coef_list
            .into_iter()
            .zip(&points)
            .map(|(coefs, pt)| Subpolynomial::new(coefs, pt.x()))
            .collect();

        Ok(PiecewisePolynomial {
            polynomial_type,
            subpolynomial_list,
            first_point: points[0],
            last_point: points[points.len() - 1],
        })
    }

    /// Straight line through two knots.
    pub fn chord(lhs_pt: Point2D, rhs_pt: Point2D) -> Result<PiecewisePolynomial, IntersectionError> {
        Self::new(PolynomialType::Linear, vec![lhs_pt, rhs_pt])
    }

    fn find_segment(&self, x: f64) -> usize {
        let last = self.subpolynomial_list.len() - 1;
        if x <= self.min_x() {
            0
        } else if x >= self.max_x() {
            last
        } else if self.polynomial_type == PolynomialType::BackwardFlat {
            // a knot belongs to the interval it closes
            self.subpolynomial_list.partition_point(|s| s.lhs_x < x) - 1
        } else {
            self.subpolynomial_list.partition_point(|s| s.lhs_x <= x) - 1
        }
    }
}

impl NonparametricCurve for PiecewisePolynomial {
    fn min_x(&self) -> f64 {
        self.first_point.x()
    }

    fn max_x(&self) -> f64 {
        self.last_point.x()
    }
}

impl Curve for PiecewisePolynomial {
    fn value(&self, x: f64) -> f64 {
        match self.polynomial_type {
            PolynomialType::ForwardFlat if x >= self.max_x() => self.last_point.y(),
            PolynomialType::BackwardFlat if x <= self.min_x() => self.first_point.y(),
            _ => self.subpolynomial_list[self.find_segment(x)].value(x),
        }
    }
}
