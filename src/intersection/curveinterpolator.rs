use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize
};

use crate::intersection::intersectionerror::IntersectionError;
use crate::intersection::sampledcurve::SampledCurve;
use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::NonparametricCurve;
use crate::math::curve::nonparametriccurve::piecewisepolynomial::{
    PiecewisePolynomial,
    PolynomialType
};

/// Interpolation scheme for the whole-curve interpolators. Names follow the
/// usual scipy spelling.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InterpolationKind {
    #[default]
    Linear,
    Previous,
    Next,
    Natural,
    Cubic,
    Akima,
    Makima,
    Pchip,
}

impl InterpolationKind {
    pub fn name(&self) -> &'static str {
        match self {
            InterpolationKind::Linear   => "linear",
            InterpolationKind::Previous => "previous",
            InterpolationKind::Next     => "next",
            InterpolationKind::Natural  => "natural",
            InterpolationKind::Cubic    => "cubic",
            InterpolationKind::Akima    => "akima",
            InterpolationKind::Makima   => "makima",
            InterpolationKind::Pchip    => "pchip",
        }
    }

    pub fn polynomial_type(&self) -> PolynomialType {
        match self {
            InterpolationKind::Linear   => PolynomialType::Linear,
            InterpolationKind::Previous => PolynomialType::ForwardFlat,
            InterpolationKind::Next     => PolynomialType::BackwardFlat,
            InterpolationKind::Natural  => PolynomialType::NaturalCubic,
            InterpolationKind::Cubic    => PolynomialType::NotAKnotCubic,
            InterpolationKind::Akima    => PolynomialType::AkimaCubic,
            InterpolationKind::Makima   => PolynomialType::ModifiedAkimaCubic,
            InterpolationKind::Pchip    => PolynomialType::PiecewiseCubicHermite,
        }
    }
}

impl FromStr for InterpolationKind {
    type Err = IntersectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "slinear" => Ok(InterpolationKind::Linear),
            "previous" | "zero"  => Ok(InterpolationKind::Previous),
            "next"               => Ok(InterpolationKind::Next),
            "natural"            => Ok(InterpolationKind::Natural),
            "cubic"              => Ok(InterpolationKind::Cubic),
            "akima"              => Ok(InterpolationKind::Akima),
            "makima"             => Ok(InterpolationKind::Makima),
            "pchip"              => Ok(InterpolationKind::Pchip),
            _ => Err(IntersectionError::UnknownInterpolationKind(s.to_owned())),
        }
    }
}

impl TryFrom<String> for InterpolationKind {
    type Error = IntersectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InterpolationKind> for String {
    fn from(kind: InterpolationKind) -> String {
        kind.name().to_owned()
    }
}

impl Display for InterpolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Domain-checked interpolator bound to one sampled curve.
#[derive(Debug, Clone)]
pub struct CurveInterpolator {
    kind: InterpolationKind,
    polynomial: PiecewisePolynomial,
}

impl CurveInterpolator {
    pub fn new(
        curve: &SampledCurve<'_>,
        kind: InterpolationKind,
    ) -> Result<CurveInterpolator, IntersectionError> {
        let polynomial = PiecewisePolynomial::new(kind.polynomial_type(), curve.points())?;
        Ok(CurveInterpolator { kind, polynomial })
    }

    pub fn kind(&self) -> InterpolationKind {
        self.kind
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.polynomial.min_x(), self.polynomial.max_x())
    }

    pub fn evaluate(&self, x: f64) -> Result<f64, IntersectionError> {
        if !self.polynomial.covers(x) {
            let (min, max) = self.domain();
            return Err(IntersectionError::OutOfDomain { x, min, max });
        }
        Ok(self.polynomial.value(x))
    }

    pub fn evaluate_all(&self, xs: &[f64]) -> Result<Vec<f64>, IntersectionError> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}
