use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};

use crate::intersection::cellrefiner::RefinementStrategy;
use crate::intersection::curveinterpolator::InterpolationKind;
use crate::intersection::intersectionerror::IntersectionError;
use crate::intersection::resultassembler::DeduplicationPolicy;

/// Settings of the intersection locator. Every field has a default, so a
/// JSON document only needs to name what it changes:
///
/// ```json
/// {
///     "fine_resolution": 5000,
///     "interpolation_kind": "cubic",
///     "refinement": { "strategy": "adaptive", "depth": 1 },
///     "deduplication": { "policy": "disabled" }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocatorConfiguration {
    fine_resolution: usize,
    interpolation_kind: InterpolationKind,
    refinement: RefinementStrategy,
    deduplication: DeduplicationPolicy,
}

impl Default for LocatorConfiguration {
    fn default() -> Self {
        LocatorConfiguration {
            fine_resolution: Self::DEFAULT_FINE_RESOLUTION,
            interpolation_kind: InterpolationKind::default(),
            refinement: RefinementStrategy::default(),
            deduplication: DeduplicationPolicy::default(),
        }
    }
}

impl LocatorConfiguration {
    pub const DEFAULT_FINE_RESOLUTION: usize = 1000;
    pub const MIN_FINE_RESOLUTION: usize = 2;

    pub fn new() -> LocatorConfiguration {
        LocatorConfiguration::default()
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<LocatorConfiguration, IntersectionError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let config: LocatorConfiguration = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<LocatorConfiguration, IntersectionError> {
        let config: LocatorConfiguration = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_fine_resolution(mut self, fine_resolution: usize) -> Self {
        self.fine_resolution = fine_resolution;
        self
    }

    pub fn with_interpolation_kind(mut self, interpolation_kind: InterpolationKind) -> Self {
        self.interpolation_kind = interpolation_kind;
        self
    }

    pub fn with_refinement(mut self, refinement: RefinementStrategy) -> Self {
        self.refinement = refinement;
        self
    }

    pub fn with_deduplication(mut self, deduplication: DeduplicationPolicy) -> Self {
        self.deduplication = deduplication;
        self
    }

    pub fn fine_resolution(&self) -> usize {
        self.fine_resolution
    }

    pub fn interpolation_kind(&self) -> InterpolationKind {
        self.interpolation_kind
    }

    pub fn refinement(&self) -> RefinementStrategy {
        self.refinement
    }

    pub fn deduplication(&self) -> DeduplicationPolicy {
        self.deduplication
    }

    pub fn validate(&self) -> Result<(), IntersectionError> {
        if self.fine_resolution < Self::MIN_FINE_RESOLUTION {
            return Err(IntersectionError::invalid_configuration(format!(
                "fine_resolution must be at least {}, got {}",
                Self::MIN_FINE_RESOLUTION,
                self.fine_resolution
            )));
        }
        if let RefinementStrategy::Adaptive { depth } = self.refinement {
            if depth > RefinementStrategy::MAX_ADAPTIVE_DEPTH {
                return Err(IntersectionError::invalid_configuration(format!(
                    "adaptive refinement depth must be at most {}, got {depth}",
                    RefinementStrategy::MAX_ADAPTIVE_DEPTH
                )));
            }
        }
        if let DeduplicationPolicy::Absolute { tolerance } = self.deduplication {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(IntersectionError::invalid_configuration(format!(
                    "deduplication tolerance must be finite and non-negative, got {tolerance}"
                )));
            }
        }
        Ok(())
    }
}
