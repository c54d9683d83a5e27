//! Brush-level configuration of scattered geometry.
//!
//! [`ScatteredGeometryStageModel`] is the editable parameter set a brush
//! exposes. Each setter validates its value against the current state, so
//! widening a range means raising the maximum before the minimum. A
//! [`ScatteredGeometryProviderModel`] is derived from it on demand.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::geometry_provider::SquareProviderModel;
use crate::interval::Interval;
use crate::random::RandomState;
use crate::scattered::{ScatteredGeometryProviderModel, Tapering, MAX_ANGLE};

/// Smallest allowed brush diameter.
pub const MIN_DIAMETER: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatteredGeometryStageModel {
    diameter: f64,
    min_count: u32,
    max_count: u32,
    min_distance: f64,
    max_distance: f64,
    min_angle: f64,
    max_angle: f64,
    min_scale: f64,
    max_scale: f64,
    tapering: Tapering,
    seed: u64,
}

impl Default for ScatteredGeometryStageModel {
    fn default() -> Self {
        Self {
            diameter: 1.0,
            min_count: 1,
            max_count: 1,
            min_distance: 0.0,
            max_distance: 0.0,
            min_angle: 0.0,
            max_angle: 0.0,
            min_scale: 1.0,
            max_scale: 1.0,
            tapering: Tapering::NONE,
            seed: 0,
        }
    }
}

fn check(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::invalid_argument(message()))
    }
}

impl ScatteredGeometryStageModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Edge length of the underlying square tip.
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn min_angle(&self) -> f64 {
        self.min_angle
    }

    pub fn max_angle(&self) -> f64 {
        self.max_angle
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn tapering(&self) -> Tapering {
        self.tapering
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ------------------------------------------------------------------------
    // Validated setters
    // ------------------------------------------------------------------------

    pub fn set_diameter(&mut self, diameter: f64) -> Result<()> {
        check(diameter >= MIN_DIAMETER && diameter.is_finite(), || {
            format!("diameter must be at least {MIN_DIAMETER}, got {diameter}")
        })?;
        self.diameter = diameter;
        Ok(())
    }

    pub fn set_min_count(&mut self, min_count: u32) -> Result<()> {
        check(min_count <= self.max_count, || {
            format!("min count {min_count} exceeds max count {}", self.max_count)
        })?;
        self.min_count = min_count;
        Ok(())
    }

    pub fn set_max_count(&mut self, max_count: u32) -> Result<()> {
        check(max_count >= self.min_count, || {
            format!("max count {max_count} is below min count {}", self.min_count)
        })?;
        self.max_count = max_count;
        Ok(())
    }

    pub fn set_min_distance(&mut self, min_distance: f64) -> Result<()> {
        check(min_distance >= 0.0 && min_distance <= self.max_distance, || {
            format!(
                "min distance must be in [0, {}], got {min_distance}",
                self.max_distance
            )
        })?;
        self.min_distance = min_distance;
        Ok(())
    }

    pub fn set_max_distance(&mut self, max_distance: f64) -> Result<()> {
        check(
            max_distance >= self.min_distance && max_distance.is_finite(),
            || {
                format!(
                    "max distance must be finite and at least {}, got {max_distance}",
                    self.min_distance
                )
            },
        )?;
        self.max_distance = max_distance;
        Ok(())
    }

    pub fn set_min_angle(&mut self, min_angle: f64) -> Result<()> {
        check(min_angle >= 0.0 && min_angle <= self.max_angle, || {
            format!("min angle must be in [0, {}], got {min_angle}", self.max_angle)
        })?;
        self.min_angle = min_angle;
        Ok(())
    }

    pub fn set_max_angle(&mut self, max_angle: f64) -> Result<()> {
        check(max_angle >= self.min_angle && max_angle <= MAX_ANGLE, || {
            format!(
                "max angle must be in [{}, 4π], got {max_angle}",
                self.min_angle
            )
        })?;
        self.max_angle = max_angle;
        Ok(())
    }

    pub fn set_min_scale(&mut self, min_scale: f64) -> Result<()> {
        check(min_scale >= 0.0 && min_scale <= self.max_scale, || {
            format!("min scale must be in [0, {}], got {min_scale}", self.max_scale)
        })?;
        self.min_scale = min_scale;
        Ok(())
    }

    pub fn set_max_scale(&mut self, max_scale: f64) -> Result<()> {
        check(max_scale >= self.min_scale && max_scale.is_finite(), || {
            format!(
                "max scale must be finite and at least {}, got {max_scale}",
                self.min_scale
            )
        })?;
        self.max_scale = max_scale;
        Ok(())
    }

    /// Replaces all tapering parameters at once.
    pub fn set_tapering(&mut self, tapering: Tapering) -> Result<()> {
        tapering.validate()?;
        self.tapering = tapering;
        Ok(())
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    // ------------------------------------------------------------------------
    // Provider model
    // ------------------------------------------------------------------------

    /// Scattered provider model over squares of edge length
    /// [`ScatteredGeometryStageModel::diameter`].
    ///
    /// Fails if the scale range does not straddle 1, which the setters
    /// alone do not enforce.
    pub fn provider_model<M: Clone + 'static>(&self) -> Result<ScatteredGeometryProviderModel<M>> {
        let squares = SquareProviderModel::new(self.diameter)?;
        ScatteredGeometryProviderModel::new(
            Arc::new(squares),
            RandomState::from_seed(self.seed),
            Interval::closed(self.min_count, self.max_count),
            Interval::closed(self.min_distance, self.max_distance),
            Interval::closed(self.min_angle, self.max_angle),
            Interval::closed(self.min_scale, self.max_scale),
            self.tapering,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PointD;
    use crate::geometry_provider::GeometryProvider;
    use crate::sample::Sample;

    #[test]
    fn test_defaults() {
        let m = ScatteredGeometryStageModel::new();
        assert_eq!(m.diameter(), 1.0);
        assert_eq!((m.min_count(), m.max_count()), (1, 1));
        assert_eq!((m.min_distance(), m.max_distance()), (0.0, 0.0));
        assert_eq!((m.min_angle(), m.max_angle()), (0.0, 0.0));
        assert_eq!((m.min_scale(), m.max_scale()), (1.0, 1.0));
        assert_eq!(m.tapering(), Tapering::NONE);
        assert_eq!(m.seed(), 0);
    }

    #[test]
    fn test_diameter() {
        let mut m = ScatteredGeometryStageModel::new();
        assert!(m.set_diameter(0.01).is_ok());
        assert!(m.set_diameter(0.005).is_err());
        assert!(m.set_diameter(f64::INFINITY).is_err());
        assert_eq!(m.diameter(), 0.01);
    }

    #[test]
    fn test_range_ordering() {
        let mut m = ScatteredGeometryStageModel::new();
        assert!(m.set_min_count(3).is_err());
        assert!(m.set_max_count(5).is_ok());
        assert!(m.set_min_count(3).is_ok());
        assert!(m.set_max_count(2).is_err());
        assert_eq!((m.min_count(), m.max_count()), (3, 5));

        assert!(m.set_min_distance(1.0).is_err());
        assert!(m.set_max_distance(4.0).is_ok());
        assert!(m.set_min_distance(1.0).is_ok());
        assert!(m.set_min_distance(-1.0).is_err());

        assert!(m.set_min_scale(0.5).is_ok());
        assert!(m.set_max_scale(0.4).is_err());
        assert!(m.set_max_scale(2.0).is_ok());
    }

    #[test]
    fn test_angle_limit() {
        let mut m = ScatteredGeometryStageModel::new();
        assert!(m.set_max_angle(MAX_ANGLE).is_ok());
        assert!(m.set_max_angle(MAX_ANGLE + 1e-9).is_err());
        assert!(m.set_min_angle(MAX_ANGLE).is_ok());
        assert!(m.set_max_angle(1.0).is_err());
    }

    #[test]
    fn test_failed_setter_keeps_value() {
        let mut m = ScatteredGeometryStageModel::new();
        let before = m.clone();
        assert!(m.set_tapering(Tapering {
            minimum_tapering_scale_factor: 0.0,
            ..Tapering::NONE
        })
        .is_err());
        assert_eq!(m, before);
    }

    #[test]
    fn test_provider_model() {
        let mut m = ScatteredGeometryStageModel::new();
        m.set_diameter(3.0).unwrap();
        m.set_max_count(2).unwrap();
        m.set_min_count(2).unwrap();
        m.set_seed(17);

        let model = m.provider_model::<()>().unwrap();
        assert_eq!(model.count(), Interval::closed(2, 2));

        let mut provider = model.scattered_provider();
        let values = provider.values_from_samples(&[Sample::at(0.0, PointD::ZERO)], true);
        assert_eq!(values.len(), 2);
        for q in values.quads() {
            assert!((q.area() - 9.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_provider_model_rejects_scale_above_one() {
        let mut m = ScatteredGeometryStageModel::new();
        m.set_max_scale(3.0).unwrap();
        m.set_min_scale(2.0).unwrap();
        assert!(m.provider_model::<()>().is_err());
    }
}
