//! Scattered geometry.
//!
//! [`ScatteredGeometryProvider`] wraps another geometry provider and
//! replaces each of its quads by a random number of duplicates. Every
//! duplicate is moved by a random distance, rotated by a random angle and
//! scaled by a random factor, with an additional scale reduction
//! ("tapering") near the start and end of the stroke.

use core::fmt;
use std::sync::Arc;

use crate::basics::{PointD, PI};
use crate::error::{Error, Result};
use crate::geometry_provider::{GeometryProvider, GeometryProviderModel};
use crate::interval::{Interval, Scalar};
use crate::random::{Random, RandomSource, RandomState};
use crate::sample::{GeometryItem, GeometryValues, Sample};

/// Largest allowed rotation angle: two full turns.
pub const MAX_ANGLE: f64 = 4.0 * PI;

// ============================================================================
// Tapering
// ============================================================================

/// Scale reduction near the start and end of a stroke.
///
/// Inside a tapering zone the scale factor is
/// `m + (1 - m) * p^e`, where `p` runs from 0 at the stroke boundary to 1
/// at the far edge of the zone, `m` is the minimum tapering scale factor and
/// `e` the tapering exponent. Outside both zones the factor is 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tapering {
    pub length_of_start_tapering: f64,
    pub length_of_end_tapering: f64,
    pub tapering_exponent: f64,
    pub minimum_tapering_scale_factor: f64,
}

impl Tapering {
    /// No tapering at all.
    pub const NONE: Tapering = Tapering {
        length_of_start_tapering: 0.0,
        length_of_end_tapering: 0.0,
        tapering_exponent: 1.0,
        minimum_tapering_scale_factor: 1.0,
    };

    pub fn new(
        length_of_start_tapering: f64,
        length_of_end_tapering: f64,
        tapering_exponent: f64,
        minimum_tapering_scale_factor: f64,
    ) -> Result<Self> {
        let tapering = Self {
            length_of_start_tapering,
            length_of_end_tapering,
            tapering_exponent,
            minimum_tapering_scale_factor,
        };
        tapering.validate()?;
        Ok(tapering)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (name, length) in [
            ("length of start tapering", self.length_of_start_tapering),
            ("length of end tapering", self.length_of_end_tapering),
        ] {
            if !(length >= 0.0 && length.is_finite()) {
                return Err(Error::invalid_argument(format!(
                    "{name} must be non-negative and finite, got {length}"
                )));
            }
        }
        if !(self.tapering_exponent > 0.0 && self.tapering_exponent.is_finite()) {
            return Err(Error::invalid_argument(format!(
                "tapering exponent must be positive and finite, got {}",
                self.tapering_exponent
            )));
        }
        let m = self.minimum_tapering_scale_factor;
        if !(m > 0.0 && m <= 1.0) {
            return Err(Error::invalid_argument(format!(
                "minimum tapering scale factor must be in (0, 1], got {m}"
            )));
        }
        Ok(())
    }

    /// Whether the factor is 1 everywhere.
    pub fn is_noop(&self) -> bool {
        (self.length_of_start_tapering == 0.0 && self.length_of_end_tapering == 0.0)
            || self.minimum_tapering_scale_factor == 1.0
    }

    /// Scale factor for a sample at `arc_length` from the stroke start.
    ///
    /// End tapering needs the total `stroke_length`, which is only known
    /// once the stroke ends; pass `None` while it is still in progress.
    /// Where both zones overlap the smaller factor applies.
    pub fn scale_factor(&self, arc_length: f64, stroke_length: Option<f64>) -> f64 {
        let mut factor = 1.0;

        let start = self.length_of_start_tapering;
        if start > 0.0 && arc_length < start {
            factor = self.factor_at(arc_length / start);
        }

        let end = self.length_of_end_tapering;
        if let Some(stroke_length) = stroke_length {
            let remaining = stroke_length - arc_length;
            if end > 0.0 && remaining < end {
                factor = f64::min(factor, self.factor_at(remaining / end));
            }
        }

        factor
    }

    fn factor_at(&self, progress: f64) -> f64 {
        if progress >= 1.0 {
            return 1.0;
        }
        let m = self.minimum_tapering_scale_factor;
        m + (1.0 - m) * progress.max(0.0).powf(self.tapering_exponent)
    }
}

impl Default for Tapering {
    fn default() -> Self {
        Self::NONE
    }
}

// ============================================================================
// Model
// ============================================================================

/// Configuration of scattered geometry.
///
/// All intervals must be non-empty. Counts are duplicates per underlying
/// quad; distances are in the units of the stroke; angles are radians in
/// `[0, 4π]`; `scale` must straddle 1 (`min ∈ [0, 1]`, `max ≥ 1`).
pub struct ScatteredGeometryProviderModel<M> {
    geometry_provider_model: Arc<dyn GeometryProviderModel<M>>,
    random_state: RandomState,
    count: Interval<u32>,
    distance: Interval<f64>,
    angle: Interval<f64>,
    scale: Interval<f64>,
    tapering: Tapering,
}

impl<M> ScatteredGeometryProviderModel<M> {
    pub fn new(
        geometry_provider_model: Arc<dyn GeometryProviderModel<M>>,
        random_state: RandomState,
        count: Interval<u32>,
        distance: Interval<f64>,
        angle: Interval<f64>,
        scale: Interval<f64>,
        tapering: Tapering,
    ) -> Result<Self> {
        let model = Self {
            geometry_provider_model,
            random_state,
            count,
            distance,
            angle,
            scale,
            tapering,
        };
        model.validate()?;
        Ok(model)
    }

    /// Builder starting from one undisturbed copy per quad.
    pub fn builder(
        geometry_provider_model: Arc<dyn GeometryProviderModel<M>>,
    ) -> ScatteredGeometryProviderModelBuilder<M> {
        ScatteredGeometryProviderModelBuilder {
            geometry_provider_model,
            random_state: RandomState::default(),
            count: Interval::point(1),
            distance: Interval::point(0.0),
            angle: Interval::point(0.0),
            scale: Interval::point(1.0),
            tapering: Tapering::NONE,
        }
    }

    fn validate(&self) -> Result<()> {
        let (Some(_), Some(_)) = (self.count.min(), self.count.max()) else {
            return Err(Error::invalid_argument(format!(
                "count interval {:?} is empty",
                self.count
            )));
        };

        let (d_min, d_max) = non_empty("distance", &self.distance)?;
        if !(d_min >= 0.0 && d_max.is_finite()) {
            return Err(Error::invalid_argument(format!(
                "distance interval {:?} must lie in [0, inf)",
                self.distance
            )));
        }

        let (a_min, a_max) = non_empty("angle", &self.angle)?;
        if !(a_min >= 0.0 && a_max <= MAX_ANGLE) {
            return Err(Error::invalid_argument(format!(
                "angle interval {:?} must lie in [0, 4π]",
                self.angle
            )));
        }

        let (s_min, s_max) = non_empty("scale", &self.scale)?;
        if !((0.0..=1.0).contains(&s_min) && s_max >= 1.0 && s_max.is_finite()) {
            return Err(Error::invalid_argument(format!(
                "scale interval {:?} must have its minimum in [0, 1] and a finite maximum of at least 1",
                self.scale
            )));
        }

        self.tapering.validate()
    }

    pub fn geometry_provider_model(&self) -> &Arc<dyn GeometryProviderModel<M>> {
        &self.geometry_provider_model
    }

    pub fn random_state(&self) -> &RandomState {
        &self.random_state
    }

    pub fn count(&self) -> Interval<u32> {
        self.count
    }

    pub fn distance(&self) -> Interval<f64> {
        self.distance
    }

    pub fn angle(&self) -> Interval<f64> {
        self.angle
    }

    pub fn scale(&self) -> Interval<f64> {
        self.scale
    }

    pub fn tapering(&self) -> Tapering {
        self.tapering
    }

    /// New stroke session drawing from a generator seeded with the model's
    /// random state.
    pub fn scattered_provider(&self) -> ScatteredGeometryProvider<M> {
        self.scattered_provider_with_random(Random::from_state(&self.random_state))
    }

    /// New stroke session drawing from `random`.
    pub fn scattered_provider_with_random<R: RandomSource>(
        &self,
        random: R,
    ) -> ScatteredGeometryProvider<M, R> {
        ScatteredGeometryProvider::with_random(self, random)
    }
}

fn non_empty(name: &str, interval: &Interval<f64>) -> Result<(f64, f64)> {
    match (interval.min(), interval.max()) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(Error::invalid_argument(format!(
            "{name} interval {interval:?} is empty"
        ))),
    }
}

impl<M> Clone for ScatteredGeometryProviderModel<M> {
    fn clone(&self) -> Self {
        Self {
            geometry_provider_model: Arc::clone(&self.geometry_provider_model),
            random_state: self.random_state.clone(),
            count: self.count,
            distance: self.distance,
            angle: self.angle,
            scale: self.scale,
            tapering: self.tapering,
        }
    }
}

impl<M> fmt::Debug for ScatteredGeometryProviderModel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScatteredGeometryProviderModel")
            .field("geometry_provider_model", &self.geometry_provider_model)
            .field("count", &self.count)
            .field("distance", &self.distance)
            .field("angle", &self.angle)
            .field("scale", &self.scale)
            .field("tapering", &self.tapering)
            .finish_non_exhaustive()
    }
}

impl<M: Clone + 'static> GeometryProviderModel<M> for ScatteredGeometryProviderModel<M> {
    fn provider(&self) -> Box<dyn GeometryProvider<M>> {
        Box::new(self.scattered_provider())
    }
}

/// Builder for [`ScatteredGeometryProviderModel`]. Validation happens in
/// [`ScatteredGeometryProviderModelBuilder::build`].
pub struct ScatteredGeometryProviderModelBuilder<M> {
    geometry_provider_model: Arc<dyn GeometryProviderModel<M>>,
    random_state: RandomState,
    count: Interval<u32>,
    distance: Interval<f64>,
    angle: Interval<f64>,
    scale: Interval<f64>,
    tapering: Tapering,
}

impl<M> ScatteredGeometryProviderModelBuilder<M> {
    pub fn random_state(mut self, random_state: RandomState) -> Self {
        self.random_state = random_state;
        self
    }

    pub fn count(mut self, count: Interval<u32>) -> Self {
        self.count = count;
        self
    }

    pub fn distance(mut self, distance: Interval<f64>) -> Self {
        self.distance = distance;
        self
    }

    pub fn angle(mut self, angle: Interval<f64>) -> Self {
        self.angle = angle;
        self
    }

    pub fn scale(mut self, scale: Interval<f64>) -> Self {
        self.scale = scale;
        self
    }

    pub fn tapering(mut self, tapering: Tapering) -> Self {
        self.tapering = tapering;
        self
    }

    pub fn build(self) -> Result<ScatteredGeometryProviderModel<M>> {
        ScatteredGeometryProviderModel::new(
            self.geometry_provider_model,
            self.random_state,
            self.count,
            self.distance,
            self.angle,
            self.scale,
            self.tapering,
        )
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Stroke session of a [`ScatteredGeometryProviderModel`].
///
/// The generator advances with every batch and is never reset; create a new
/// session for each stroke.
pub struct ScatteredGeometryProvider<M, R = Random> {
    provider: Box<dyn GeometryProvider<M>>,
    random: R,
    count: (u32, u32),
    distance: (f64, f64),
    angle: (f64, f64),
    scale: (f64, f64),
    tapering: Tapering,
    sample_count: usize,
}

impl<M, R: RandomSource> ScatteredGeometryProvider<M, R> {
    /// Session for `model` drawing from `random` instead of the model's
    /// random state.
    pub fn with_random(model: &ScatteredGeometryProviderModel<M>, random: R) -> Self {
        log::debug!("starting scattered geometry session: {:?}", model);
        Self {
            provider: model.geometry_provider_model.provider(),
            random,
            count: bounds(&model.count),
            distance: bounds(&model.distance),
            angle: bounds(&model.angle),
            scale: bounds(&model.scale),
            tapering: model.tapering,
            sample_count: 0,
        }
    }

    /// Number of samples processed so far in this stroke.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    fn scatter(
        &mut self,
        item: &GeometryItem<M>,
        stroke_length: Option<f64>,
        out: &mut Vec<GeometryItem<M>>,
    ) where
        M: Clone,
    {
        let copies = self.random.uniform_int(self.count.0, self.count.1);
        let taper = if self.tapering.is_noop() {
            1.0
        } else {
            self.tapering
                .scale_factor(item.sample.arc_length, stroke_length)
        };

        for _ in 0..copies {
            let distance = self.random.uniform(self.distance.0, self.distance.1);
            let angle = self.random.uniform(self.angle.0, self.angle.1);
            let scale = self.random.uniform(self.scale.0, self.scale.1);

            // The same angle drives the offset direction and the rotation.
            let moved = item.quad.translated_by(PointD::from_angle(angle) * distance);
            let quad = moved
                .rotated_around_point(angle, moved.center())
                .scaled_by(scale * taper);

            out.push(GeometryItem {
                quad,
                index: item.index,
                sample: item.sample.clone(),
            });
        }
    }
}

/// Minimum and maximum of a validated, non-empty interval.
fn bounds<T: Scalar>(interval: &Interval<T>) -> (T, T) {
    match (interval.min(), interval.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => (interval.inf(), interval.sup()),
    }
}

impl<M: Clone, R: RandomSource> GeometryProvider<M> for ScatteredGeometryProvider<M, R> {
    fn values_from_samples(&mut self, samples: &[Sample<M>], end: bool) -> GeometryValues<M> {
        let underlying = self.provider.values_from_samples(samples, end);
        let stroke_length = if end {
            samples.last().map(|s| s.arc_length)
        } else {
            None
        };

        let mut items = Vec::with_capacity(underlying.len() * self.count.1.min(16) as usize);
        for item in underlying.items() {
            self.scatter(item, stroke_length, &mut items);
        }

        self.sample_count += samples.len();
        log::trace!(
            "scattered {} samples into {} quads ({} samples so far{})",
            samples.len(),
            items.len(),
            self.sample_count,
            if end { ", stroke ended" } else { "" }
        );
        GeometryValues::new(items)
    }
}

// ============================================================================
// Tests
// ============================================================================
