//! Geometry providers: one quad per stroke sample.
//!
//! A [`GeometryProviderModel`] is an immutable description shared between
//! strokes. Each stroke asks the model for a fresh [`GeometryProvider`]
//! session and feeds it the stroke's samples batch by batch. Sessions keep
//! whatever state they need across batches (running index, previous
//! location) and are discarded with the stroke.

use core::fmt;

use crate::basics::{PointD, RectD};
use crate::error::{Error, Result};
use crate::quad::Quad;
use crate::sample::{GeometryItem, GeometryValues, Sample};

/// Immutable, shareable provider configuration.
pub trait GeometryProviderModel<M>: fmt::Debug + Send + Sync {
    /// New provider session, starting at the beginning of a stroke.
    fn provider(&self) -> Box<dyn GeometryProvider<M>>;
}

/// Stateful provider session, owned by a single stroke.
pub trait GeometryProvider<M> {
    /// Geometry for the next batch of samples. `end` marks the last batch
    /// of the stroke. Item indices count samples from the start of the
    /// stroke, across batches.
    fn values_from_samples(&mut self, samples: &[Sample<M>], end: bool) -> GeometryValues<M>;
}

// ============================================================================
// Square provider
// ============================================================================

/// Axis-aligned squares of a fixed edge length, centered at each sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareProviderModel {
    edge_length: f64,
}

impl SquareProviderModel {
    pub fn new(edge_length: f64) -> Result<Self> {
        if !(edge_length > 0.0 && edge_length.is_finite()) {
            return Err(Error::invalid_argument(format!(
                "edge length must be positive and finite, got {edge_length}"
            )));
        }
        Ok(Self { edge_length })
    }

    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }
}

impl<M: Clone + 'static> GeometryProviderModel<M> for SquareProviderModel {
    fn provider(&self) -> Box<dyn GeometryProvider<M>> {
        Box::new(SquareProvider {
            edge_length: self.edge_length,
            sample_count: 0,
        })
    }
}

struct SquareProvider {
    edge_length: f64,
    sample_count: usize,
}

impl<M: Clone> GeometryProvider<M> for SquareProvider {
    fn values_from_samples(&mut self, samples: &[Sample<M>], _end: bool) -> GeometryValues<M> {
        let items = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| GeometryItem {
                quad: Quad::from_rect(RectD::from_center_and_size(
                    sample.location,
                    self.edge_length,
                    self.edge_length,
                )),
                index: self.sample_count + i,
                sample: sample.clone(),
            })
            .collect();
        self.sample_count += samples.len();
        GeometryValues::new(items)
    }
}

// ============================================================================
// Directed rect provider
// ============================================================================

/// Rects of a fixed size centered at each sample and rotated to the
/// direction of travel.
///
/// The direction of a sample is the one from the preceding sample. The
/// first quad of a stroke takes the direction of the second. A stroke whose
/// first batch holds a single sample has no direction yet: that quad is
/// axis-aligned with size `(0, 0)`, unless the batch also ends the stroke,
/// in which case it gets the full size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedRectProviderModel {
    width: f64,
    height: f64,
}

impl DirectedRectProviderModel {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(Error::invalid_argument(format!(
                "size must be positive and finite, got ({width}, {height})"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl<M: Clone + 'static> GeometryProviderModel<M> for DirectedRectProviderModel {
    fn provider(&self) -> Box<dyn GeometryProvider<M>> {
        Box::new(DirectedRectProvider {
            width: self.width,
            height: self.height,
            sample_count: 0,
            previous_location: None,
        })
    }
}

struct DirectedRectProvider {
    width: f64,
    height: f64,
    sample_count: usize,
    previous_location: Option<PointD>,
}

impl DirectedRectProvider {
    fn direction(from: PointD, to: PointD) -> f64 {
        let d = to - from;
        if d == PointD::ZERO {
            0.0
        } else {
            d.y.atan2(d.x)
        }
    }
}

impl<M: Clone> GeometryProvider<M> for DirectedRectProvider {
    fn values_from_samples(&mut self, samples: &[Sample<M>], end: bool) -> GeometryValues<M> {
        let mut items = Vec::with_capacity(samples.len());

        for (i, sample) in samples.iter().enumerate() {
            let location = sample.location;
            let quad = match self.previous_location {
                Some(previous) => Quad::from_rotated_rect(
                    location,
                    self.width,
                    self.height,
                    Self::direction(previous, location),
                ),
                None => match samples.get(1) {
                    Some(next) => Quad::from_rotated_rect(
                        location,
                        self.width,
                        self.height,
                        Self::direction(location, next.location),
                    ),
                    None if end => Quad::from_rect(RectD::from_center_and_size(
                        location,
                        self.width,
                        self.height,
                    )),
                    None => Quad::from_rect(RectD::from_center_and_size(location, 0.0, 0.0)),
                },
            };
            items.push(GeometryItem {
                quad,
                index: self.sample_count + i,
                sample: sample.clone(),
            });
            self.previous_location = Some(location);
        }

        self.sample_count += samples.len();
        GeometryValues::new(items)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PI;

    fn samples(points: &[(f64, f64)]) -> Vec<Sample> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Sample::at(i as f64, PointD::new(x, y)))
            .collect()
    }

    fn assert_point(a: PointD, b: PointD) {
        assert!(a.distance(b) < 1e-10, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_square_provider_model_validation() {
        assert!(SquareProviderModel::new(1.0).is_ok());
        assert!(SquareProviderModel::new(0.0).is_err());
        assert!(SquareProviderModel::new(-2.0).is_err());
        assert!(SquareProviderModel::new(f64::NAN).is_err());
        assert!(SquareProviderModel::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_square_provider() {
        let model = SquareProviderModel::new(2.0).unwrap();
        let mut provider = GeometryProviderModel::<()>::provider(&model);
        let values = provider.values_from_samples(&samples(&[(0.0, 0.0), (5.0, 1.0)]), false);

        assert_eq!(values.len(), 2);
        let first = &values.items()[0];
        assert_eq!(first.quad, Quad::from_rect(RectD::new(-1.0, -1.0, 1.0, 1.0)));
        assert_eq!(first.index, 0);
        assert_point(values.items()[1].quad.center(), PointD::new(5.0, 1.0));
    }

    #[test]
    fn test_indices_continue_across_batches() {
        let model = SquareProviderModel::new(1.0).unwrap();
        let mut provider = GeometryProviderModel::<()>::provider(&model);
        provider.values_from_samples(&samples(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]), false);
        let values = provider.values_from_samples(&samples(&[(3.0, 0.0), (4.0, 0.0)]), true);
        assert_eq!(values.indices().collect::<Vec<_>>(), vec![3, 4]);

        let mut fresh = GeometryProviderModel::<()>::provider(&model);
        let values = fresh.values_from_samples(&samples(&[(0.0, 0.0)]), false);
        assert_eq!(values.indices().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_empty_batch() {
        let model = SquareProviderModel::new(1.0).unwrap();
        let mut provider = GeometryProviderModel::<()>::provider(&model);
        assert!(provider.values_from_samples(&[], true).is_empty());
    }

    #[test]
    fn test_directed_rect_model_validation() {
        assert!(DirectedRectProviderModel::new(1.0, 2.0).is_ok());
        assert!(DirectedRectProviderModel::new(0.0, 2.0).is_err());
        assert!(DirectedRectProviderModel::new(1.0, -1.0).is_err());
    }

    #[test]
    fn test_directed_rect_follows_direction() {
        let model = DirectedRectProviderModel::new(4.0, 2.0).unwrap();
        let mut provider = GeometryProviderModel::<()>::provider(&model);
        let values =
            provider.values_from_samples(&samples(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]), false);
        let quads: Vec<Quad> = values.quads().copied().collect();

        // Moving right: axis-aligned. The first quad takes the second's direction.
        let expected =
            Quad::from_rect(RectD::from_center_and_size(PointD::new(0.0, 0.0), 4.0, 2.0));
        assert!(quads[0].is_similar_to_quad_up_to_deviation(&expected, 1e-10));
        let expected =
            Quad::from_rect(RectD::from_center_and_size(PointD::new(10.0, 0.0), 4.0, 2.0));
        assert!(quads[1].is_similar_to_quad_up_to_deviation(&expected, 1e-10));

        // Moving down: rotated by a quarter turn.
        let expected = Quad::from_rotated_rect(PointD::new(10.0, 10.0), 4.0, 2.0, PI / 2.0);
        assert!(quads[2].is_similar_to_quad_up_to_deviation(&expected, 1e-10));
        assert!((quads[2].bounding_rect().height() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_directed_rect_single_first_sample() {
        let model = DirectedRectProviderModel::new(4.0, 2.0).unwrap();

        let mut provider = GeometryProviderModel::<()>::provider(&model);
        let values = provider.values_from_samples(&samples(&[(3.0, 3.0)]), false);
        let q = values.items()[0].quad;
        assert!(q.is_degenerate());
        assert_point(q.v0(), PointD::new(3.0, 3.0));

        let mut provider = GeometryProviderModel::<()>::provider(&model);
        let values = provider.values_from_samples(&samples(&[(3.0, 3.0)]), true);
        let q = values.items()[0].quad;
        assert!((q.area() - 8.0).abs() < 1e-10);
        assert_eq!(q.bounding_rect(), RectD::new(1.0, 2.0, 5.0, 4.0));
    }

    #[test]
    fn test_directed_rect_uses_previous_batch() {
        let model = DirectedRectProviderModel::new(4.0, 2.0).unwrap();
        let mut provider = GeometryProviderModel::<()>::provider(&model);
        provider.values_from_samples(&samples(&[(0.0, 0.0)]), false);
        let values = provider.values_from_samples(&samples(&[(0.0, 5.0)]), true);
        let expected = Quad::from_rotated_rect(PointD::new(0.0, 5.0), 4.0, 2.0, PI / 2.0);
        assert!(values.items()[0]
            .quad
            .is_similar_to_quad_up_to_deviation(&expected, 1e-10));
        assert_eq!(values.items()[0].index, 1);
    }
}
