//! Stroke samples and the geometry produced for them.

use crate::basics::PointD;
use crate::quad::Quad;

/// A point sampled along a stroke path.
///
/// `metadata` is opaque to this crate and travels unchanged from the
/// sample to every quad produced for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<M = ()> {
    /// Parametric value of the sample on the stroke's spline.
    pub parametric_value: f64,
    /// Arc length from the start of the stroke to the sample.
    pub arc_length: f64,
    pub location: PointD,
    pub metadata: M,
}

impl<M> Sample<M> {
    pub fn new(parametric_value: f64, arc_length: f64, location: PointD, metadata: M) -> Self {
        Self {
            parametric_value,
            arc_length,
            location,
            metadata,
        }
    }
}

impl Sample<()> {
    /// Sample whose parametric value equals its arc length.
    pub fn at(arc_length: f64, location: PointD) -> Self {
        Self::new(arc_length, arc_length, location, ())
    }
}

/// A quad together with the sample it was produced for.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryItem<M = ()> {
    pub quad: Quad,
    /// Zero-based index of the originating sample, counted from the start
    /// of the stroke.
    pub index: usize,
    pub sample: Sample<M>,
}

/// Ordered geometry produced for one batch of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryValues<M = ()> {
    items: Vec<GeometryItem<M>>,
}

impl<M> GeometryValues<M> {
    pub fn new(items: Vec<GeometryItem<M>>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[GeometryItem<M>] {
        &self.items
    }

    pub fn into_items(self) -> Vec<GeometryItem<M>> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quads(&self) -> impl Iterator<Item = &Quad> + '_ {
        self.items.iter().map(|item| &item.quad)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().map(|item| item.index)
    }
}

impl<M> Default for GeometryValues<M> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<M> IntoIterator for GeometryValues<M> {
    type Item = GeometryItem<M>;
    type IntoIter = std::vec::IntoIter<GeometryItem<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::RectD;

    #[test]
    fn test_values_accessors() {
        let quad = Quad::from_rect(RectD::new(0.0, 0.0, 1.0, 1.0));
        let sample = Sample::at(2.0, PointD::new(0.5, 0.5));
        let values = GeometryValues::new(vec![
            GeometryItem {
                quad,
                index: 3,
                sample: sample.clone(),
            },
            GeometryItem {
                quad,
                index: 4,
                sample,
            },
        ]);
        assert_eq!(values.len(), 2);
        assert!(!values.is_empty());
        assert_eq!(values.indices().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(values.quads().count(), 2);
        assert!(GeometryValues::<()>::default().is_empty());
    }

    #[test]
    fn test_metadata_is_carried() {
        let s = Sample::new(0.25, 10.0, PointD::new(1.0, 2.0), "pressure=0.7");
        assert_eq!(s.metadata, "pressure=0.7");
        assert_eq!(s.parametric_value, 0.25);
    }
}
