//! # brush-geometry
//!
//! Quadrilateral geometry and procedural brush-tip geometry for stroke
//! rendering.
//!
//! The crate produces geometry only. A stroke sampler feeds points along a
//! path into a geometry provider, which emits one quad per sample. The
//! scattered provider then duplicates, jitters and tapers those quads
//! before a renderer (not part of this crate) draws them:
//!
//! 1. **Samples**: points along the stroke, with arc length and metadata
//! 2. **Underlying provider**: squares or direction-following rects
//! 3. **Scattering**: random count, offset, rotation, scale and tapering
//! 4. **Output**: quads tagged with the index of their source sample
//!
//! Coordinates use a top-left origin with +y pointing down, so positive
//! angles and positive signed areas are clockwise on screen.

// Foundation types & math
pub mod basics;
pub mod error;
pub mod interval;
pub mod math;

// Transformations
pub mod trans_affine;
pub mod trans_perspective;

// Quads
pub mod quad;

// Brush geometry
pub mod geometry_provider;
pub mod random;
pub mod sample;
pub mod scattered;
pub mod stage_model;

pub use basics::{PointD, RectD};
pub use error::{Error, Result};
pub use geometry_provider::{
    DirectedRectProviderModel, GeometryProvider, GeometryProviderModel, SquareProviderModel,
};
pub use interval::{EndpointInclusion, Interval};
pub use quad::{CornerRegion, CornersValidity, Quad, QuadType, SimilarityFit};
pub use random::{Random, RandomSource, RandomState};
pub use sample::{GeometryItem, GeometryValues, Sample};
pub use scattered::{
    ScatteredGeometryProvider, ScatteredGeometryProviderModel,
    ScatteredGeometryProviderModelBuilder, Tapering,
};
pub use stage_model::ScatteredGeometryStageModel;
pub use trans_affine::TransAffine;
pub use trans_perspective::TransPerspective;
