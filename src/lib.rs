//! Vexel is the dirty-flag geometry caching and change propagation core of a
//! 2D renderable pipeline.
//!
//! Two cooperating pieces make up the crate:
//!
//! 1. **Cached derived geometry**: [`QuadGeometry`] owns authored sprite
//!    parameters (source rect, pivot, scale) and the derived GPU-ready arrays
//!    (corner positions, UVs, triangle indices). Staleness is tracked per
//!    [`GeometryChannel`] in a [`DirtyMask`]; [`QuadGeometry::resolve`]
//!    rebuilds only the stale channels, in place, at the point of
//!    consumption.
//! 2. **Change fan-out**: a [`ChangeNotifier`] owned by a mutable subject
//!    hands out [`ChangeToken`]s to consumers; each broadcast flips every
//!    live token to signaled, and consumers poll their token at their own
//!    cadence. [`BlendShape`] (a weighted deformation-frame aggregate) is the
//!    canonical subject, [`BlendedGeometry`] the canonical consumer.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: all mutation and resolution happen on the thread
//!   owning the frame loop; there is no internal locking, and callers that
//!   need concurrent authoring must serialize externally.
//! - **Lazy, not eager**: authoring setters only mark staleness; recomputing
//!   happens at the next resolve, which reports whether anything changed.
//! - **Stable derived storage**: resolved arrays are mutated in place and
//!   never reallocate, so consumer-held views stay valid between frames.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod deform;
mod foundation;
mod geometry;
mod material;
mod notify;

pub use deform::blend_shape::BlendShape;
pub use deform::blended::BlendedGeometry;
pub use deform::frame::BlendShapeFrame;
pub use foundation::core::{Point, Rect, TextureBounds, Vec2, Vec3};
pub use foundation::error::{VexelError, VexelResult};
pub use geometry::dirty::{DirtyMask, GeometryChannel};
pub use geometry::quad::QuadGeometry;
pub use material::params::{ParamStore, ShaderParamSink, TextureId};
pub use notify::change::{ChangeNotifier, ChangeToken};
