use crate::{
    foundation::core::{Point, Rect, TextureBounds, Vec2},
    foundation::error::{VexelError, VexelResult},
    geometry::dirty::{DirtyMask, GeometryChannel},
};

/// Fixed triangle list over the four quad corners, sharing the 0-2 diagonal.
const QUAD_INDICES: [u16; 6] = [0, 2, 1, 2, 0, 3];

/// Cached derived quad geometry for a sprite-like renderable.
///
/// Owns the authored parameters (source rect, pivot, scale factor) and the
/// derived GPU-ready arrays (corner positions, UVs, triangle indices).
/// Staleness is tracked per [`GeometryChannel`]; [`QuadGeometry::resolve`]
/// recomputes only the stale channels, lazily, at the point of consumption.
///
/// Corner order is top-left, top-right, bottom-right, bottom-left throughout.
///
/// The derived arrays are fixed-size and mutated strictly in place so their
/// addresses stay stable for the life of the object; buffer-binding layers
/// may cache views into them between resolves.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct QuadGeometry {
    bounds: TextureBounds,
    rect: Rect,
    pivot: Point,
    pixels_per_unit: f64,
    // Derived state is not serialized; a deserialized quad starts fully
    // stale and rebuilds on its first resolve.
    #[serde(skip, default = "zero_corners")]
    positions: [Point; 4],
    #[serde(skip, default = "zero_corners")]
    uv: [Point; 4],
    #[serde(skip)]
    indices: [u16; 6],
    #[serde(skip, default = "DirtyMask::default_all")]
    dirty: DirtyMask,
}

impl QuadGeometry {
    /// Create quad geometry against a backing resource.
    ///
    /// `rect` defaults to the full resource bounds and `pivot` to the
    /// geometric center of the rect. The pivot is expressed in pixels
    /// relative to the rect origin.
    ///
    /// # Errors
    ///
    /// [`VexelError::OutOfRange`] if `rect` exceeds `bounds`;
    /// [`VexelError::InvalidArgument`] if `pixels_per_unit` is not finite
    /// and positive. On failure no state is retained.
    pub fn new(
        bounds: TextureBounds,
        rect: Option<Rect>,
        pivot: Option<Point>,
        pixels_per_unit: f64,
    ) -> VexelResult<Self> {
        let rect = match rect {
            Some(rect) => {
                check_rect_in_bounds(rect, bounds)?;
                rect
            }
            None => bounds.full_rect(),
        };
        check_pixels_per_unit(pixels_per_unit)?;

        let pivot =
            pivot.unwrap_or_else(|| Point::new(0.5 * rect.width(), 0.5 * rect.height()));

        Ok(Self {
            bounds,
            rect,
            pivot,
            pixels_per_unit,
            positions: [Point::ZERO; 4],
            uv: [Point::ZERO; 4],
            indices: [0; 6],
            // Everything starts stale so the first resolve reports a change.
            dirty: DirtyMask::ALL,
        })
    }

    /// The authored source rectangle, in backing-resource pixels.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Set the source rectangle and mark positions stale.
    ///
    /// # Errors
    ///
    /// [`VexelError::OutOfRange`] if the rect exceeds the backing bounds;
    /// prior state is left untouched.
    pub fn set_rect(&mut self, rect: Rect) -> VexelResult<()> {
        check_rect_in_bounds(rect, self.bounds)?;
        self.rect = rect;
        self.dirty.mark(GeometryChannel::Positions);
        Ok(())
    }

    /// The pivot point, in pixels relative to the rect origin.
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Set the pivot and mark positions stale. Total; never fails.
    pub fn set_pivot(&mut self, pivot: Point) {
        self.pivot = pivot;
        self.dirty.mark(GeometryChannel::Positions);
    }

    /// Pixels of source-rect space per world-space unit.
    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    /// Set the pixel-to-world scale factor and mark positions stale.
    ///
    /// # Errors
    ///
    /// [`VexelError::InvalidArgument`] unless the value is finite and > 0;
    /// prior state is left untouched.
    pub fn set_pixels_per_unit(&mut self, pixels_per_unit: f64) -> VexelResult<()> {
        check_pixels_per_unit(pixels_per_unit)?;
        self.pixels_per_unit = pixels_per_unit;
        self.dirty.mark(GeometryChannel::Positions);
        Ok(())
    }

    /// The backing-resource bounds supplied at construction.
    pub fn bounds(&self) -> TextureBounds {
        self.bounds
    }

    /// Whether a subsequent [`QuadGeometry::resolve`] would recompute anything.
    pub fn needs_resolve(&self) -> bool {
        !self.dirty.is_clean()
    }

    /// Recompute every stale channel from the current authored state.
    ///
    /// Returns `false` without touching anything when no channel is stale
    /// (O(1), safe to call every frame). Otherwise rebuilds the flagged
    /// derived arrays in place, clears the mask, and returns `true`.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&mut self) -> bool {
        if self.dirty.is_clean() {
            return false;
        }

        if self.dirty.contains(GeometryChannel::Positions) {
            self.rebuild_positions();
        }
        if self.dirty.contains(GeometryChannel::Uv) {
            self.rebuild_uv();
        }
        if self.dirty.contains(GeometryChannel::Indices) {
            self.indices = QUAD_INDICES;
        }

        self.dirty.clear_all();
        true
    }

    /// World-space quad corners. Stale until [`QuadGeometry::resolve`] runs.
    pub fn positions(&self) -> &[Point; 4] {
        &self.positions
    }

    /// Normalized texture coordinates.
    ///
    /// Constant (0,0),(1,0),(1,1),(0,1) mapping regardless of the rect:
    /// atlas remapping is intentionally not performed at this layer and is
    /// left to the consumer.
    pub fn uv(&self) -> &[Point; 4] {
        &self.uv
    }

    /// Triangle index list over the four corners.
    pub fn indices(&self) -> &[u16; 6] {
        &self.indices
    }

    fn rebuild_positions(&mut self) {
        let reciprocal = 1.0 / self.pixels_per_unit;
        // Pivot and extents converted to world units.
        let unit_pivot = Vec2::new(self.pivot.x, self.pivot.y) * reciprocal;
        let unit_width = self.rect.width() * reciprocal;
        let unit_height = self.rect.height() * reciprocal;

        // Top-left.
        self.positions[0] = Point::new(-unit_pivot.x, unit_height - unit_pivot.y);
        // Top-right.
        self.positions[1] = Point::new(unit_width - unit_pivot.x, unit_height - unit_pivot.y);
        // Bottom-right.
        self.positions[2] = Point::new(unit_width - unit_pivot.x, -unit_pivot.y);
        // Bottom-left.
        self.positions[3] = Point::new(-unit_pivot.x, -unit_pivot.y);
    }

    fn rebuild_uv(&mut self) {
        self.uv[0] = Point::new(0.0, 0.0);
        self.uv[1] = Point::new(1.0, 0.0);
        self.uv[2] = Point::new(1.0, 1.0);
        self.uv[3] = Point::new(0.0, 1.0);
    }
}

fn zero_corners() -> [Point; 4] {
    [Point::ZERO; 4]
}

fn check_rect_in_bounds(rect: Rect, bounds: TextureBounds) -> VexelResult<()> {
    if !(rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite())
    {
        return Err(VexelError::invalid_argument("rect must be finite"));
    }
    if !bounds.contains_rect(rect) {
        return Err(VexelError::out_of_range(format!(
            "rect ({}, {}, {}x{}) exceeds backing bounds {}x{}",
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            bounds.width,
            bounds.height
        )));
    }
    Ok(())
}

fn check_pixels_per_unit(value: f64) -> VexelResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VexelError::invalid_argument(
            "pixels_per_unit must be finite and > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/quad.rs"]
mod tests;
