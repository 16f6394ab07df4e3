use crate::{
    deform::blend_shape::BlendShape,
    foundation::core::Vec3,
    foundation::error::{VexelError, VexelResult},
    notify::change::ChangeToken,
};

struct ShapeBinding {
    token: ChangeToken,
    weight: f64,
}

/// Downstream consumer cache: base positions plus weighted blend-shape
/// contributions, rebuilt lazily.
///
/// One token is held per attached shape; broadcasts from the shapes and
/// local weight edits both flip a single dirty flag, so any burst of
/// upstream mutations collapses into one rebuild at the next
/// [`BlendedGeometry::resolve`].
pub struct BlendedGeometry {
    base_positions: Vec<Vec3>,
    bindings: Vec<ShapeBinding>,
    blended: Vec<Vec3>,
    dirty: bool,
}

impl BlendedGeometry {
    /// Create a consumer over immutable base positions.
    ///
    /// # Errors
    ///
    /// [`VexelError::InvalidArgument`] if `base_positions` is empty.
    pub fn new(base_positions: Vec<Vec3>) -> VexelResult<Self> {
        if base_positions.is_empty() {
            return Err(VexelError::invalid_argument(
                "base_positions must be non-empty",
            ));
        }
        let blended = base_positions.clone();
        Ok(Self {
            base_positions,
            bindings: Vec::new(),
            blended,
            // Base positions are an exact zero-weight blend, so a fresh
            // consumer is clean until a shape is attached.
            dirty: false,
        })
    }

    /// Attach a shape at an initial blend weight and subscribe to its
    /// change broadcasts.
    ///
    /// The same shapes must later be passed to [`BlendedGeometry::resolve`]
    /// in attachment order.
    ///
    /// # Errors
    ///
    /// [`VexelError::InvalidArgument`] if the shape's vertex count disagrees
    /// with the base positions or the weight is not finite.
    pub fn attach_shape(&mut self, shape: &BlendShape, weight: f64) -> VexelResult<()> {
        if !weight.is_finite() {
            return Err(VexelError::invalid_argument("blend weight must be finite"));
        }
        if let Some(count) = shape.vertex_count()
            && count != self.base_positions.len()
        {
            return Err(VexelError::invalid_argument(format!(
                "shape vertex count {count} disagrees with base vertex count {}",
                self.base_positions.len()
            )));
        }
        self.bindings.push(ShapeBinding {
            token: shape.register_change_token(),
            weight,
        });
        self.dirty = true;
        Ok(())
    }

    /// Number of attached shapes.
    pub fn shape_count(&self) -> usize {
        self.bindings.len()
    }

    /// Current weight of the shape attached at `index`.
    pub fn weight(&self, index: usize) -> Option<f64> {
        self.bindings.get(index).map(|b| b.weight)
    }

    /// Set the blend weight of the shape attached at `index`.
    ///
    /// # Errors
    ///
    /// [`VexelError::OutOfRange`] for an unknown index,
    /// [`VexelError::InvalidArgument`] for a non-finite weight.
    pub fn set_weight(&mut self, index: usize, weight: f64) -> VexelResult<()> {
        if !weight.is_finite() {
            return Err(VexelError::invalid_argument("blend weight must be finite"));
        }
        let Some(binding) = self.bindings.get_mut(index) else {
            return Err(VexelError::out_of_range(format!(
                "shape index {index} out of range (attached: {})",
                self.bindings.len()
            )));
        };
        binding.weight = weight;
        self.dirty = true;
        Ok(())
    }

    /// Blended per-vertex positions. Stale until
    /// [`BlendedGeometry::resolve`] runs.
    pub fn positions(&self) -> &[Vec3] {
        &self.blended
    }

    /// Poll the change tokens and rebuild the blended positions if anything
    /// is stale.
    ///
    /// Returns `false` when neither a broadcast nor a local weight edit has
    /// happened since the last rebuild. `shapes` must be the attached shapes
    /// in attachment order.
    ///
    /// # Errors
    ///
    /// [`VexelError::InvalidArgument`] if `shapes` disagrees with the
    /// attached set in count or vertex count.
    #[tracing::instrument(skip(self, shapes))]
    pub fn resolve(&mut self, shapes: &[&BlendShape]) -> VexelResult<bool> {
        if shapes.len() != self.bindings.len() {
            return Err(VexelError::invalid_argument(format!(
                "resolve got {} shapes but {} are attached",
                shapes.len(),
                self.bindings.len()
            )));
        }

        for binding in &mut self.bindings {
            if binding.token.consume() {
                self.dirty = true;
            }
        }
        if !self.dirty {
            return Ok(false);
        }

        for shape in shapes {
            if let Some(count) = shape.vertex_count()
                && count != self.base_positions.len()
            {
                return Err(VexelError::invalid_argument(format!(
                    "shape '{}' vertex count {count} disagrees with base vertex count {}",
                    shape.name(),
                    self.base_positions.len()
                )));
            }
        }

        self.blended.copy_from_slice(&self.base_positions);
        for (shape, binding) in shapes.iter().zip(&self.bindings) {
            accumulate_shape(&mut self.blended, shape, binding.weight);
        }

        self.dirty = false;
        Ok(true)
    }
}

/// Progressive-morph accumulation: below the first frame's weight the first
/// frame is scaled down, between frames the deltas are interpolated, past the
/// last frame the last frame applies fully.
fn accumulate_shape(out: &mut [Vec3], shape: &BlendShape, weight: f64) {
    let frames = shape.frames();
    let Some(first) = frames.first() else {
        return;
    };
    if weight == 0.0 {
        return;
    }

    if weight <= first.weight() || frames.len() == 1 {
        let scale = if first.weight() == 0.0 {
            1.0
        } else {
            (weight / first.weight()).min(1.0)
        };
        add_scaled(out, first.delta_positions(), scale);
        return;
    }

    let last = &frames[frames.len() - 1];
    if weight >= last.weight() {
        add_scaled(out, last.delta_positions(), 1.0);
        return;
    }

    // Bracketing pair: frames are expected in ascending weight order.
    for pair in frames.windows(2) {
        let (lo, hi) = (&pair[0], &pair[1]);
        if weight <= hi.weight() {
            let span = hi.weight() - lo.weight();
            let t = if span == 0.0 {
                1.0
            } else {
                (weight - lo.weight()) / span
            };
            for ((v, lo_d), hi_d) in out
                .iter_mut()
                .zip(lo.delta_positions())
                .zip(hi.delta_positions())
            {
                *v += *lo_d * (1.0 - t) + *hi_d * t;
            }
            return;
        }
    }
}

fn add_scaled(out: &mut [Vec3], deltas: &[Vec3], scale: f64) {
    for (v, d) in out.iter_mut().zip(deltas) {
        *v += *d * scale;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deform/blended.rs"]
mod tests;
