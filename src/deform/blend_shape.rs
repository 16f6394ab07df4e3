use crate::{
    deform::frame::BlendShapeFrame,
    foundation::core::Vec3,
    foundation::error::{VexelError, VexelResult},
    notify::change::{ChangeNotifier, ChangeToken},
};

/// A named, ordered sequence of weighted deformation frames.
///
/// Mesh-building consumers register a [`ChangeToken`] via
/// [`BlendShape::register_change_token`] and rebuild their blended geometry
/// lazily when the token fires. Every mutating call broadcasts exactly once,
/// including each single frame addition, so consumers must tolerate
/// redundant broadcasts and gate their rebuild behind their own dirty flag.
///
/// Normal and tangent support are sequence-wide flags folded as a logical
/// AND while frames are inserted: one frame without a channel downgrades the
/// whole shape, and later frames that do provide the channel never upgrade
/// it back. [`BlendShape::clear_frames`] is the only reset point. Downstream
/// mesh layouts depend on this stickiness, so it is preserved as-is.
#[derive(Debug, Default)]
pub struct BlendShape {
    name: String,
    frames: Vec<BlendShapeFrame>,
    use_normals: bool,
    use_tangents: bool,
    notifier: ChangeNotifier,
}

impl BlendShape {
    /// Create an empty blend shape.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Shape name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frames in insertion order.
    pub fn frames(&self) -> &[BlendShapeFrame] {
        &self.frames
    }

    /// Vertex count shared by all frames, or `None` while empty.
    pub fn vertex_count(&self) -> Option<usize> {
        self.frames.first().map(BlendShapeFrame::vertex_count)
    }

    /// Whether every inserted frame so far carried normal deltas.
    pub fn supports_normals(&self) -> bool {
        self.use_normals
    }

    /// Whether every inserted frame so far carried tangent deltas.
    pub fn supports_tangents(&self) -> bool {
        self.use_tangents
    }

    /// Append a prebuilt frame and broadcast the change.
    ///
    /// # Errors
    ///
    /// [`VexelError::InvalidArgument`] if the frame's vertex count disagrees
    /// with the frames already present; the sequence is left untouched.
    pub fn add_prebuilt_frame(&mut self, frame: BlendShapeFrame) -> VexelResult<()> {
        self.check_vertex_count(&frame)?;
        self.fold_channel_support(&frame);
        self.frames.push(frame);
        self.notifier.broadcast();
        Ok(())
    }

    /// Build a frame from raw delta arrays, append it, and broadcast.
    ///
    /// # Errors
    ///
    /// [`VexelError::InvalidArgument`] on malformed delta arrays (see
    /// [`BlendShapeFrame::new`]) or a vertex-count mismatch with existing
    /// frames; no partial state is retained on failure.
    pub fn add_frame_from_deltas(
        &mut self,
        weight: f64,
        delta_positions: Vec<Vec3>,
        delta_normals: Option<Vec<Vec3>>,
        delta_tangents: Option<Vec<Vec3>>,
    ) -> VexelResult<&BlendShapeFrame> {
        let frame = BlendShapeFrame::new(weight, delta_positions, delta_normals, delta_tangents)?;
        self.add_prebuilt_frame(frame)?;
        Ok(self.frames.last().expect("frame was just appended"))
    }

    /// Remove every frame, reset both support flags, and broadcast.
    pub fn clear_frames(&mut self) {
        self.frames.clear();
        self.use_normals = false;
        self.use_tangents = false;
        self.notifier.broadcast();
    }

    /// Register a token that fires whenever the frame set changes.
    pub fn register_change_token(&self) -> ChangeToken {
        self.notifier.register()
    }

    fn check_vertex_count(&self, frame: &BlendShapeFrame) -> VexelResult<()> {
        if let Some(expected) = self.vertex_count()
            && frame.vertex_count() != expected
        {
            return Err(VexelError::invalid_argument(format!(
                "frame vertex count {} disagrees with blend shape vertex count {expected}",
                frame.vertex_count()
            )));
        }
        Ok(())
    }

    // First frame seeds the flags; every later frame ANDs into them. Updated
    // on insert only, never re-evaluated on removal.
    fn fold_channel_support(&mut self, frame: &BlendShapeFrame) {
        if self.frames.is_empty() {
            self.use_normals = frame.delta_normals().is_some();
            self.use_tangents = frame.delta_tangents().is_some();
        } else {
            self.use_normals = self.use_normals && frame.delta_normals().is_some();
            self.use_tangents = self.use_tangents && frame.delta_tangents().is_some();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deform/blend_shape.rs"]
mod tests;
