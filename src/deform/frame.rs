use crate::{
    foundation::core::Vec3,
    foundation::error::{VexelError, VexelResult},
};

/// One weighted deformation frame: parallel per-vertex delta arrays.
///
/// Position deltas are mandatory; normal and tangent deltas are optional
/// channels that, when present, must have the same length as the position
/// deltas.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BlendShapeFrame {
    weight: f64,
    delta_positions: Vec<Vec3>,
    delta_normals: Option<Vec<Vec3>>,
    delta_tangents: Option<Vec<Vec3>>,
}

impl BlendShapeFrame {
    /// Create a frame from delta arrays.
    ///
    /// # Errors
    ///
    /// [`VexelError::InvalidArgument`] if the weight is not finite, the
    /// position deltas are empty, or an optional channel's length disagrees
    /// with the position deltas. Arrays are never truncated or padded.
    pub fn new(
        weight: f64,
        delta_positions: Vec<Vec3>,
        delta_normals: Option<Vec<Vec3>>,
        delta_tangents: Option<Vec<Vec3>>,
    ) -> VexelResult<Self> {
        if !weight.is_finite() {
            return Err(VexelError::invalid_argument("frame weight must be finite"));
        }
        if delta_positions.is_empty() {
            return Err(VexelError::invalid_argument(
                "frame delta_positions must be non-empty",
            ));
        }
        for (name, channel) in [("normals", &delta_normals), ("tangents", &delta_tangents)] {
            if let Some(deltas) = channel
                && deltas.len() != delta_positions.len()
            {
                return Err(VexelError::invalid_argument(format!(
                    "frame delta_{name} length {} disagrees with delta_positions length {}",
                    deltas.len(),
                    delta_positions.len()
                )));
            }
        }

        Ok(Self {
            weight,
            delta_positions,
            delta_normals,
            delta_tangents,
        })
    }

    /// Frame weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Number of vertices this frame deforms.
    pub fn vertex_count(&self) -> usize {
        self.delta_positions.len()
    }

    /// Per-vertex position deltas.
    pub fn delta_positions(&self) -> &[Vec3] {
        &self.delta_positions
    }

    /// Per-vertex normal deltas, if this frame provides them.
    pub fn delta_normals(&self) -> Option<&[Vec3]> {
        self.delta_normals.as_deref()
    }

    /// Per-vertex tangent deltas, if this frame provides them.
    pub fn delta_tangents(&self) -> Option<&[Vec3]> {
        self.delta_tangents.as_deref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deform/frame.rs"]
mod tests;
