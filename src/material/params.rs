use std::collections::{BTreeMap, BTreeSet};

/// Opaque handle to a texture owned by an external resource system.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TextureId(pub u64);

/// The shader-parameter sink higher-level material objects program against.
///
/// The sink is an opaque key-value store: last write wins per name, and
/// macro flags form a set. Its own consistency (GPU upload, shader binding)
/// is outside this crate.
pub trait ShaderParamSink {
    /// Set a scalar parameter.
    fn set_scalar(&mut self, name: &str, value: f64);

    /// Set a 4-component vector parameter.
    fn set_vector(&mut self, name: &str, value: [f64; 4]);

    /// Set a texture parameter.
    fn set_texture(&mut self, name: &str, value: TextureId);

    /// Enable a shader macro flag.
    fn enable_flag(&mut self, name: &str);

    /// Disable a shader macro flag.
    fn disable_flag(&mut self, name: &str);
}

/// In-memory [`ShaderParamSink`] backed by ordered maps.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamStore {
    scalars: BTreeMap<String, f64>,
    vectors: BTreeMap<String, [f64; 4]>,
    textures: BTreeMap<String, TextureId>,
    flags: BTreeSet<String>,
}

impl ParamStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read back a scalar parameter.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.scalars.get(name).copied()
    }

    /// Read back a vector parameter.
    pub fn vector(&self, name: &str) -> Option<[f64; 4]> {
        self.vectors.get(name).copied()
    }

    /// Read back a texture parameter.
    pub fn texture(&self, name: &str) -> Option<TextureId> {
        self.textures.get(name).copied()
    }

    /// Whether a macro flag is currently enabled.
    pub fn flag_enabled(&self, name: &str) -> bool {
        self.flags.contains(name)
    }
}

impl ShaderParamSink for ParamStore {
    fn set_scalar(&mut self, name: &str, value: f64) {
        self.scalars.insert(name.to_string(), value);
    }

    fn set_vector(&mut self, name: &str, value: [f64; 4]) {
        self.vectors.insert(name.to_string(), value);
    }

    fn set_texture(&mut self, name: &str, value: TextureId) {
        self.textures.insert(name.to_string(), value);
    }

    fn enable_flag(&mut self, name: &str) {
        self.flags.insert(name.to_string());
    }

    fn disable_flag(&mut self, name: &str) {
        self.flags.remove(name);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/material/params.rs"]
mod tests;
