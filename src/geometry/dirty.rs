/// Independent derived-data categories tracked by a [`DirtyMask`].
///
/// Categories are deliberately independent: marking one never implies
/// another, and recomputation order is per-category. New categories (for
/// example atlas-remapped UVs) can be added without perturbing existing ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GeometryChannel {
    /// World-space corner positions.
    Positions,
    /// Normalized texture coordinates.
    Uv,
    /// Triangle index list.
    Indices,
}

impl GeometryChannel {
    /// All channels, in recomputation order.
    pub const ALL: [Self; 3] = [Self::Positions, Self::Uv, Self::Indices];

    fn bit(self) -> u8 {
        match self {
            Self::Positions => 0x1,
            Self::Uv => 0x2,
            Self::Indices => 0x4,
        }
    }
}

/// Staleness bitmask over [`GeometryChannel`] categories.
///
/// A clear bit means the channel's derived data is a pure function of the
/// current authored inputs; callers may only clear a bit immediately after
/// recomputing that channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyMask(u8);

impl DirtyMask {
    /// Mask with no channel marked.
    pub const CLEAN: Self = Self(0);
    /// Mask with every channel marked.
    pub const ALL: Self = Self(0x7);

    /// Mark one channel stale.
    pub fn mark(&mut self, channel: GeometryChannel) {
        self.0 |= channel.bit();
    }

    /// Whether `channel` is marked stale.
    pub fn contains(self, channel: GeometryChannel) -> bool {
        self.0 & channel.bit() != 0
    }

    /// Whether no channel is marked.
    pub fn is_clean(self) -> bool {
        self.0 == 0
    }

    /// Clear every channel at once.
    pub fn clear_all(&mut self) {
        self.0 = 0;
    }

    /// Serde default for skipped fields: deserialized owners start stale.
    pub(crate) fn default_all() -> Self {
        Self::ALL
    }
}
