use crate::foundation::error::{VexelError, VexelResult};

pub use kurbo::{Point, Rect, Vec2};

/// Pixel-space extents of a backing resource (a source bitmap or texture).
///
/// Authored rectangles are validated against these bounds; see
/// [`crate::QuadGeometry::set_rect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextureBounds {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TextureBounds {
    /// Create bounds; both extents must be positive.
    pub fn new(width: u32, height: u32) -> VexelResult<Self> {
        if width == 0 || height == 0 {
            return Err(VexelError::invalid_argument(
                "TextureBounds width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// The full extent as a rect anchored at the origin.
    pub fn full_rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Whether `rect` fits inside these bounds.
    ///
    /// Matches the authoring contract: `x + width <= bounds.width` and
    /// `y + height <= bounds.height`.
    pub fn contains_rect(self, rect: Rect) -> bool {
        rect.x0 + rect.width() <= f64::from(self.width)
            && rect.y0 + rect.height() <= f64::from(self.height)
    }
}

/// A 3D vector used for per-vertex deformation deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a vector from components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
