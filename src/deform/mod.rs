pub mod blend_shape;
pub mod blended;
pub mod frame;
