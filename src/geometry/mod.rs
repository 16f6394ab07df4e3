pub mod dirty;
pub mod quad;
