pub mod align;
pub mod interpolate;
pub mod tree;
