pub mod construct;
pub mod path;
pub mod segment;
