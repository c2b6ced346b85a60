pub mod ease;
pub mod morph;
