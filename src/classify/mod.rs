pub mod classifier;
pub mod normalize;
pub mod patterns;
pub mod tables;
