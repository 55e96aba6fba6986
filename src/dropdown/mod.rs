pub mod aggregator;
pub mod builder;
pub mod diagnostics;
pub mod dropdown_model;
