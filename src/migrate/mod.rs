pub mod compare;
pub mod runner;
