pub mod content_model;
pub mod source;
