pub mod http;
pub mod json_file;
pub mod memory;
pub mod store_model;
