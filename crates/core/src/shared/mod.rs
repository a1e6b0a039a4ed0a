pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod region;
pub mod source_image;
