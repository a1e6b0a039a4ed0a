pub mod detection_config;
pub mod face_locator;
