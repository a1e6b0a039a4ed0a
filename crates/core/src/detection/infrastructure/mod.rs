pub mod manifest_locator;
pub mod whole_image_locator;
