pub mod feature_config;
pub mod feature_extractor;
pub mod feature_vector;
pub mod gradient_histogram;
pub mod intensity_histogram;
pub mod local_binary_pattern;
