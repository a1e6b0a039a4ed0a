pub mod face_normalizer;
pub mod face_sample;
