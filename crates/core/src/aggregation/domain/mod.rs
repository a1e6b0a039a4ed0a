pub mod average_face;
pub mod face_aggregator;
