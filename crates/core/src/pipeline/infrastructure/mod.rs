pub mod sequential_face_collector;
pub mod threaded_face_collector;
