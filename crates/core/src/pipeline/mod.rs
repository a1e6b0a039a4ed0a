pub mod analyze_faces_use_case;
pub mod batch_summary;
pub mod face_collector;
pub mod face_processor;
pub mod infrastructure;
pub mod pipeline_logger;
pub mod region_filter;

#[cfg(test)]
pub(crate) mod test_support;
