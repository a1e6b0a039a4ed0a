pub mod report_format;
pub mod report_writer;
