pub mod directory_report_writer;
