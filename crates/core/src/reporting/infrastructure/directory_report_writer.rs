use std::fs;
use std::path::{Path, PathBuf};

use crate::imaging::domain::image_writer::ImageWriter;
use crate::pipeline::analyze_faces_use_case::AnalysisOutcome;
use crate::reporting::domain::report_format::{
    face_file_name, format_details, format_stats, ResultsDocument,
};
use crate::reporting::domain::report_writer::{ReportPaths, ReportWriter};
use crate::shared::constants::{AVERAGE_FACE_FILE, DETAILS_FILE, RESULTS_JSON_FILE, STATS_FILE};
use crate::shared::error::AnalysisError;
use crate::shared::frame::Frame;

/// Writes the average face, every ranked face and the text/JSON reports
/// into one output directory.
pub struct DirectoryReportWriter {
    image_writer: Box<dyn ImageWriter>,
    face_size: Option<(u32, u32)>,
}

impl DirectoryReportWriter {
    pub fn new(image_writer: Box<dyn ImageWriter>) -> Self {
        Self {
            image_writer,
            face_size: None,
        }
    }

    /// Rescales saved face images (not the average) to `size`.
    pub fn with_face_size(mut self, size: (u32, u32)) -> Self {
        self.face_size = Some(size);
        self
    }

    fn write_image(
        &self,
        path: &Path,
        frame: &Frame,
        size: Option<(u32, u32)>,
    ) -> Result<(), AnalysisError> {
        self.image_writer
            .write(path, frame, size)
            .map_err(|e| AnalysisError::Report(format!("{}: {e}", path.display())))
    }
}

fn write_text(path: &Path, contents: &str) -> Result<(), AnalysisError> {
    fs::write(path, contents).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl ReportWriter for DirectoryReportWriter {
    fn write(&self, outcome: &AnalysisOutcome, dir: &Path) -> Result<ReportPaths, AnalysisError> {
        fs::create_dir_all(dir).map_err(|source| AnalysisError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let average_face = dir.join(AVERAGE_FACE_FILE);
        self.write_image(&average_face, &outcome.average_face.to_frame(), None)?;

        let mut faces: Vec<PathBuf> = Vec::with_capacity(outcome.result_set.len());
        for (i, face) in outcome.result_set.faces().iter().enumerate() {
            let sample = outcome.sample(face).ok_or_else(|| {
                AnalysisError::Report(format!("no sample for face {}", face.order))
            })?;
            let path = dir.join(face_file_name(i + 1, face));
            self.write_image(&path, sample.display(), self.face_size)?;
            faces.push(path);
        }

        let stats = dir.join(STATS_FILE);
        write_text(&stats, &format_stats(&outcome.result_set))?;

        let details = dir.join(DETAILS_FILE);
        write_text(
            &details,
            &format_details(&outcome.result_set, &outcome.summary),
        )?;

        let json = dir.join(RESULTS_JSON_FILE);
        let document = ResultsDocument::new(&outcome.result_set, &outcome.summary);
        let text = serde_json::to_string_pretty(&document)
            .map_err(|e| AnalysisError::Report(format!("results.json: {e}")))?;
        write_text(&json, &text)?;

        log::info!(
            "Wrote {} face image(s) and reports to {}",
            faces.len(),
            dir.display()
        );
        Ok(ReportPaths {
            average_face,
            faces,
            stats,
            details,
            json,
        })
    }
}
