use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::pipeline::batch_summary::BatchSummary;
use crate::pipeline::face_processor::{ImageOutcome, ImageStatus};

/// Observer for a batch run. Receives each image outcome in input order,
/// the batch-level stages, and the final accounting.
pub trait PipelineLogger: Send {
    /// `done` counts images delivered so far, including this one.
    fn image_processed(&mut self, outcome: &ImageOutcome, done: usize, total: usize);

    /// A stage that runs once per batch (aggregation, ranking).
    fn batch_stage(&mut self, stage: &str, duration_ms: f64);

    /// Called once, whether or not any face was found.
    fn finished(&mut self, _summary: &BatchSummary) {}
}

pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn image_processed(&mut self, _outcome: &ImageOutcome, _done: usize, _total: usize) {}
    fn batch_stage(&mut self, _stage: &str, _duration_ms: f64) {}
}

/// Logs progress through the `log` crate and builds an end-of-batch report:
/// skip reasons, how many faces each image contributed, and where the time
/// went.
pub struct BatchReportLogger {
    progress_every: usize,
    stage_ms: BTreeMap<String, f64>,
    /// Face count → number of processed images with that many faces.
    face_counts: BTreeMap<usize, usize>,
    most_faces: Option<(PathBuf, usize)>,
}

impl BatchReportLogger {
    pub fn new(progress_every: usize) -> Self {
        Self {
            progress_every: progress_every.max(1),
            stage_ms: BTreeMap::new(),
            face_counts: BTreeMap::new(),
            most_faces: None,
        }
    }

    pub fn stage_total_ms(&self, stage: &str) -> Option<f64> {
        self.stage_ms.get(stage).copied()
    }

    pub fn images_with_faces(&self, faces: usize) -> usize {
        self.face_counts.get(&faces).copied().unwrap_or(0)
    }

    pub fn report(&self, summary: &BatchSummary) -> String {
        let mut lines = vec![format!(
            "Batch report: {} of {} image(s) yielded {} face(s)",
            summary.images_processed, summary.images_total, summary.faces_extracted
        )];

        if summary.images_skipped() > 0 {
            lines.push(format!(
                "  skipped: {} unreadable, {} without faces, {} locator failure(s)",
                summary.images_unreadable,
                summary.images_without_faces,
                summary.images_locator_failed
            ));
        }
        if summary.regions_filtered + summary.regions_discarded > 0 {
            lines.push(format!(
                "  regions dropped: {} below minimum size, {} outside the image",
                summary.regions_filtered, summary.regions_discarded
            ));
        }

        if !self.face_counts.is_empty() {
            let counts: Vec<String> = self
                .face_counts
                .iter()
                .map(|(faces, images)| format!("{faces} face(s) x{images}"))
                .collect();
            lines.push(format!("  faces per image: {}", counts.join(", ")));
        }
        if let Some((path, faces)) = &self.most_faces {
            if *faces > 1 {
                lines.push(format!("  most faces: {} ({faces})", path.display()));
            }
        }

        let total_ms: f64 = self.stage_ms.values().sum();
        if total_ms > 0.0 {
            let shares: Vec<String> = self
                .stage_ms
                .iter()
                .map(|(stage, ms)| format!("{stage} {:.0}% ({ms:.0}ms)", ms / total_ms * 100.0))
                .collect();
            lines.push(format!("  time: {}", shares.join(", ")));
        }

        lines.join("\n")
    }

    fn add_time(&mut self, stage: &str, ms: f64) {
        *self.stage_ms.entry(stage.to_string()).or_default() += ms;
    }
}

impl Default for BatchReportLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PipelineLogger for BatchReportLogger {
    fn image_processed(&mut self, outcome: &ImageOutcome, done: usize, total: usize) {
        for (stage, ms) in &outcome.timings {
            self.add_time(stage, *ms);
        }

        if outcome.status == ImageStatus::Processed {
            let faces = outcome.faces.len();
            *self.face_counts.entry(faces).or_default() += 1;
            if self.most_faces.as_ref().map_or(true, |(_, most)| faces > *most) {
                self.most_faces = Some((outcome.path.clone(), faces));
            }
            log::debug!("{}: {faces} face(s)", outcome.path.display());
        }

        if done % self.progress_every == 0 || done == total {
            log::info!("Processed {done}/{total} images");
        }
    }

    fn batch_stage(&mut self, stage: &str, duration_ms: f64) {
        self.add_time(stage, duration_ms);
    }

    fn finished(&mut self, summary: &BatchSummary) {
        log::info!("{}", self.report(summary));
    }
}
