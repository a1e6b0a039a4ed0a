use serde::Serialize;

use crate::pipeline::face_processor::{ImageOutcome, ImageStatus};

/// Batch-level accounting of what was read, skipped and extracted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub images_total: usize,
    pub images_processed: usize,
    pub images_unreadable: usize,
    pub images_without_faces: usize,
    pub images_locator_failed: usize,
    pub regions_filtered: usize,
    pub regions_discarded: usize,
    pub faces_extracted: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &ImageOutcome) {
        self.images_total += 1;
        match outcome.status {
            ImageStatus::Processed => self.images_processed += 1,
            ImageStatus::Unreadable => self.images_unreadable += 1,
            ImageStatus::NoDetections => self.images_without_faces += 1,
            ImageStatus::LocatorFailed => self.images_locator_failed += 1,
        }
        self.regions_filtered += outcome.regions_filtered;
        self.regions_discarded += outcome.regions_discarded;
        self.faces_extracted += outcome.faces.len();
    }

    pub fn images_skipped(&self) -> usize {
        self.images_unreadable + self.images_without_faces + self.images_locator_failed
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} image(s): {} face(s) extracted, {} unreadable, {} without faces, {} locator failure(s), {} degenerate region(s)",
            self.images_total,
            self.faces_extracted,
            self.images_unreadable,
            self.images_without_faces,
            self.images_locator_failed,
            self.regions_discarded,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn outcome(status: ImageStatus, filtered: usize, discarded: usize) -> ImageOutcome {
        ImageOutcome {
            index: 0,
            path: PathBuf::from("x.png"),
            status,
            faces: Vec::new(),
            regions_filtered: filtered,
            regions_discarded: discarded,
            timings: Vec::new(),
        }
    }

    #[test]
    fn test_record_counts_each_status() {
        let mut summary = BatchSummary::default();
        summary.record(&outcome(ImageStatus::Processed, 1, 2));
        summary.record(&outcome(ImageStatus::Unreadable, 0, 0));
        summary.record(&outcome(ImageStatus::NoDetections, 3, 0));
        summary.record(&outcome(ImageStatus::LocatorFailed, 0, 0));

        assert_eq!(
            summary,
            BatchSummary {
                images_total: 4,
                images_processed: 1,
                images_unreadable: 1,
                images_without_faces: 1,
                images_locator_failed: 1,
                regions_filtered: 4,
                regions_discarded: 2,
                faces_extracted: 0,
            }
        );
        assert_eq!(summary.images_skipped(), 3);
    }

    #[test]
    fn test_display_mentions_counts() {
        let mut summary = BatchSummary::default();
        summary.record(&outcome(ImageStatus::Unreadable, 0, 0));
        let text = summary.to_string();
        assert!(text.starts_with("1 image(s): 0 face(s) extracted, 1 unreadable"));
    }
}
