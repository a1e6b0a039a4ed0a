use std::path::PathBuf;

use crate::detection::domain::face_locator::LocatorFactory;
use crate::pipeline::face_collector::{FaceCollector, OutcomeSink};
use crate::pipeline::face_processor::FaceProcessor;
use crate::shared::error::AnalysisError;

/// Processes images one at a time on the calling thread with one locator.
pub struct SequentialFaceCollector;

impl SequentialFaceCollector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequentialFaceCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceCollector for SequentialFaceCollector {
    fn collect(
        &self,
        paths: &[PathBuf],
        processor: &FaceProcessor,
        locators: &LocatorFactory,
        sink: &mut OutcomeSink<'_>,
    ) -> Result<(), AnalysisError> {
        let mut locator = locators();
        for (index, path) in paths.iter().enumerate() {
            let outcome = processor.process(locator.as_mut(), path, index)?;
            sink(outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::face_processor::{ImageOutcome, ImageStatus};
    use crate::pipeline::test_support::{gray_frame, paths, whole_image_factory, StubImageReader};
    use crate::shared::config::AnalysisConfig;
    use std::sync::Arc;

    fn processor() -> FaceProcessor {
        let reader = StubImageReader::default()
            .with("a.png", gray_frame(64, 64, |_, _| 50))
            .with("c.png", gray_frame(64, 64, |x, _| x as u8));
        let config = AnalysisConfig {
            workers: 1,
            ..AnalysisConfig::default()
        };
        FaceProcessor::from_config(&config, Arc::new(reader)).unwrap()
    }

    #[test]
    fn test_outcomes_arrive_in_input_order() {
        let mut seen: Vec<ImageOutcome> = Vec::new();
        SequentialFaceCollector::new()
            .collect(
                &paths(&["a.png", "b.png", "c.png"]),
                &processor(),
                &whole_image_factory(),
                &mut |o| {
                    seen.push(o);
                    Ok(())
                },
            )
            .unwrap();

        let summary: Vec<_> = seen.iter().map(|o| (o.index, o.status)).collect();
        assert_eq!(
            summary,
            vec![
                (0, ImageStatus::Processed),
                (1, ImageStatus::Unreadable),
                (2, ImageStatus::Processed),
            ]
        );
    }

    #[test]
    fn test_sink_error_stops_batch() {
        let mut calls = 0;
        let result = SequentialFaceCollector::new().collect(
            &paths(&["a.png", "c.png"]),
            &processor(),
            &whole_image_factory(),
            &mut |_| {
                calls += 1;
                Err(AnalysisError::Report("sink full".into()))
            },
        );
        assert!(matches!(result, Err(AnalysisError::Report(_))));
        assert_eq!(calls, 1);
    }
}
