use std::path::PathBuf;
use std::time::Instant;

use crate::aggregation::domain::average_face::AverageFace;
use crate::aggregation::domain::face_aggregator::FaceAggregator;
use crate::detection::domain::face_locator::LocatorFactory;
use crate::features::domain::feature_extractor::FeatureExtractor;
use crate::features::domain::feature_vector::FeatureVector;
use crate::normalization::domain::face_sample::{FaceSample, Provenance};
use crate::pipeline::batch_summary::BatchSummary;
use crate::pipeline::face_collector::FaceCollector;
use crate::pipeline::face_processor::FaceProcessor;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::scoring::domain::ranker::Ranker;
use crate::scoring::domain::result_set::{ResultSet, ScoredFace};
use crate::shared::error::AnalysisError;

/// The average face of a batch and every face ranked against it.
#[derive(Debug)]
pub struct BatchAnalysis {
    pub average_face: AverageFace,
    pub average_features: FeatureVector,
    pub result_set: ResultSet,
}

/// Averages and ranks samples that are already in memory.
///
/// `samples` must be in processing order and share one resolution and
/// channel count. Fails with [`AnalysisError::EmptyBatch`] when empty.
pub fn analyze_samples(
    samples: &[FaceSample],
    extractor: &FeatureExtractor,
) -> Result<BatchAnalysis, AnalysisError> {
    let first = samples.first().ok_or(AnalysisError::EmptyBatch)?;
    let mut aggregator =
        FaceAggregator::new(first.width(), first.height(), first.display().channels());
    let mut faces = Vec::with_capacity(samples.len());
    for sample in samples {
        aggregator.accumulate(sample)?;
        faces.push((sample.provenance().clone(), extractor.extract_sample(sample)?));
    }
    conclude(aggregator, faces, extractor)
}

fn conclude(
    aggregator: FaceAggregator,
    faces: Vec<(Provenance, FeatureVector)>,
    extractor: &FeatureExtractor,
) -> Result<BatchAnalysis, AnalysisError> {
    let average_face = aggregator.finalize()?;
    let average_features = extractor.extract_average(&average_face)?;
    let result_set = Ranker::rank(&average_features, faces)?;
    Ok(BatchAnalysis {
        average_face,
        average_features,
        result_set,
    })
}

/// Everything a report needs from one run.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub average_face: AverageFace,
    pub average_features: FeatureVector,
    pub result_set: ResultSet,
    /// Normalized samples in processing order.
    pub samples: Vec<FaceSample>,
    pub summary: BatchSummary,
}

impl AnalysisOutcome {
    /// The normalized sample behind a ranked face.
    pub fn sample(&self, face: &ScoredFace) -> Option<&FaceSample> {
        self.samples.get(face.order)
    }
}

/// Batch pipeline: collect → aggregate → extract average → rank.
///
/// Samples stream into the aggregator as the collector delivers them, in
/// input order, so the result does not depend on how collection was
/// scheduled.
pub struct AnalyzeFacesUseCase {
    processor: FaceProcessor,
    locators: LocatorFactory,
    collector: Box<dyn FaceCollector>,
    logger: Box<dyn PipelineLogger>,
}

impl AnalyzeFacesUseCase {
    pub fn new(
        processor: FaceProcessor,
        locators: LocatorFactory,
        collector: Box<dyn FaceCollector>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            processor,
            locators,
            collector,
            logger,
        }
    }

    pub fn execute(&mut self, paths: &[PathBuf]) -> Result<AnalysisOutcome, AnalysisError> {
        let total = paths.len();
        let normalizer = self.processor.normalizer();
        let mut aggregator =
            FaceAggregator::new(normalizer.width(), normalizer.height(), normalizer.channels());
        let mut faces: Vec<(Provenance, FeatureVector)> = Vec::new();
        let mut samples: Vec<FaceSample> = Vec::new();
        let mut summary = BatchSummary::default();

        log::info!("Analyzing {total} image(s)");
        let mut aggregate_ms = 0.0;
        let logger = &mut self.logger;
        self.collector.collect(
            paths,
            &self.processor,
            &self.locators,
            &mut |outcome| {
                summary.record(&outcome);
                logger.image_processed(&outcome, summary.images_total, total);

                let start = Instant::now();
                for face in outcome.faces {
                    aggregator.accumulate(&face.sample)?;
                    faces.push((face.sample.provenance().clone(), face.features));
                    samples.push(face.sample);
                }
                aggregate_ms += start.elapsed().as_secs_f64() * 1000.0;
                Ok(())
            },
        )?;
        self.logger.batch_stage("aggregate", aggregate_ms);

        if faces.is_empty() {
            self.logger.finished(&summary);
            return Err(AnalysisError::EmptyBatch);
        }

        let start = Instant::now();
        let analysis = conclude(aggregator, faces, self.processor.extractor())?;
        self.logger
            .batch_stage("rank", start.elapsed().as_secs_f64() * 1000.0);
        self.logger.finished(&summary);

        Ok(AnalysisOutcome {
            average_face: analysis.average_face,
            average_features: analysis.average_features,
            result_set: analysis.result_set,
            samples,
            summary,
        })
    }
}
