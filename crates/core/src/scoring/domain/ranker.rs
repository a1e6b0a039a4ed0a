use std::cmp::Reverse;

use crate::features::domain::feature_vector::FeatureVector;
use crate::normalization::domain::face_sample::Provenance;
use crate::scoring::domain::result_set::{ResultSet, ScoreStatistics, ScoredFace};
use crate::scoring::domain::similarity_scorer::SimilarityScorer;
use crate::shared::constants::SCORE_EPSILON;
use crate::shared::error::AnalysisError;

/// Scores every face against the average and orders them.
///
/// Sorted descending by score. Scores are compared on a [`SCORE_EPSILON`]
/// grid; equal grid values tie and keep processing order (source image, then
/// detection index), so identical input always produces identical output.
pub struct Ranker;

impl Ranker {
    /// `faces` must be in processing order.
    pub fn rank(
        average: &FeatureVector,
        faces: Vec<(Provenance, FeatureVector)>,
    ) -> Result<ResultSet, AnalysisError> {
        let mut scored = faces
            .into_iter()
            .enumerate()
            .map(|(order, (provenance, features))| -> Result<ScoredFace, AnalysisError> {
                let score = SimilarityScorer::score(&features, average)?;
                Ok(ScoredFace {
                    provenance,
                    order,
                    score,
                    features,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let scores: Vec<f64> = scored.iter().map(|f| f.score).collect();
        let statistics = ScoreStatistics::from_scores(&scores)?;

        scored.sort_by_key(|f| (Reverse(tie_key(f.score)), f.order));
        Ok(ResultSet::new(scored, statistics))
    }
}

/// Score snapped to the tie grid. Integer keys keep the sort a total order.
fn tie_key(score: f64) -> i64 {
    (score / SCORE_EPSILON).round() as i64
}
