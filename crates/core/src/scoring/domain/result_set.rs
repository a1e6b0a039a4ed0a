use serde::Serialize;

use crate::features::domain::feature_vector::FeatureVector;
use crate::normalization::domain::face_sample::Provenance;
use crate::shared::error::AnalysisError;

/// One face's similarity to the average face.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredFace {
    pub provenance: Provenance,
    /// Position in processing order (image order, then detection index).
    pub order: usize,
    /// Cosine similarity in `[0, 1]`; 1 means identical feature direction.
    pub score: f64,
    #[serde(skip)]
    pub features: FeatureVector,
}

/// Summary of the score distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScoreStatistics {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub max: f64,
    pub min: f64,
}

impl ScoreStatistics {
    pub fn from_scores(scores: &[f64]) -> Result<Self, AnalysisError> {
        if scores.is_empty() {
            return Err(AnalysisError::EmptyBatch);
        }
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        Ok(Self {
            count: scores.len(),
            mean,
            std_dev: variance.sqrt(),
            max,
            min,
        })
    }
}

/// Faces ranked by descending similarity, plus statistics.
///
/// Built once after every sample has been scored and never modified; this
/// is what the report writer receives.
#[derive(Clone, Debug, Serialize)]
pub struct ResultSet {
    faces: Vec<ScoredFace>,
    statistics: ScoreStatistics,
}

impl ResultSet {
    pub(crate) fn new(faces: Vec<ScoredFace>, statistics: ScoreStatistics) -> Self {
        Self { faces, statistics }
    }

    /// Ranked faces, most typical first.
    pub fn faces(&self) -> &[ScoredFace] {
        &self.faces
    }

    pub fn statistics(&self) -> &ScoreStatistics {
        &self.statistics
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The face closest to the average.
    pub fn best(&self) -> Option<&ScoredFace> {
        self.faces.first()
    }

    /// The face furthest from the average.
    pub fn worst(&self) -> Option<&ScoredFace> {
        self.faces.last()
    }

    /// Faces in processing order rather than rank order.
    pub fn in_processing_order(&self) -> Vec<&ScoredFace> {
        let mut faces: Vec<&ScoredFace> = self.faces.iter().collect();
        faces.sort_by_key(|f| f.order);
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_statistics_of_known_scores() {
        let stats = ScoreStatistics::from_scores(&[0.2, 0.4, 0.6, 0.8]).unwrap();
        assert_eq!(stats.count, 4);
        assert_relative_eq!(stats.mean, 0.5, epsilon = 1e-12);
        // population variance: (0.09 + 0.01 + 0.01 + 0.09) / 4 = 0.05
        assert_relative_eq!(stats.std_dev, 0.05f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(stats.max, 0.8);
        assert_relative_eq!(stats.min, 0.2);
    }

    #[test]
    fn test_single_score_has_zero_deviation() {
        let stats = ScoreStatistics::from_scores(&[0.7]).unwrap();
        assert_relative_eq!(stats.mean, 0.7);
        assert_eq!(stats.std_dev, 0.0);
        assert_relative_eq!(stats.max, stats.min);
    }

    #[test]
    fn test_empty_scores_fail() {
        assert!(matches!(
            ScoreStatistics::from_scores(&[]),
            Err(AnalysisError::EmptyBatch)
        ));
    }
}
