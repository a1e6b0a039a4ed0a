use crate::features::domain::feature_vector::FeatureVector;
use crate::shared::error::AnalysisError;

/// Cosine of the angle between two equal-length vectors, in `[-1, 1]`.
///
/// Defined as 0 when either vector has zero norm: no feature signal, no
/// similarity.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, AnalysisError> {
    if a.len() != b.len() {
        return Err(AnalysisError::shape_mismatch(
            "feature vector",
            a.len(),
            b.len(),
        ));
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / denom).clamp(-1.0, 1.0))
}

/// Scores faces against a reference descriptor.
pub struct SimilarityScorer;

impl SimilarityScorer {
    /// Cosine similarity clamped to `[0, 1]` for reporting.
    pub fn score(a: &FeatureVector, b: &FeatureVector) -> Result<f64, AnalysisError> {
        Ok(cosine_similarity(a.values(), b.values())?.clamp(0.0, 1.0))
    }
}
