use std::fmt::Write;
use std::path::Path;

use serde::Serialize;

use crate::pipeline::batch_summary::BatchSummary;
use crate::scoring::domain::result_set::{ResultSet, ScoreStatistics, ScoredFace};

const RULE_WIDTH: usize = 50;

/// File name for a ranked face: `face_{rank}_{stem}_{detection}_similarity_{score}.png`.
///
/// `rank` is 1-based. The score is rounded to three decimals so file
/// listings sort by rank and still show the score at a glance.
pub fn face_file_name(rank: usize, face: &ScoredFace) -> String {
    let id = &face.provenance.image_id;
    let stem = Path::new(id)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.clone());
    format!(
        "face_{rank:03}_{stem}_{}_similarity_{:.3}.png",
        face.provenance.detection_index, face.score
    )
}

fn push_statistics(out: &mut String, stats: &ScoreStatistics) {
    let _ = writeln!(out, "faces: {}", stats.count);
    let _ = writeln!(out, "mean: {:.4}", stats.mean);
    let _ = writeln!(out, "max: {:.4}", stats.max);
    let _ = writeln!(out, "min: {:.4}", stats.min);
    let _ = writeln!(out, "std_dev: {:.4}", stats.std_dev);
}

/// Statistics followed by every score in processing order.
pub fn format_stats(results: &ResultSet) -> String {
    let mut out = String::new();
    out.push_str("Similarity statistics\n");
    out.push_str(&"=".repeat(20));
    out.push('\n');
    push_statistics(&mut out, results.statistics());

    out.push_str("\nPer-face similarity:\n");
    for face in results.in_processing_order() {
        let _ = writeln!(out, "Face {:03}: {:.4}", face.order, face.score);
    }
    out
}

/// Per-face provenance in processing order, then the ranking.
pub fn format_details(results: &ResultSet, summary: &BatchSummary) -> String {
    let rank_of = ranks_by_order(results);
    let mut out = String::new();
    out.push_str("Detailed results\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");
    let _ = writeln!(out, "{summary}\n");

    out.push_str("Faces:\n");
    out.push_str(&"-".repeat(30));
    out.push('\n');
    for face in results.in_processing_order() {
        let rank = rank_of[face.order];
        let _ = writeln!(out, "Face {:03}:", face.order);
        let _ = writeln!(out, "  source: {}", face.provenance.image_id);
        let _ = writeln!(out, "  detection: {}", face.provenance.detection_index);
        let _ = writeln!(out, "  similarity: {:.4}", face.score);
        let _ = writeln!(out, "  saved as: {}", face_file_name(rank, face));
        out.push('\n');
    }

    out.push_str("\nRanking by similarity:\n");
    out.push_str(&"-".repeat(30));
    out.push('\n');
    for (i, face) in results.faces().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:3}. {} (face {}) - similarity: {:.4}",
            i + 1,
            face.provenance.image_id,
            face.provenance.detection_index,
            face.score
        );
    }
    out
}

/// 1-based rank indexed by processing order.
fn ranks_by_order(results: &ResultSet) -> Vec<usize> {
    let mut ranks = vec![0; results.len()];
    for (i, face) in results.faces().iter().enumerate() {
        if let Some(slot) = ranks.get_mut(face.order) {
            *slot = i + 1;
        }
    }
    ranks
}

/// One ranked face as written to `results.json`.
#[derive(Debug, Serialize)]
pub struct FaceEntry<'a> {
    pub rank: usize,
    pub image_id: &'a str,
    pub image_index: usize,
    pub detection_index: usize,
    pub score: f64,
    pub file: String,
}

/// Top-level `results.json` document.
#[derive(Debug, Serialize)]
pub struct ResultsDocument<'a> {
    pub summary: &'a BatchSummary,
    pub statistics: &'a ScoreStatistics,
    pub faces: Vec<FaceEntry<'a>>,
}

impl<'a> ResultsDocument<'a> {
    pub fn new(results: &'a ResultSet, summary: &'a BatchSummary) -> Self {
        let faces = results
            .faces()
            .iter()
            .enumerate()
            .map(|(i, face)| FaceEntry {
                rank: i + 1,
                image_id: &face.provenance.image_id,
                image_index: face.provenance.image_index,
                detection_index: face.provenance.detection_index,
                score: face.score,
                file: face_file_name(i + 1, face),
            })
            .collect();
        Self {
            summary,
            statistics: results.statistics(),
            faces,
        }
    }
}
