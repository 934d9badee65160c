//! Embedding Similarity Scorer — resume vs job description.
//!
//! Both texts are embedded concurrently, compared by cosine similarity, and the
//! result mapped from [-1, 1] to [0, 1]. Any failure yields `DEFAULT_SIMILARITY`.

use tracing::{debug, warn};

use crate::ai_client::{GenerativeAi, TaskType};

/// Similarity used whenever embeddings cannot be compared.
pub const DEFAULT_SIMILARITY: f64 = 0.5;

/// Returns the normalised similarity in [0, 1]. Never fails.
pub async fn semantic_similarity(ai: &dyn GenerativeAi, resume: &str, job: &str) -> f64 {
    if resume.trim().is_empty() || job.trim().is_empty() {
        warn!("Empty resume or job description; using default similarity");
        return DEFAULT_SIMILARITY;
    }

    let (resume_vec, job_vec) = tokio::join!(
        ai.embed_content(resume, TaskType::SemanticSimilarity),
        ai.embed_content(job, TaskType::SemanticSimilarity),
    );

    let (resume_vec, job_vec) = match (resume_vec, job_vec) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Embedding request failed: {e}; using default similarity");
            return DEFAULT_SIMILARITY;
        }
    };

    match cosine_similarity(&resume_vec, &job_vec) {
        Some(sim) => {
            let normalized = normalize(sim);
            debug!("Cosine similarity {sim:.4} → {normalized:.4}");
            normalized
        }
        None => {
            warn!(
                "Embeddings not comparable ({} vs {} dims); using default similarity",
                resume_vec.len(),
                job_vec.len()
            );
            DEFAULT_SIMILARITY
        }
    }
}

/// dot(a, b) / (‖a‖·‖b‖). `None` for empty, mismatched, or zero-length vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some((dot / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

/// Maps a cosine value from [-1, 1] to [0, 1].
pub fn normalize(sim: f64) -> f64 {
    (sim + 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::testing::ScriptedAi;

    #[test]
    fn test_identical_vectors_are_one() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal_vectors_are_zero() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-9);
    }

    #[test]
    fn test_opposite_vectors_are_minus_one() {
        let sim = cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_incomparable_vectors_are_none() {
        assert!(cosine_similarity(&[], &[]).is_none());
        assert!(cosine_similarity(&[1.0], &[1.0, 2.0]).is_none());
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_normalize_maps_range() {
        assert_eq!(normalize(-1.0), 0.0);
        assert_eq!(normalize(0.0), 0.5);
        assert_eq!(normalize(1.0), 1.0);
    }

    #[tokio::test]
    async fn test_orthogonal_embeddings_normalize_to_half() {
        let ai = ScriptedAi::new().with_embeddings(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let sim = semantic_similarity(&ai, "resume", "job").await;
        assert!((sim - 0.5).abs() < 1e-9);
        assert_eq!(ai.embed_calls(), 2);
    }

    #[tokio::test]
    async fn test_parallel_embeddings_identical_text_is_one() {
        let ai = ScriptedAi::new().with_embeddings(vec![vec![0.3, 0.4], vec![0.3, 0.4]]);
        let sim = semantic_similarity(&ai, "resume", "job").await;
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_embedding_failure_falls_back_to_default() {
        let ai = ScriptedAi::new();
        let sim = semantic_similarity(&ai, "resume", "job").await;
        assert_eq!(sim, DEFAULT_SIMILARITY);
    }

    #[tokio::test]
    async fn test_empty_text_skips_api_and_defaults() {
        let ai = ScriptedAi::new().with_embeddings(vec![vec![1.0], vec![1.0]]);
        let sim = semantic_similarity(&ai, "   ", "job").await;
        assert_eq!(sim, DEFAULT_SIMILARITY);
        assert_eq!(ai.embed_calls(), 0);
    }
}
