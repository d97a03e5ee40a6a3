use tracing::{debug, warn};

use crate::scoring::{ScoreError, SimilarityScorer};

/// Default minimum similarity for a near miss.
pub const DEFAULT_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub is_match: bool,
    pub has_typo: bool,
    /// Index into the candidate list.
    pub best_match: Option<usize>,
    pub similarity: u8,
}

impl FuzzyMatch {
    fn none() -> Self {
        Self {
            is_match: false,
            has_typo: false,
            best_match: None,
            similarity: 0,
        }
    }

    fn perfect(index: usize) -> Self {
        Self {
            is_match: true,
            has_typo: false,
            best_match: Some(index),
            similarity: 100,
        }
    }
}

/// Pick the candidate most similar to `answer`, if any reaches `threshold`.
///
/// A case-insensitive equal candidate wins outright. Otherwise the highest
/// score at or above `threshold` wins and the earliest candidate keeps a
/// tie. If the scorer fails, only exact equality is considered.
pub fn find_best_fuzzy_match<S: AsRef<str>>(
    answer: &str,
    candidates: &[S],
    threshold: u8,
    scorer: &dyn SimilarityScorer,
) -> FuzzyMatch {
    let answer = answer.trim();
    if answer.is_empty() {
        warn!("fuzzy match: answer is empty after trimming");
        return FuzzyMatch::none();
    }
    if candidates.is_empty() {
        warn!("fuzzy match: no candidate answers");
        return FuzzyMatch::none();
    }

    match scan(answer, candidates, threshold, scorer) {
        Ok(found) => found,
        Err(e) => {
            warn!(error = %e, "fuzzy match: scorer failed, falling back to exact match");
            exact_only(answer, candidates)
        }
    }
}

fn scan<S: AsRef<str>>(
    answer: &str,
    candidates: &[S],
    threshold: u8,
    scorer: &dyn SimilarityScorer,
) -> Result<FuzzyMatch, ScoreError> {
    let lowered = answer.to_lowercase();
    let mut best = FuzzyMatch::none();

    for (index, candidate) in candidates.iter().enumerate() {
        let candidate = candidate.as_ref().trim();
        if candidate.is_empty() {
            debug!(index, "fuzzy match: skipping empty candidate");
            continue;
        }
        if candidate.to_lowercase() == lowered {
            return Ok(FuzzyMatch::perfect(index));
        }

        let similarity = scorer.score(answer, candidate)?;
        if similarity >= threshold && similarity > best.similarity {
            best = FuzzyMatch {
                is_match: true,
                has_typo: similarity < 100,
                best_match: Some(index),
                similarity,
            };
        }
        if similarity == 100 {
            break;
        }
    }

    debug!(similarity = best.similarity, is_match = best.is_match);
    Ok(best)
}

fn exact_only<S: AsRef<str>>(answer: &str, candidates: &[S]) -> FuzzyMatch {
    let lowered = answer.to_lowercase();
    candidates
        .iter()
        .position(|c| c.as_ref().trim().to_lowercase() == lowered)
        .map_or_else(FuzzyMatch::none, FuzzyMatch::perfect)
}
