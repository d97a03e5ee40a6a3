//! Similarity scoring for near-miss answers.

/// Failure of a scoring backend. The validator logs it and falls back to
/// exact matching.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("scorer unavailable: {0}")]
    Unavailable(String),
    #[error("scoring failed for {left:?} / {right:?}: {reason}")]
    Failed {
        left: String,
        right: String,
        reason: String,
    },
}

/// A 0-100 similarity between two normalized strings.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, a: &str, b: &str) -> Result<u8, ScoreError>;
}

/// Edit-distance ratio: `round(100 * (L - d) / L)`, `L` being the combined
/// length in chars.
///
/// `d` is an optimal string alignment distance in which insertions and
/// deletions cost 1, substitutions 2 (a delete plus an insert), and swapping
/// two adjacent characters 1. Transposed letters are the most common typing
/// slip, so `dgo` scores 83 against `dog` while `cat` scores 67 against `car`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditRatio;

impl SimilarityScorer for EditRatio {
    fn score(&self, a: &str, b: &str) -> Result<u8, ScoreError> {
        Ok(edit_ratio(a, b))
    }
}

pub fn edit_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let d = edit_distance(&a, &b).min(total);
    // Round half up.
    ((200 * (total - d) + total) / (2 * total)) as u8
}

fn edit_distance(a: &[char], b: &[char]) -> usize {
    let cols = b.len() + 1;
    let mut dp = vec![0usize; (a.len() + 1) * cols];
    for i in 0..=a.len() {
        dp[i * cols] = i;
    }
    for (j, cell) in dp.iter_mut().enumerate().take(cols) {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let sub = if a[i - 1] == b[j - 1] { 0 } else { 2 };
            let mut best = (dp[(i - 1) * cols + j] + 1)
                .min(dp[i * cols + j - 1] + 1)
                .min(dp[(i - 1) * cols + j - 1] + sub);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(dp[(i - 2) * cols + j - 2] + 1);
            }
            dp[i * cols + j] = best;
        }
    }
    dp[a.len() * cols + b.len()]
}
