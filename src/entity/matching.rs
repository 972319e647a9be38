use strsim::jaro_winkler;

use super::types::Metric;

/// Highest score any metric may return.
pub const MAX_SCORE: u8 = 100;

/// Scores how alike two normalized names are on a `0..=100` scale.
///
/// Implementations must be symmetric and return `MAX_SCORE` for identical
/// inputs, including two empty strings.
pub trait Similarity {
    fn score(&self, a: &str, b: &str) -> u8;
}

/// Order-insensitive Indel ratio: tokens are sorted before comparison, so
/// "traders global" and "global traders" score 100.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSortRatio;

impl Similarity for TokenSortRatio {
    fn score(&self, a: &str, b: &str) -> u8 {
        let a: Vec<char> = sort_tokens(a).chars().collect();
        let b: Vec<char> = sort_tokens(b).chars().collect();

        let total = a.len() + b.len();
        if total == 0 {
            return MAX_SCORE;
        }

        // Floor so that `score >= threshold` matches the exact ratio
        let lcs = lcs_len(&a, &b);
        ((200 * lcs) / total) as u8
    }
}

/// Jaro-Winkler over token-sorted names, scaled to `0..=100`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenJaroWinkler;

impl Similarity for TokenJaroWinkler {
    fn score(&self, a: &str, b: &str) -> u8 {
        let a = sort_tokens(a);
        let b = sort_tokens(b);
        if a == b {
            return MAX_SCORE;
        }
        let similarity = jaro_winkler(&a, &b);
        (similarity * f64::from(MAX_SCORE))
            .floor()
            .clamp(0.0, f64::from(MAX_SCORE)) as u8
    }
}

impl Similarity for Metric {
    fn score(&self, a: &str, b: &str) -> u8 {
        match self {
            Metric::TokenSort => TokenSortRatio.score(a, b),
            Metric::JaroWinkler => TokenJaroWinkler.score(a, b),
        }
    }
}

fn sort_tokens(name: &str) -> String {
    let mut tokens: Vec<&str> = name.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
