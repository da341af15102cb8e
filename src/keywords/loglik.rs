//! Log-likelihood ratio scoring.
//!
//! Compares how often a word occurs in a sample against how often it occurs
//! in a much larger background corpus. The statistic (Dunning's G squared)
//! grows with overrepresentation: a word used at the background rate scores
//! near zero, a word far above it scores high.

/// Log-likelihood ratio of a word's sample frequency against its background
/// frequency.
///
/// `a` is the background frequency of the word, `b` its sample frequency,
/// `c` the background corpus total, and `d` the sample total. Returns 0.0
/// when both totals are zero.
///
/// Zero observed counts and zero expectations contribute nothing: the limit
/// of `x * ln(x / e)` as `x` approaches 0 is 0, so those terms are skipped
/// rather than evaluated through `ln(0)`. The result is always finite.
pub fn log_likelihood(a: u64, b: u64, c: u64, d: u64) -> f64 {
    let (a, b) = (a as f64, b as f64);
    let (c, d) = (c as f64, d as f64);

    let combined = c + d;
    if combined == 0.0 {
        return 0.0;
    }

    let e1 = c * (a + b) / combined;
    let e2 = d * (a + b) / combined;

    let term1 = if a > 0.0 && e1 > 0.0 {
        a * (a / e1).ln()
    } else {
        0.0
    };
    let term2 = if b > 0.0 && e2 > 0.0 {
        b * (b / e2).ln()
    } else {
        0.0
    };

    2.0 * (term1 + term2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_totals_score_zero() {
        assert_eq!(log_likelihood(0, 0, 0, 0), 0.0);
    }

    #[test]
    fn background_rate_scores_zero() {
        // Same proportion in sample and background: no surprise.
        assert!(log_likelihood(10, 10, 100, 100).abs() < 1e-12);
    }

    #[test]
    fn matches_reference_value() {
        // a=10, b=20, c=1000, d=1000:
        // E1 = E2 = 15, G2 = 2 * (10*ln(2/3) + 20*ln(4/3))
        let score = log_likelihood(10, 20, 1000, 1000);
        assert!((score - 3.397_980_7).abs() < 1e-6);
    }

    #[test]
    fn word_absent_from_background_is_finite_and_positive() {
        let score = log_likelihood(0, 5, 1000, 50);
        assert!(score.is_finite());
        assert!(score > 0.0);
    }

    #[test]
    fn word_absent_from_sample_is_finite() {
        let score = log_likelihood(5, 0, 100, 100);
        assert!(score.is_finite());
    }

    #[test]
    fn empty_background_is_finite() {
        let score = log_likelihood(5, 3, 0, 10);
        assert!(score.is_finite());
    }

    #[test]
    fn score_grows_with_overrepresentation() {
        let low = log_likelihood(2, 3, 10_000, 1_000);
        let high = log_likelihood(2, 6, 10_000, 1_000);
        assert!(high > low);
    }
}
