use std::collections::HashSet;

/// Jaccard similarity between two text fragments over whitespace token sets.
///
/// Both sides are trimmed and lowercased first, so casing and surrounding
/// whitespace never move the score. Returns `0.0` when either side has no
/// tokens (including both empty) and exactly `1.0` for identical normalized
/// text. The score is symmetric in its arguments.
pub fn score(a: &str, b: &str) -> f64 {
    let left = a.trim().to_lowercase();
    let right = b.trim().to_lowercase();

    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    if left == right {
        return 1.0;
    }

    let left_tokens: HashSet<&str> = left.split_whitespace().collect();
    let right_tokens: HashSet<&str> = right.split_whitespace().collect();

    let intersection = left_tokens.intersection(&right_tokens).count();
    let union = left_tokens.len() + right_tokens.len() - intersection;

    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_scores_one() {
        assert_eq!(score("anyone up for Wingspan?", "anyone up for Wingspan?"), 1.0);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(score("", ""), 0.0);
        assert_eq!(score("", "looking for players"), 0.0);
        assert_eq!(score("looking for players", "   "), 0.0);
    }

    #[test]
    fn casing_and_outer_whitespace_are_ignored() {
        assert_eq!(score("  Game Night Friday  ", "game night friday"), 1.0);
    }

    #[test]
    fn repeated_tokens_collapse_into_the_set() {
        assert_eq!(score("go go go", "go"), 1.0);
    }

    #[test]
    fn partial_overlap_lands_strictly_between_zero_and_one() {
        let value = score("I love Catan", "I love Catan games");
        assert!(value > 0.3, "expected meaningful overlap, got {value}");
        assert!(value < 1.0, "expected partial overlap, got {value}");
    }

    #[test]
    fn score_is_symmetric() {
        let pairs = [
            ("I love Catan", "I love Catan games"),
            ("friday night gloomhaven", "gloomhaven on friday?"),
            ("", "hello"),
        ];
        for (a, b) in pairs {
            assert_eq!(score(a, b), score(b, a), "asymmetric for ({a:?}, {b:?})");
        }
    }

    #[test]
    fn disjoint_token_sets_score_zero() {
        assert_eq!(score("chess tonight", "poker tomorrow"), 0.0);
    }
}
