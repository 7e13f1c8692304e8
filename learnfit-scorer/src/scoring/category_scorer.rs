//! Per-category keyword scoring
//!
//! Score = total number of non-overlapping keyword occurrences. Every
//! occurrence weighs the same and repeated keywords are not capped, so the
//! score can always be reproduced by hand from the transcript.

use super::normalizer::NormalizedText;
use super::taxonomy::Keyword;
use serde::{Deserialize, Serialize};

/// Result of scoring one category against one transcript
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Raw occurrence count (not a percentage)
    pub score: u32,
    /// Keywords with at least one occurrence, in taxonomy order
    pub matched_keywords: Vec<String>,
}

/// Score normalized text against one category's keywords
///
/// Empty text or no matches yields score 0 with no evidence.
pub fn score(text: &NormalizedText, keywords: &[Keyword]) -> CategoryScore {
    let mut result = CategoryScore::default();
    if text.is_empty() {
        return result;
    }

    for keyword in keywords {
        let occurrences = count_occurrences(text.tokens(), keyword.tokens());
        if occurrences > 0 {
            result.score = result.score.saturating_add(occurrences);
            result.matched_keywords.push(keyword.text().to_string());
        }
    }

    result
}

/// Count non-overlapping occurrences of `needle` as a contiguous token run
fn count_occurrences(haystack: &[String], needle: &[String]) -> u32 {
    if needle.is_empty() || needle.len() > haystack.len() {
        return 0;
    }

    let mut count = 0u32;
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == *needle {
            count = count.saturating_add(1);
            i += needle.len();
        } else {
            i += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::normalizer::normalize;

    fn keywords(words: &[&str]) -> Vec<Keyword> {
        words.iter().filter_map(|w| Keyword::new(w)).collect()
    }

    #[test]
    fn test_visual_example() {
        let text = normalize(
            "Look at this diagram on the screen, it's very visual and another diagram below",
        );
        let result = score(&text, &keywords(&["diagram", "screen", "visual"]));

        assert_eq!(result.score, 4);
        assert_eq!(result.matched_keywords, vec!["diagram", "screen", "visual"]);
    }

    #[test]
    fn test_no_matches_is_zero() {
        let text = normalize("Today we talk about the history of the printing press");
        let result = score(&text, &keywords(&["hands-on", "practice", "exercise"]));

        assert_eq!(result, CategoryScore::default());
        assert_eq!(result.score, 0);
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_empty_text_is_zero() {
        let result = score(&normalize(""), &keywords(&["diagram"]));
        assert_eq!(result.score, 0);
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let text = normalize("Diagram diagram, DIAGRAM!");
        let result = score(&text, &keywords(&["diagram"]));
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_word_boundaries() {
        let text = normalize("The diagrammatic approach uses subdiagrams");
        let result = score(&text, &keywords(&["diagram"]));
        assert_eq!(result.score, 0);
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_keywords_touching_punctuation() {
        let kw = keywords(&["diagram", "screen"]);

        let result = score(&normalize("Look at the diagram.Then the screen:zoom in"), &kw);
        assert_eq!(result.score, 2);
        assert_eq!(result.matched_keywords, vec!["diagram", "screen"]);

        let result = score(&normalize("the screen's brightness"), &kw);
        assert_eq!(result.score, 1);
        assert_eq!(result.matched_keywords, vec!["screen"]);
    }

    #[test]
    fn test_phrase_must_be_contiguous() {
        let kw = keywords(&["hands-on"]);

        let result = score(&normalize("This is a hands-on session, very Hands On."), &kw);
        assert_eq!(result.score, 2);

        let result = score(&normalize("Raise your hands and move on"), &kw);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_evidence_follows_taxonomy_order() {
        let text = normalize("visual first, then a screen, then a diagram");
        let result = score(&text, &keywords(&["diagram", "screen", "visual"]));
        assert_eq!(result.matched_keywords, vec!["diagram", "screen", "visual"]);
    }

    #[test]
    fn test_non_overlapping_phrase_counts() {
        let tokens: Vec<String> = ["ha", "ha", "ha"].iter().map(|s| s.to_string()).collect();
        let needle: Vec<String> = ["ha", "ha"].iter().map(|s| s.to_string()).collect();
        assert_eq!(count_occurrences(&tokens, &needle), 1);
        assert_eq!(count_occurrences(&tokens, &[]), 0);
        assert_eq!(count_occurrences(&needle, &tokens), 0);
    }

    #[test]
    fn test_deterministic() {
        let text = normalize("practice, practice and more practice; then exercise");
        let kw = keywords(&["practice", "exercise"]);
        let first = score(&text, &kw);
        for _ in 0..5 {
            assert_eq!(score(&text, &kw), first);
        }
        assert_eq!(first.score, 4);
    }
}
