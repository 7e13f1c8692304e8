//! Transcript normalization
//!
//! Turns raw transcript text into a lowercase token stream split on Unicode
//! word boundaries (UAX #29). Keywords are normalized with the same function,
//! so a keyword matches only whole words and multi-word phrases match only as
//! contiguous token runs.

use unicode_segmentation::UnicodeSegmentation;

/// Canonical token stream of a transcript or keyword
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    tokens: Vec<String>,
}

impl NormalizedText {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when there is no evidence to score
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Normalize text for keyword matching
///
/// - lowercases everything
/// - splits on UAX #29 word boundaries, then again on every character that
///   is not a letter or digit; word-internal `.`, `:` and apostrophes do not
///   glue words together ("diagram.then" becomes `diagram`, `then`)
/// - drops empty pieces, which also collapses runs of whitespace
///
/// Hyphens and apostrophes separate words: "hands-on" becomes `hands`, `on`
/// and the possessive "screen's" becomes `screen`, `s`, so the bare noun
/// still matches. Keywords go through the same function, so a keyword
/// containing an apostrophe matches the same token run.
pub fn normalize(text: &str) -> NormalizedText {
    let lowered = text.to_lowercase();

    let tokens = lowered
        .split_word_bounds()
        .flat_map(|segment| segment.split(|c: char| !c.is_alphanumeric()))
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect();

    NormalizedText { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        normalize(text).tokens().to_vec()
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(tokens("Diagram"), vec!["diagram"]);
        assert_eq!(tokens("diagram,"), vec!["diagram"]);
        assert_eq!(tokens("DIAGRAM!"), vec!["diagram"]);
        assert_eq!(tokens("(diagram)."), vec!["diagram"]);
    }

    #[test]
    fn test_collapses_whitespace() {
        let normalized = normalize("  look\tat \n\n the   screen  ");
        assert_eq!(normalized.tokens(), ["look", "at", "the", "screen"]);
        assert_eq!(normalized.len(), 4);
    }

    #[test]
    fn test_hyphen_splits_words() {
        assert_eq!(tokens("a hands-on lab"), vec!["a", "hands", "on", "lab"]);
    }

    #[test]
    fn test_apostrophes_separate_words() {
        assert_eq!(tokens("It's here"), vec!["it", "s", "here"]);
        assert_eq!(tokens("It\u{2019}s here"), vec!["it", "s", "here"]);
        assert_eq!(tokens("the screen's brightness"), vec!["the", "screen", "s", "brightness"]);
    }

    #[test]
    fn test_punctuation_without_space_splits() {
        assert_eq!(
            tokens("Look at the diagram.Then the screen:zoom in"),
            vec!["look", "at", "the", "diagram", "then", "the", "screen", "zoom", "in"]
        );
        assert_eq!(tokens("notes/handout;list"), vec!["notes", "handout", "list"]);
    }

    #[test]
    fn test_longer_words_stay_whole() {
        assert_eq!(tokens("diagrammatic"), vec!["diagrammatic"]);
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t").is_empty());
        assert!(normalize("?!... --").is_empty());
    }

    #[test]
    fn test_non_ascii_letters() {
        assert_eq!(tokens("Übung macht den Meister"), vec!["übung", "macht", "den", "meister"]);
    }
}
