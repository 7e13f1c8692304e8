//! Keyword taxonomy: learning category → ordered keyword vocabulary
//!
//! Built once at startup (compiled-in default or a TOML override) and shared
//! read-only behind an `Arc`. There is no mutation API.
//!
//! Override file format:
//! ```toml
//! [categories]
//! visual = ["diagram", "screen", "visual"]
//! auditory = ["listen", "podcast"]
//! reading_writing = ["read", "notes"]
//! kinesthetic = ["hands-on", "practice"]
//! ```

use super::normalizer::normalize;
use learnfit_common::{Error, LearningCategory, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::info;

/// Compiled-in vocabulary, in taxonomy order
const BUILTIN_KEYWORDS: [(LearningCategory, &[&str]); 4] = [
    (
        LearningCategory::Visual,
        &[
            "diagram", "chart", "graph", "screen", "visual", "picture", "image",
            "illustration", "slide", "whiteboard", "animation", "map", "color",
            "infographic", "look at", "visualize",
        ],
    ),
    (
        LearningCategory::Auditory,
        &[
            "listen", "hear", "sound", "audio", "discuss", "discussion", "podcast",
            "lecture", "talk", "music", "rhythm", "conversation", "out loud",
            "repeat after me",
        ],
    ),
    (
        LearningCategory::ReadingWriting,
        &[
            "read", "reading", "write", "writing", "notes", "text", "article", "book",
            "handout", "list", "definition", "essay", "summary", "worksheet", "journal",
        ],
    ),
    (
        LearningCategory::Kinesthetic,
        &[
            "hands-on", "practice", "exercise", "try it", "build", "experiment",
            "activity", "move", "touch", "lab", "project", "simulation", "role play",
            "follow along", "step by step",
        ],
    ),
];

/// A keyword or short phrase, with its pre-normalized token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    text: String,
    tokens: Vec<String>,
}

impl Keyword {
    /// Returns `None` if the text contains no word characters
    pub fn new(text: &str) -> Option<Self> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return None;
        }
        Some(Self {
            text: text.trim().to_lowercase(),
            tokens: normalized.tokens().to_vec(),
        })
    }

    /// Keyword as configured (trimmed, lowercased); used as match evidence
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

#[derive(Debug, Clone)]
struct CategoryKeywords {
    category: LearningCategory,
    keywords: Vec<Keyword>,
}

/// Immutable category → keyword mapping covering every learning category
#[derive(Debug, Clone)]
pub struct Taxonomy {
    // Always in LearningCategory::ALL order, one entry per category
    entries: Vec<CategoryKeywords>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaxonomyFile {
    categories: BTreeMap<String, Vec<String>>,
}

impl Taxonomy {
    /// Compiled-in default vocabulary
    pub fn builtin() -> Self {
        let entries = BUILTIN_KEYWORDS
            .iter()
            .map(|(category, words)| CategoryKeywords {
                category: *category,
                keywords: words.iter().filter_map(|w| Keyword::new(w)).collect(),
            })
            .collect();
        Self { entries }
    }

    /// Build a taxonomy from explicit keyword lists
    ///
    /// Every category must be present exactly once. Keywords that normalize to
    /// nothing, and duplicates within a category, are configuration errors.
    /// Overlap between categories is allowed.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (LearningCategory, Vec<S>)>,
        S: AsRef<str>,
    {
        let mut by_category: BTreeMap<LearningCategory, Vec<Keyword>> = BTreeMap::new();

        for (category, words) in entries {
            if by_category.contains_key(&category) {
                return Err(Error::Config(format!(
                    "Category '{}' listed more than once",
                    category
                )));
            }

            let mut seen = HashSet::new();
            let mut keywords = Vec::with_capacity(words.len());
            for word in &words {
                let word = word.as_ref();
                let keyword = Keyword::new(word).ok_or_else(|| {
                    Error::Config(format!(
                        "Keyword '{}' in category '{}' has no word characters",
                        word, category
                    ))
                })?;
                if !seen.insert(keyword.tokens.clone()) {
                    return Err(Error::Config(format!(
                        "Duplicate keyword '{}' in category '{}'",
                        word, category
                    )));
                }
                keywords.push(keyword);
            }

            by_category.insert(category, keywords);
        }

        let mut ordered = Vec::with_capacity(LearningCategory::ALL.len());
        for category in LearningCategory::ALL {
            let keywords = by_category.remove(&category).ok_or_else(|| {
                Error::Config(format!("Missing keywords for category '{}'", category))
            })?;
            ordered.push(CategoryKeywords { category, keywords });
        }

        Ok(Self { entries: ordered })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TaxonomyFile =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;

        let mut entries = Vec::with_capacity(file.categories.len());
        for (slug, words) in file.categories {
            let category = slug
                .parse::<LearningCategory>()
                .map_err(|_| Error::Config(format!("Unknown category '{}' in taxonomy", slug)))?;
            entries.push((category, words));
        }

        Self::from_entries(entries)
    }

    /// Load a taxonomy override file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        info!(
            path = %path.display(),
            keywords = taxonomy.keyword_count(),
            "Loaded keyword taxonomy"
        );
        Ok(taxonomy)
    }

    /// Keywords for one category, in taxonomy order
    pub fn keywords_for(&self, category: LearningCategory) -> &[Keyword] {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.keywords.as_slice())
            .unwrap_or(&[])
    }

    /// Categories with their keywords, in taxonomy order
    pub fn iter(&self) -> impl Iterator<Item = (LearningCategory, &[Keyword])> {
        self.entries
            .iter()
            .map(|entry| (entry.category, entry.keywords.as_slice()))
    }

    pub fn keyword_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.keywords.len()).sum()
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_passes_validation() {
        let entries = BUILTIN_KEYWORDS
            .iter()
            .map(|(category, words)| (*category, words.to_vec()));
        let validated = Taxonomy::from_entries(entries).unwrap();

        let builtin = Taxonomy::builtin();
        assert_eq!(validated.keyword_count(), builtin.keyword_count());
        for category in LearningCategory::ALL {
            assert!(!builtin.keywords_for(category).is_empty());
            assert_eq!(builtin.keywords_for(category), validated.keywords_for(category));
        }
    }

    #[test]
    fn test_iter_is_in_category_order() {
        let categories: Vec<_> = Taxonomy::builtin().iter().map(|(c, _)| c).collect();
        assert_eq!(categories, LearningCategory::ALL.to_vec());
    }

    #[test]
    fn test_keyword_keeps_phrase_tokens() {
        let keyword = Keyword::new("  Hands-On ").unwrap();
        assert_eq!(keyword.text(), "hands-on");
        assert_eq!(keyword.tokens(), ["hands", "on"]);
        assert!(Keyword::new(" -- ").is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let taxonomy = Taxonomy::from_toml_str(
            r#"
            [categories]
            visual = ["diagram", "screen", "visual"]
            auditory = ["listen"]
            reading_writing = ["read"]
            kinesthetic = ["hands-on", "practice", "exercise"]
            "#,
        )
        .unwrap();

        let visual: Vec<_> = taxonomy
            .keywords_for(LearningCategory::Visual)
            .iter()
            .map(Keyword::text)
            .collect();
        assert_eq!(visual, vec!["diagram", "screen", "visual"]);
        assert_eq!(taxonomy.keyword_count(), 8);
    }

    #[test]
    fn test_overlap_between_categories_allowed() {
        let taxonomy = Taxonomy::from_entries(vec![
            (LearningCategory::Visual, vec!["video"]),
            (LearningCategory::Auditory, vec!["video"]),
            (LearningCategory::ReadingWriting, vec!["video"]),
            (LearningCategory::Kinesthetic, vec!["video"]),
        ]);
        assert!(taxonomy.is_ok());
    }

    #[test]
    fn test_rejects_missing_category() {
        let result = Taxonomy::from_toml_str(
            r#"
            [categories]
            visual = ["diagram"]
            auditory = ["listen"]
            reading_writing = ["read"]
            "#,
        );
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("kinesthetic")));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let result = Taxonomy::from_toml_str(
            r#"
            [categories]
            visual = ["diagram"]
            auditory = ["listen"]
            reading_writing = ["read"]
            kinesthetic = ["build"]
            olfactory = ["smell"]
            "#,
        );
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("olfactory")));
    }

    #[test]
    fn test_rejects_duplicate_after_normalization() {
        let result = Taxonomy::from_entries(vec![
            (LearningCategory::Visual, vec!["Diagram", "diagram!"]),
            (LearningCategory::Auditory, vec!["listen"]),
            (LearningCategory::ReadingWriting, vec!["read"]),
            (LearningCategory::Kinesthetic, vec!["build"]),
        ]);
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("Duplicate")));
    }

    #[test]
    fn test_rejects_empty_keyword() {
        let result = Taxonomy::from_entries(vec![
            (LearningCategory::Visual, vec!["diagram", "   "]),
            (LearningCategory::Auditory, vec!["listen"]),
            (LearningCategory::ReadingWriting, vec!["read"]),
            (LearningCategory::Kinesthetic, vec!["build"]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.toml");
        std::fs::write(
            &path,
            "[categories]\nvisual = [\"chart\"]\nauditory = [\"hear\"]\nreading_writing = [\"notes\"]\nkinesthetic = [\"lab\"]\n",
        )
        .unwrap();

        let taxonomy = Taxonomy::load(&path).unwrap();
        assert_eq!(taxonomy.keywords_for(LearningCategory::Kinesthetic)[0].text(), "lab");

        assert!(Taxonomy::load(&dir.path().join("missing.toml")).is_err());
    }
}
