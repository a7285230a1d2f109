use std::collections::HashSet;

use crate::models::SnippetCollection;

/// Tags offered for selection when nothing else is configured
pub const DEFAULT_TAGS: [&str; 9] = [
    "Web Development",
    "Web Design",
    "Javascript",
    "React-Redux",
    "Typescript",
    "Database",
    "Package",
    "Git",
    "Network",
];

/// The ordered list of tags the user can pick from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVocabulary {
    tags: Vec<String>,
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self::from_labels(DEFAULT_TAGS)
    }
}

impl TagVocabulary {
    /// Builds a vocabulary, dropping blank labels and repeats while keeping order
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let tags = labels
            .into_iter()
            .map(Into::into)
            .filter(|tag: &String| !tag.trim().is_empty())
            .filter(|tag| seen.insert(tag.clone()))
            .collect();

        Self { tags }
    }

    /// Vocabulary made of every tag present in the loaded data
    pub fn from_collection(collection: &SnippetCollection) -> Self {
        Self::from_labels(collection.distinct_tags())
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tags.get(index).map(String::as_str)
    }

    pub fn position(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Snippet;

    #[test]
    fn default_vocabulary_is_the_fixed_list() {
        let vocabulary = TagVocabulary::default();
        assert_eq!(vocabulary.len(), 9);
        assert_eq!(vocabulary.get(0), Some("Web Development"));
        assert_eq!(vocabulary.position("Git"), Some(7));
    }

    #[test]
    fn labels_are_deduplicated_in_order() {
        let vocabulary = TagVocabulary::from_labels(["Git", "", "Network", "Git", "  "]);
        assert_eq!(vocabulary.tags(), ["Git", "Network"]);
    }

    #[test]
    fn vocabulary_from_collection_uses_data_tags() {
        let collection = SnippetCollection::new(vec![
            Snippet::new("1", "a").with_tags(["Rust", "CLI"]),
            Snippet::new("2", "b").with_tags(["CLI"]),
        ]);
        let vocabulary = TagVocabulary::from_collection(&collection);
        assert_eq!(vocabulary.tags(), ["Rust", "CLI"]);
    }
}
