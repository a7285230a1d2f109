use std::collections::{HashMap, HashSet};

use crate::models::Snippet;

/// The loaded, read-only set of snippets in document order.
#[derive(Debug, Clone, Default)]
pub struct SnippetCollection {
    snippets: Vec<Snippet>,
    by_id: HashMap<String, usize>,
}

impl SnippetCollection {
    /// Builds a collection, keeping the first snippet for any repeated id.
    pub fn new(snippets: Vec<Snippet>) -> Self {
        let mut by_id = HashMap::with_capacity(snippets.len());
        let mut unique = Vec::with_capacity(snippets.len());

        for snippet in snippets {
            if by_id.contains_key(&snippet.id) {
                continue;
            }
            by_id.insert(snippet.id.clone(), unique.len());
            unique.push(snippet);
        }

        Self {
            snippets: unique,
            by_id,
        }
    }

    pub fn as_slice(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snippet> {
        self.snippets.iter()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Snippet> {
        self.by_id.get(id).map(|&index| &self.snippets[index])
    }

    pub fn get_index(&self, index: usize) -> Option<&Snippet> {
        self.snippets.get(index)
    }

    /// Every tag used in the collection, in first-seen order
    pub fn distinct_tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.snippets
            .iter()
            .flat_map(|s| s.tags.iter())
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a SnippetCollection {
    type Item = &'a Snippet;
    type IntoIter = std::slice::Iter<'a, Snippet>;

    fn into_iter(self) -> Self::IntoIter {
        self.snippets.iter()
    }
}
