//! Tag and free-text filtering over the snippet collection.

use crate::models::Snippet;

/// The transient (selected tag, search text) pair driving the current view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub selected_tag: Option<String>,
    pub search_text: String,
}

impl Query {
    pub fn new(selected_tag: Option<String>, search_text: impl Into<String>) -> Self {
        Self {
            selected_tag,
            search_text: search_text.into(),
        }
    }

    /// Selecting the already selected tag clears it; any other tag replaces it
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.selected_tag.as_deref() == Some(tag) {
            self.selected_tag = None;
        } else {
            self.selected_tag = Some(tag.to_string());
        }
    }

    pub fn clear_tag(&mut self) {
        self.selected_tag = None;
    }
}

/// Where a text query hit, in title > description > code > tag precedence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Description,
    Code { line: usize, text: String },
    Tag(String),
}

impl MatchField {
    pub fn label(&self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::Description => "description",
            MatchField::Code { .. } => "code",
            MatchField::Tag(_) => "tag",
        }
    }

    /// Short human readable context, similar to what a grep hit shows
    pub fn context(&self) -> String {
        match self {
            MatchField::Title => "Title match".to_string(),
            MatchField::Description => "Description match".to_string(),
            MatchField::Code { line, text } => format!("Line {}: {}", line, text),
            MatchField::Tag(tag) => format!("Tag: {}", tag),
        }
    }
}

/// Lowercased, trimmed search text; empty means "no text constraint"
pub fn normalize_search_text(search_text: &str) -> String {
    search_text.trim().to_lowercase()
}

/// Returns the snippets that satisfy both the tag and the text constraint, in input order.
pub fn filter<'a>(
    snippets: &'a [Snippet],
    selected_tag: Option<&str>,
    search_text: &str,
) -> Vec<&'a Snippet> {
    let needle = normalize_search_text(search_text);
    snippets
        .iter()
        .filter(|snippet| matches_normalized(snippet, selected_tag, &needle))
        .collect()
}

pub fn filter_query<'a>(snippets: &'a [Snippet], query: &Query) -> Vec<&'a Snippet> {
    filter(snippets, query.selected_tag.as_deref(), &query.search_text)
}

/// Same as [`filter`] but yields positions into `snippets`
pub fn filter_indices(snippets: &[Snippet], query: &Query) -> Vec<usize> {
    let needle = normalize_search_text(&query.search_text);
    let selected_tag = query.selected_tag.as_deref();

    let indices: Vec<usize> = snippets
        .iter()
        .enumerate()
        .filter(|(_, snippet)| matches_normalized(snippet, selected_tag, &needle))
        .map(|(index, _)| index)
        .collect();

    tracing::debug!(
        tag = selected_tag.unwrap_or("-"),
        query = %needle,
        total = snippets.len(),
        matched = indices.len(),
        "filter evaluated"
    );
    indices
}

fn matches_normalized(snippet: &Snippet, selected_tag: Option<&str>, needle: &str) -> bool {
    let tag_ok = selected_tag.is_none_or(|tag| snippet.has_tag(tag));
    tag_ok && (needle.is_empty() || match_field_normalized(snippet, needle).is_some())
}

/// Reports which field the text query matched first, or `None` if it did not match
/// (an empty query matches nothing here).
pub fn match_field(snippet: &Snippet, search_text: &str) -> Option<MatchField> {
    let needle = normalize_search_text(search_text);
    if needle.is_empty() {
        return None;
    }
    match_field_normalized(snippet, &needle)
}

fn match_field_normalized(snippet: &Snippet, needle: &str) -> Option<MatchField> {
    if contains_ignore_case(&snippet.title, needle) {
        return Some(MatchField::Title);
    }
    if contains_ignore_case(&snippet.description, needle) {
        return Some(MatchField::Description);
    }
    if contains_ignore_case(&snippet.code, needle) {
        // Falls back to line 1 when the hit spans a line break
        let (line, text) = snippet
            .code
            .lines()
            .enumerate()
            .find(|(_, line)| contains_ignore_case(line, needle))
            .map(|(i, line)| (i + 1, line.trim().to_string()))
            .unwrap_or_else(|| (1, String::new()));
        return Some(MatchField::Code { line, text });
    }
    snippet
        .tags
        .iter()
        .find(|tag| contains_ignore_case(tag, needle))
        .map(|tag| MatchField::Tag(tag.clone()))
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Snippet> {
        vec![
            Snippet::new("1", "Git rebase")
                .with_tags(["Git"])
                .with_code("git rebase -i"),
            Snippet::new("2", "Array sort")
                .with_tags(["Javascript"])
                .with_code("arr.sort()"),
        ]
    }

    fn ids(result: &[&Snippet]) -> Vec<String> {
        result.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn tag_only() {
        let snippets = sample();
        assert_eq!(ids(&filter(&snippets, Some("Git"), "")), ["1"]);
    }

    #[test]
    fn text_only() {
        let snippets = sample();
        assert_eq!(ids(&filter(&snippets, None, "sort")), ["2"]);
    }

    #[test]
    fn tag_and_text_must_both_hold() {
        let snippets = sample();
        assert!(filter(&snippets, Some("Git"), "sort").is_empty());
    }

    #[test]
    fn no_constraints_is_identity() {
        let snippets = sample();
        assert_eq!(ids(&filter(&snippets, None, "   ")), ["1", "2"]);
    }

    #[test]
    fn tag_selection_is_case_sensitive_but_text_is_not() {
        let snippets = sample();
        assert!(filter(&snippets, Some("git"), "").is_empty());
        assert_eq!(ids(&filter(&snippets, None, "GIT")), ["1"]);
        assert_eq!(ids(&filter(&snippets, None, "javaSCRIPT")), ["2"]);
    }

    #[test]
    fn empty_fields_never_match() {
        let snippets = vec![Snippet::new("1", "")];
        assert!(filter(&snippets, None, "x").is_empty());
        assert!(filter(&snippets, Some("Git"), "").is_empty());
    }

    #[test]
    fn match_field_reports_precedence_and_line() {
        let snippet = Snippet::new("1", "Docker cleanup")
            .with_description("Remove dangling images")
            .with_code("docker system prune\ndocker image prune -a")
            .with_tags(["DevOps"]);

        assert_eq!(match_field(&snippet, "docker"), Some(MatchField::Title));
        assert_eq!(match_field(&snippet, "dangling"), Some(MatchField::Description));
        assert_eq!(
            match_field(&snippet, "IMAGE prune"),
            Some(MatchField::Code {
                line: 2,
                text: "docker image prune -a".to_string()
            })
        );
        assert_eq!(
            match_field(&snippet, "devops"),
            Some(MatchField::Tag("DevOps".to_string()))
        );
        assert_eq!(match_field(&snippet, ""), None);
        assert_eq!(match_field(&snippet, "kubernetes"), None);
    }

    #[test]
    fn match_context_reads_like_a_grep_hit() {
        let code = MatchField::Code {
            line: 2,
            text: "docker image prune -a".to_string(),
        };
        assert_eq!(code.context(), "Line 2: docker image prune -a");
        assert_eq!(MatchField::Tag("DevOps".to_string()).context(), "Tag: DevOps");
        assert_eq!(MatchField::Title.context(), "Title match");
    }

    #[test]
    fn toggle_tag_selects_replaces_and_clears() {
        let mut query = Query::default();
        query.toggle_tag("Git");
        assert_eq!(query.selected_tag.as_deref(), Some("Git"));
        query.toggle_tag("Network");
        assert_eq!(query.selected_tag.as_deref(), Some("Network"));
        query.toggle_tag("Network");
        assert_eq!(query.selected_tag, None);
    }

    #[test]
    fn filter_indices_agree_with_filter() {
        let snippets = sample();
        let query = Query::new(None, " RE");
        let by_index: Vec<&Snippet> = filter_indices(&snippets, &query)
            .into_iter()
            .map(|i| &snippets[i])
            .collect();
        assert_eq!(by_index, filter_query(&snippets, &query));
    }
}
