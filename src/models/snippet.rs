use chrono::{DateTime, NaiveDate};

/// A single code snippet as decoded from the snippet document.
///
/// Instances are only produced by the decoder (or by tests through
/// [`Snippet::new`]) and are never mutated once they are part of a
/// [`SnippetCollection`](crate::models::SnippetCollection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub code: String,
    pub tags: Vec<String>,
    pub author: Author,
    pub added_at: String,
}

/// Attribution for a snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub profile_url: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_url: None,
        }
    }

    pub fn with_profile(name: impl Into<String>, profile_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_url: Some(profile_url.into()),
        }
    }

    /// Whether the author should be rendered as a link
    pub fn has_profile(&self) -> bool {
        self.profile_url.is_some()
    }

    /// Name shown after "Added by:"; falls back to the profile URL when the name is blank
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.profile_url.as_deref().unwrap_or("unknown")
        } else {
            &self.name
        }
    }
}

/// Known snippet languages, used for icons and short labels only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnippetLanguage {
    JavaScript,
    TypeScript,
    Rust,
    Python,
    Go,
    Bash,
    Sql,
    Html,
    Css,
    Json,
    Yaml,
    Other(String),
}

impl SnippetLanguage {
    /// Map a free-form language label (as found in the document) to a known kind
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "javascript" | "js" | "jsx" | "node" => SnippetLanguage::JavaScript,
            "typescript" | "ts" | "tsx" => SnippetLanguage::TypeScript,
            "rust" | "rs" => SnippetLanguage::Rust,
            "python" | "py" => SnippetLanguage::Python,
            "go" | "golang" => SnippetLanguage::Go,
            "bash" | "sh" | "shell" | "zsh" | "git" => SnippetLanguage::Bash,
            "sql" | "mysql" | "postgresql" | "sqlite" => SnippetLanguage::Sql,
            "html" => SnippetLanguage::Html,
            "css" | "scss" | "tailwind" => SnippetLanguage::Css,
            "json" => SnippetLanguage::Json,
            "yaml" | "yml" => SnippetLanguage::Yaml,
            _ => SnippetLanguage::Other(label.trim().to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SnippetLanguage::JavaScript => "JavaScript",
            SnippetLanguage::TypeScript => "TypeScript",
            SnippetLanguage::Rust => "Rust",
            SnippetLanguage::Python => "Python",
            SnippetLanguage::Go => "Go",
            SnippetLanguage::Bash => "Bash",
            SnippetLanguage::Sql => "SQL",
            SnippetLanguage::Html => "HTML",
            SnippetLanguage::Css => "CSS",
            SnippetLanguage::Json => "JSON",
            SnippetLanguage::Yaml => "YAML",
            SnippetLanguage::Other(name) if name.is_empty() => "Text",
            SnippetLanguage::Other(name) => name,
        }
    }

    pub fn short_name(&self) -> &str {
        match self {
            SnippetLanguage::JavaScript => "JS",
            SnippetLanguage::TypeScript => "TS",
            SnippetLanguage::Rust => "Rust",
            SnippetLanguage::Python => "Py",
            SnippetLanguage::Go => "Go",
            SnippetLanguage::Bash => "Sh",
            SnippetLanguage::Sql => "SQL",
            SnippetLanguage::Html => "HTML",
            SnippetLanguage::Css => "CSS",
            SnippetLanguage::Json => "JSON",
            SnippetLanguage::Yaml => "YAML",
            SnippetLanguage::Other(_) => self.display_name(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SnippetLanguage::JavaScript => "",
            SnippetLanguage::TypeScript => "",
            SnippetLanguage::Rust => "",
            SnippetLanguage::Python => "",
            SnippetLanguage::Go => "󰟓",
            SnippetLanguage::Bash => "",
            SnippetLanguage::Sql => "",
            SnippetLanguage::Html => "",
            SnippetLanguage::Css => "",
            SnippetLanguage::Json => "",
            SnippetLanguage::Yaml => "",
            SnippetLanguage::Other(_) => "",
        }
    }
}

impl Snippet {
    /// Builds a snippet with empty metadata; mostly useful in tests and fixtures.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            language: String::new(),
            code: String::new(),
            tags: Vec::new(),
            author: Author::default(),
            added_at: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }

    pub fn with_added_at(mut self, added_at: impl Into<String>) -> Self {
        self.added_at = added_at.into();
        self
    }

    pub fn language_kind(&self) -> SnippetLanguage {
        SnippetLanguage::from_label(&self.language)
    }

    /// Exact, case-sensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Parses `added_at` for display. Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates.
    pub fn added_on(&self) -> Option<NaiveDate> {
        let raw = self.added_at.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.date_naive());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_labels_map_to_known_kinds() {
        assert_eq!(SnippetLanguage::from_label("Javascript"), SnippetLanguage::JavaScript);
        assert_eq!(SnippetLanguage::from_label(" ts "), SnippetLanguage::TypeScript);
        assert_eq!(
            SnippetLanguage::from_label("Elixir"),
            SnippetLanguage::Other("Elixir".to_string())
        );
        assert_eq!(SnippetLanguage::from_label("").display_name(), "Text");
    }

    #[test]
    fn added_on_accepts_timestamps_and_dates() {
        let snippet = Snippet::new("1", "t").with_added_at("2024-05-01T10:30:00Z");
        assert_eq!(snippet.added_on(), NaiveDate::from_ymd_opt(2024, 5, 1));

        let snippet = Snippet::new("1", "t").with_added_at("2023-12-24");
        assert_eq!(snippet.added_on(), NaiveDate::from_ymd_opt(2023, 12, 24));

        let snippet = Snippet::new("1", "t").with_added_at("last tuesday");
        assert_eq!(snippet.added_on(), None);
    }

    #[test]
    fn language_kind_follows_the_raw_label() {
        let snippet = Snippet::new("1", "t").with_language("PostgreSQL");
        assert_eq!(snippet.language, "PostgreSQL");
        assert_eq!(snippet.language_kind().short_name(), "SQL");
    }

    #[test]
    fn has_tag_is_case_sensitive() {
        let snippet = Snippet::new("1", "t").with_tags(["Git"]);
        assert!(snippet.has_tag("Git"));
        assert!(!snippet.has_tag("git"));
    }

    #[test]
    fn author_display_name_falls_back_to_profile() {
        assert_eq!(Author::new("harun").display_name(), "harun");
        assert_eq!(
            Author::with_profile("", "https://github.com/harun").display_name(),
            "https://github.com/harun"
        );
        assert_eq!(Author::default().display_name(), "unknown");
    }
}
