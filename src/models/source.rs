use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

use crate::models::decode::{DecodeReport, DocumentFormat, decode_document};

/// Where the snippet document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetSource {
    Url(String),
    File(PathBuf),
}

impl SnippetSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            SnippetSource::Url(raw.to_string())
        } else {
            SnippetSource::File(PathBuf::from(raw))
        }
    }

    /// YAML for `.yaml`/`.yml` files, JSON for everything else
    pub fn format(&self) -> DocumentFormat {
        let path = match self {
            SnippetSource::Url(url) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
            SnippetSource::File(path) => path.to_string_lossy().to_string(),
        };
        let lower = path.to_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Json
        }
    }

    /// Retrieves the raw document text
    pub async fn fetch(&self) -> Result<String> {
        match self {
            SnippetSource::Url(url) => {
                let response = reqwest::get(url)
                    .await
                    .with_context(|| format!("Failed to fetch snippets from {}", url))?;

                let status = response.status();
                if !status.is_success() {
                    bail!("Snippet source {} answered with HTTP {}", url, status);
                }

                response
                    .text()
                    .await
                    .with_context(|| format!("Failed to read response body from {}", url))
            }
            SnippetSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read snippet file {:?}", path)),
        }
    }

    /// Fetches and decodes the document
    pub async fn load(&self) -> Result<DecodeReport> {
        tracing::info!(source = %self, "loading snippets");
        let text = self.fetch().await?;
        let report = decode_document(&text, self.format())
            .with_context(|| format!("Invalid snippet document at {}", self))?;

        tracing::info!(
            loaded = report.collection.len(),
            rejected = report.rejected.len(),
            "snippets loaded"
        );
        Ok(report)
    }

    /// Runs [`SnippetSource::load`] on a fresh runtime for callers outside async code
    pub fn load_blocking(&self) -> Result<DecodeReport> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        runtime.block_on(self.load())
    }
}

impl FromStr for SnippetSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SnippetSource::parse(s))
    }
}

impl fmt::Display for SnippetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetSource::Url(url) => write!(f, "{}", url),
            SnippetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn urls_and_paths_are_told_apart() {
        assert_eq!(
            SnippetSource::parse("https://example.com/data.json"),
            SnippetSource::Url("https://example.com/data.json".to_string())
        );
        assert_eq!(
            SnippetSource::parse(" ./data.json "),
            SnippetSource::File(PathBuf::from("./data.json"))
        );
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(SnippetSource::parse("data.json").format(), DocumentFormat::Json);
        assert_eq!(SnippetSource::parse("data.YML").format(), DocumentFormat::Yaml);
        assert_eq!(
            SnippetSource::parse("https://host/s.yaml?v=2").format(),
            DocumentFormat::Yaml
        );
        assert_eq!(SnippetSource::parse("snippets").format(), DocumentFormat::Json);
    }

    #[test]
    fn file_source_loads_and_validates() {
        let mut file = tempfile::NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"[{{"id": "1", "title": "Git rebase", "tags": ["Git"]}}, {{"title": "no id"}}]"#
        )
        .unwrap();

        let source = SnippetSource::File(file.path().to_path_buf());
        let report = source.load_blocking().unwrap();

        assert_eq!(report.collection.len(), 1);
        assert_eq!(report.rejected.len(), 1);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let source = SnippetSource::parse("/definitely/not/here/data.json");
        assert!(source.load_blocking().is_err());
    }
}
