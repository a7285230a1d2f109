use crate::app::AppSettings;
use crate::clipboard;
use crate::models::{Snippet, SnippetCollection, TagVocabulary};
use crate::search::{self, MatchField, Query};
use anyhow::{Result, bail};
use colored::{ColoredString, Colorize};

fn margin() -> ColoredString {
    "┃".bright_magenta()
}

fn load_collection(settings: &AppSettings) -> Result<SnippetCollection> {
    let report = settings.source.load_blocking()?;
    if !report.rejected.is_empty() {
        eprintln!(
            "{}  {} {} malformed entries skipped (run with -v for details)",
            margin(),
            "!".bright_yellow(),
            report.rejected.len()
        );
    }
    Ok(report.collection)
}

/// Prints the snippets that match `tag` and `query`, in collection order
pub fn list_snippets(settings: &AppSettings, tag: Option<&str>, query: &str) -> Result<()> {
    let collection = load_collection(settings)?;
    let results = search::filter_query(
        collection.as_slice(),
        &Query::new(tag.map(str::to_string), query),
    );

    let mut heading = String::from("SNIPPETS");
    if let Some(tag) = tag {
        heading.push_str(&format!(" TAGGED #{}", tag));
    }
    if !query.trim().is_empty() {
        heading.push_str(&format!(" MATCHING '{}'", query.trim()));
    }
    println!("{}  {}", margin(), heading.bold());

    if results.is_empty() {
        println!("{}  No snippets found.", margin());
        return Ok(());
    }

    println!(
        "{}  {} of {} snippets",
        margin(),
        results.len(),
        collection.len()
    );
    println!("{}", "─".repeat(60).bright_magenta());

    for (idx, snippet) in results.iter().enumerate() {
        let language = snippet.language_kind();
        let matched = search::match_field(snippet, query);
        let match_info = matched
            .as_ref()
            .map(|field| format!(" (match in: {})", field.label().bright_green()))
            .unwrap_or_default();

        println!(
            "{}  {}. {} [{}]{}",
            margin(),
            (idx + 1).to_string().bright_yellow(),
            snippet.title.bright_white().bold(),
            language.short_name().bright_black(),
            match_info
        );
        if let Some(field @ MatchField::Code { .. }) = &matched {
            println!("{}     {}", margin(), field.context().bright_blue());
        }
        if !snippet.description.is_empty() {
            println!("{}     {}", margin(), snippet.description.italic());
        }
        println!(
            "{}     {}: {}",
            margin(),
            "Tags".bright_cyan(),
            format_tags(snippet)
        );
        println!("{}     {}: {}", margin(), "ID".bright_black(), snippet.id);

        if idx < results.len() - 1 {
            println!("{}  {}", margin(), "─".repeat(40).bright_black());
        }
    }

    Ok(())
}

/// Shows a single snippet by id
pub fn show_snippet(settings: &AppSettings, id: &str) -> Result<()> {
    let collection = load_collection(settings)?;
    let Some(snippet) = collection.get(id) else {
        print_not_found(&collection, id);
        bail!("No snippet with id `{}`", id);
    };

    display_snippet_content(snippet);
    Ok(())
}

/// Copies a snippet's code to the clipboard
pub fn copy_snippet(settings: &AppSettings, id: &str) -> Result<()> {
    let collection = load_collection(settings)?;
    let Some(snippet) = collection.get(id) else {
        print_not_found(&collection, id);
        bail!("No snippet with id `{}`", id);
    };

    println!(
        "{}  Copying {} ({} lines)... paste it somewhere to finish",
        margin(),
        snippet.title.bright_white().bold(),
        snippet.line_count()
    );
    clipboard::copy_and_wait(&snippet.code)?;
    println!("{}  {} Copied to clipboard", margin(), "✓".bright_green());
    Ok(())
}

/// Prints the tag vocabulary with how many snippets carry each tag
pub fn list_tags(settings: &AppSettings, tree: bool) -> Result<()> {
    let collection = load_collection(settings)?;
    let vocabulary = if settings.tags_from_data {
        TagVocabulary::from_collection(&collection)
    } else {
        settings.vocabulary.clone()
    };

    if tree {
        crate::cli::tree::display_tag_tree(&collection, &vocabulary);
        return Ok(());
    }

    println!("{}  {}", margin(), "TAGS".bold());
    for (idx, tag) in vocabulary.tags().iter().enumerate() {
        let count = search::filter(collection.as_slice(), Some(tag), "").len();
        println!(
            "{}  {}. {} {}",
            margin(),
            (idx + 1).to_string().bright_yellow(),
            tag.bright_white().bold(),
            format!("({})", count).bright_black()
        );
    }
    Ok(())
}

fn display_snippet_content(snippet: &Snippet) {
    let language = snippet.language_kind();

    println!(
        "{}  {} {}",
        margin(),
        "SNIPPET".bright_green().bold(),
        snippet.title.bold()
    );
    println!("{}", "─".repeat(60).bright_magenta());

    println!(
        "{}  {}: {}",
        margin(),
        "Language".bright_yellow(),
        language.display_name()
    );
    if !snippet.description.is_empty() {
        println!(
            "{}  {}: {}",
            margin(),
            "Description".bright_cyan(),
            snippet.description
        );
    }
    println!("{}  {}: {}", margin(), "Tags".bright_cyan(), format_tags(snippet));

    let author = match &snippet.author.profile_url {
        Some(url) => format!(
            "{} <{}>",
            snippet.author.display_name(),
            url.bright_blue().underline()
        ),
        None => snippet.author.display_name().to_string(),
    };
    println!("{}  {}: {}", margin(), "Added by".bright_blue(), author);

    if let Some(date) = snippet.added_on() {
        println!("{}  {}: {}", margin(), "Added".bright_blue(), date);
    } else if !snippet.added_at.is_empty() {
        println!("{}  {}: {}", margin(), "Added".bright_blue(), snippet.added_at);
    }
    println!("{}  {}: {}", margin(), "ID".bright_black(), snippet.id);
    println!("{}", "─".repeat(60).bright_magenta());

    for line in snippet.code.lines() {
        println!("{}  {}", margin(), line);
    }
}

fn print_not_found(collection: &SnippetCollection, id: &str) {
    println!("{}  No snippet found with id: {}", margin(), id);

    let needle = id.to_lowercase();
    let suggestions: Vec<&Snippet> = collection
        .iter()
        .filter(|s| {
            s.id.to_lowercase().contains(&needle) || s.title.to_lowercase().contains(&needle)
        })
        .take(10)
        .collect();

    if suggestions.is_empty() {
        return;
    }

    println!("{}  Did you mean:", margin());
    for snippet in suggestions {
        println!(
            "{}    {} {}",
            margin(),
            snippet.id.yellow(),
            snippet.title.bright_white()
        );
    }
}

fn format_tags(snippet: &Snippet) -> String {
    if snippet.tags.is_empty() {
        "none".to_string()
    } else {
        snippet
            .tags
            .iter()
            .map(|tag| format!("#{}", tag))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
