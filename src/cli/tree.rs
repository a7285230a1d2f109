use crate::models::{Snippet, SnippetCollection, TagVocabulary};
use colored::Colorize;

/// One tag and the snippets filed under it
#[derive(Debug)]
pub struct TagBranch<'a> {
    pub tag: String,
    pub snippets: Vec<&'a Snippet>,
}

/// Groups the collection by vocabulary tag. Snippets carrying none of the
/// vocabulary's tags end up in a trailing "untagged" branch.
pub fn build_tag_tree<'a>(
    collection: &'a SnippetCollection,
    vocabulary: &TagVocabulary,
) -> Vec<TagBranch<'a>> {
    let mut branches: Vec<TagBranch<'a>> = vocabulary
        .tags()
        .iter()
        .map(|tag| TagBranch {
            tag: tag.clone(),
            snippets: collection.iter().filter(|s| s.has_tag(tag)).collect(),
        })
        .collect();

    let untagged: Vec<&Snippet> = collection
        .iter()
        .filter(|s| !vocabulary.tags().iter().any(|tag| s.has_tag(tag)))
        .collect();
    if !untagged.is_empty() {
        branches.push(TagBranch {
            tag: "untagged".to_string(),
            snippets: untagged,
        });
    }

    branches
}

/// Displays the collection as a tree of tags
pub fn display_tag_tree(collection: &SnippetCollection, vocabulary: &TagVocabulary) {
    if collection.is_empty() {
        println!("{}  No snippets found.", "┃".bright_magenta());
        return;
    }

    let branches = build_tag_tree(collection, vocabulary);
    for branch in &branches {
        println!(
            "{}  {} {} {}",
            "┃".bright_magenta(),
            "#".bright_blue(),
            branch.tag.bold(),
            format!("({})", branch.snippets.len()).bright_black()
        );

        for (i, snippet) in branch.snippets.iter().enumerate() {
            let connector = if i == branch.snippets.len() - 1 {
                "└── "
            } else {
                "├── "
            };
            let language = snippet.language_kind();

            println!(
                "{}  {}{} {} [{}] {}",
                "┃".bright_magenta(),
                connector,
                language.icon(),
                snippet.title.bright_white(),
                language.short_name().bright_black(),
                snippet.id.bright_black().italic()
            );
        }
    }
}
