use crate::clipboard::ClipboardSink;
use crate::handlers::loader::{self, LoadMessage};
use crate::models::{Snippet, SnippetCollection, SnippetSource, TagVocabulary};
use crate::search::{self, Query};
use crate::ui::colors::TagPalette;
use crate::ui::snippet_list;
use flume::Receiver;
use ratatui::Frame;
use std::time::{Duration, Instant};

/// How long copy confirmations and errors stay on screen
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

/// Lifecycle of the snippet collection. The filter only ever runs in `Ready`.
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready(SnippetCollection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    HelpMenu,
}

/// Everything the UI needs that comes from configuration
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub source: SnippetSource,
    pub vocabulary: TagVocabulary,
    pub tags_from_data: bool,
    pub palette: TagPalette,
}

/// Main Application State Container
///
/// Holds the loaded collection, the current query state and the derived
/// filtered view. `filtered` stores positions into the collection so the
/// view never copies snippets.
#[derive(Debug)]
pub struct App {
    pub source: SnippetSource,
    pub load_state: LoadState,
    pub query: Query,
    pub input_mode: InputMode,
    pub vocabulary: TagVocabulary,
    pub tags_from_data: bool,
    pub palette: TagPalette,
    pub tag_cursor: usize,
    pub filtered: Vec<usize>,
    pub selected_result: usize,
    pub preview_scroll: u16,
    pub rejected_count: usize,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub needs_redraw: bool,
    message_shown_at: Option<Instant>,
    loader: Option<Receiver<LoadMessage>>,
    clipboard: Box<dyn ClipboardSink>,
}

impl App {
    /// Creates the app in the `Loading` state and starts fetching in the background
    pub fn new(settings: AppSettings, clipboard: Box<dyn ClipboardSink>) -> Self {
        let mut app = Self::empty(settings, clipboard);
        app.loader = Some(loader::spawn_load(app.source.clone()));
        app
    }

    /// Creates the app with an already loaded collection
    pub fn with_collection(
        settings: AppSettings,
        collection: SnippetCollection,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let mut app = Self::empty(settings, clipboard);
        app.finish_loading(LoadMessage::Loaded(crate::models::DecodeReport {
            collection,
            rejected: Vec::new(),
        }));
        app
    }

    fn empty(settings: AppSettings, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self {
            source: settings.source,
            load_state: LoadState::Loading,
            query: Query::default(),
            input_mode: InputMode::Normal,
            vocabulary: settings.vocabulary,
            tags_from_data: settings.tags_from_data,
            palette: settings.palette,
            tag_cursor: 0,
            filtered: Vec::new(),
            selected_result: 0,
            preview_scroll: 0,
            rejected_count: 0,
            error_message: None,
            success_message: None,
            needs_redraw: true,
            message_shown_at: None,
            loader: None,
            clipboard,
        }
    }

    /// Applies the loader's result
    pub fn finish_loading(&mut self, message: LoadMessage) {
        self.loader = None;
        match message {
            LoadMessage::Loaded(report) => {
                self.rejected_count = report.rejected.len();
                if self.tags_from_data {
                    self.vocabulary = TagVocabulary::from_collection(&report.collection);
                    self.tag_cursor = self
                        .query
                        .selected_tag
                        .as_deref()
                        .and_then(|tag| self.vocabulary.position(tag))
                        .unwrap_or(0);
                }
                self.load_state = LoadState::Ready(report.collection);
                self.apply_filter();
            }
            LoadMessage::Failed(error) => {
                self.load_state = LoadState::Failed(error);
                self.filtered.clear();
            }
        }
        self.needs_redraw = true;
    }

    pub fn collection(&self) -> Option<&SnippetCollection> {
        match &self.load_state {
            LoadState::Ready(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    /// Re-evaluates the filter after any change to the query state
    pub fn apply_filter(&mut self) {
        let previous = self.selected_snippet().map(|s| s.id.clone());

        self.filtered = match &self.load_state {
            LoadState::Ready(collection) => {
                search::filter_indices(collection.as_slice(), &self.query)
            }
            _ => Vec::new(),
        };

        // Keep the same snippet selected if it survived the new filter
        let kept = previous.and_then(|id| {
            self.visible_snippets()
                .iter()
                .position(|snippet| snippet.id == id)
        });
        match kept {
            Some(position) => self.selected_result = position,
            None => {
                self.selected_result = 0;
                self.preview_scroll = 0;
            }
        }
    }

    pub fn visible_snippets(&self) -> Vec<&Snippet> {
        match self.collection() {
            Some(collection) => self
                .filtered
                .iter()
                .filter_map(|&index| collection.get_index(index))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn selected_snippet(&self) -> Option<&Snippet> {
        let index = *self.filtered.get(self.selected_result)?;
        self.collection()?.get_index(index)
    }

    pub fn next_result(&mut self) {
        if !self.filtered.is_empty() {
            self.selected_result = (self.selected_result + 1) % self.filtered.len();
            self.preview_scroll = 0;
        }
    }

    pub fn previous_result(&mut self) {
        if !self.filtered.is_empty() {
            self.selected_result =
                (self.selected_result + self.filtered.len() - 1) % self.filtered.len();
            self.preview_scroll = 0;
        }
    }

    pub fn next_tag(&mut self) {
        if !self.vocabulary.is_empty() {
            self.tag_cursor = (self.tag_cursor + 1) % self.vocabulary.len();
        }
    }

    pub fn previous_tag(&mut self) {
        if !self.vocabulary.is_empty() {
            self.tag_cursor = (self.tag_cursor + self.vocabulary.len() - 1) % self.vocabulary.len();
        }
    }

    /// Toggles the tag under the cursor as the tag filter
    pub fn toggle_tag_at_cursor(&mut self) {
        if let Some(tag) = self.vocabulary.get(self.tag_cursor).map(str::to_string) {
            self.query.toggle_tag(&tag);
            self.apply_filter();
        }
    }

    pub fn clear_tag_filter(&mut self) {
        if self.query.selected_tag.is_some() {
            self.query.clear_tag();
            self.apply_filter();
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.query.search_text.push(c);
        self.apply_filter();
    }

    pub fn pop_search_char(&mut self) {
        if self.query.search_text.pop().is_some() {
            self.apply_filter();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.query.search_text.is_empty() {
            self.query.search_text.clear();
            self.apply_filter();
        }
    }

    pub fn scroll_preview_down(&mut self) {
        if let Some(snippet) = self.selected_snippet() {
            let max = u16::try_from(snippet.line_count().saturating_sub(1)).unwrap_or(u16::MAX);
            self.preview_scroll = self.preview_scroll.saturating_add(1).min(max);
        }
    }

    pub fn scroll_preview_up(&mut self) {
        self.preview_scroll = self.preview_scroll.saturating_sub(1);
    }

    /// Copies the selected snippet's code to the clipboard
    pub fn copy_selected(&mut self) -> Result<(), String> {
        let (title, code) = match self.selected_snippet() {
            Some(snippet) => (snippet.title.clone(), snippet.code.clone()),
            None => return Err("No snippet selected".to_string()),
        };

        self.clipboard
            .copy_text(&code)
            .map_err(|e| format!("Copy failed: {:#}", e))?;

        self.set_success_message(format!("Copied \"{}\" to clipboard", title));
        Ok(())
    }

    pub fn set_error_message(&mut self, message: String) {
        tracing::warn!(%message, "ui error");
        self.error_message = Some(message);
        self.success_message = None;
        self.message_shown_at = Some(Instant::now());
    }

    pub fn set_success_message(&mut self, message: String) {
        self.success_message = Some(message);
        self.error_message = None;
        self.message_shown_at = Some(Instant::now());
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
        self.message_shown_at = None;
    }

    /// Called once per event-loop iteration: picks up the load result and
    /// expires status messages.
    pub fn tick(&mut self) {
        if let Some(message) = self.loader.as_ref().and_then(loader::poll) {
            self.finish_loading(message);
        }

        if let Some(shown_at) = self.message_shown_at {
            if shown_at.elapsed() >= MESSAGE_TIMEOUT {
                self.clear_messages();
                self.needs_redraw = true;
            }
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        snippet_list::render(frame, self);
    }
}
