//! snippfy - terminal snippet browser
//!
//! Loads a collection of code snippets from a JSON (or YAML) document, lets
//! you narrow it down by tag and free text, and copies the code you pick to
//! the clipboard. Usable as an interactive ratatui app or through plain
//! subcommands.

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod search;
pub mod ui;
