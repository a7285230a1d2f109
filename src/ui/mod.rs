//! User Interface Module
//!
//! Rendering for the terminal snippet browser. Nothing in here changes
//! application state; it only reads from [`App`](crate::app::App).

pub mod colors;
pub mod components;
pub mod snippet_list;
pub mod terminal;
