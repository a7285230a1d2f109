//! Event Handling Module
//!
//! Turns terminal key events and background load results into application
//! state changes.
//!
//! # Module Organization
//!
//! - **`keys`**: Keyboard input processing and navigation logic
//! - **`loader`**: Background fetch of the snippet document
//!

pub mod keys;
pub mod loader;
