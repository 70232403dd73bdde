//! Event handling module.
//!
//! Terminal key presses are polled on a separate thread and translated into
//! application actions.

pub mod terminal;
