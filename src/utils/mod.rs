//! Shared helper functions.

pub mod text_processing;
