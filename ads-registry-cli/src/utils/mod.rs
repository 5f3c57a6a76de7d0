//! Shared helpers

pub mod body_preview;
